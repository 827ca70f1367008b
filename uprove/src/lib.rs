//! U-Prove anonymous credentials over elliptic curve groups.
//!
//! An issuer blindly signs tokens that encode a list of attributes, and the holder of a token later
//! presents it to verifiers while disclosing only chosen attributes. Presentations are unlinkable to
//! issuance and, unless a scope pseudonym is requested, to each other.
//!
//! ## Modules
//!
//! 1. Attribute encoding - [`attribute`]
//! 2. Groups the protocol runs over and their pre-generated bases - [`group`]
//! 3. Issuer parameters and parsing of every message exchanged under them - [`issuer_params`]
//! 4. Three message batch issuance for the issuer and the prover - [`issuance`]
//! 5. Presentation proofs and their verification, with commitments and scope pseudonyms - [`presentation`]
//! 6. JSON wire format of all messages - [`messages`]
//!
//! Randomness is always passed explicitly as a [`rng::RandomNumberGenerator`]. Any `RngCore` works and
//! [`rng::TestVectorRng`] replays fixed values.
//!
//! [`attribute`]: crate::attribute
//! [`group`]: crate::group
//! [`issuer_params`]: crate::issuer_params
//! [`issuance`]: crate::issuance
//! [`presentation`]: crate::presentation
//! [`messages`]: crate::messages

pub mod attribute;
pub mod common;
pub mod error;
pub mod group;
pub mod issuance;
pub mod issuer_params;
pub mod key_container;
pub mod messages;
pub mod presentation;
pub mod rng;
pub mod token;

pub mod prelude {
    pub use crate::{
        attribute::{Attribute, AttributeSet, AttributeValue},
        error::UProveError,
        group::{GroupFamily, UProveGroup},
        issuance::{IssuerSession, Prover},
        issuer_params::{AnyIssuerParams, IssuerParams},
        key_container::{InMemoryPrivateKeyContainer, PrivateKeyContainer},
        presentation::{
            compute_pseudonym, generate_proof, PresentationRequest, Proof, ScopeData, Verifier,
        },
        rng::{RandomNumberGenerator, TestVectorRng},
        token::{KeyAndToken, UProveToken},
    };
}
