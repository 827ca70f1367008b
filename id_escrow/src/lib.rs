//! ID escrow for U-Prove tokens.
//!
//! A prover who committed to an attribute in a presentation proof encrypts that attribute to an auditor
//! with Elgamal in the exponent and proves that the ciphertext and the commitment hide the same value.
//! Verifiers check the proof against the commitment from the presentation. Only the auditor can decrypt,
//! and decryption yields `g^x` for the attribute's scalar `x` rather than `x` itself.
//!
//! - [`auditor`]: auditor key and decryption
//! - [`encryption`]: verifiable encryption by the prover
//! - [`verifier`]: verification of the encryption proof
//!
//! [`auditor`]: crate::auditor
//! [`encryption`]: crate::encryption
//! [`verifier`]: crate::verifier

pub mod auditor;
pub mod encryption;
pub mod error;
pub mod verifier;

pub mod prelude {
    pub use crate::{
        auditor::{Auditor, AuditorParams},
        encryption::{verifiable_encrypt, CommittedAttribute, IdEscrowProof, SerializedIdEscrowProof},
        error::IdEscrowError,
        verifier::IdEscrowVerifier,
    };
}
