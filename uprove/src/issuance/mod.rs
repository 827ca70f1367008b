//! Three message blind issuance of a batch of tokens.
//!
//! 1. Issuer -> Prover: [`FirstMessage`] `sigma_z = gamma^y0` and for each token `sigma_a = g^w`, `sigma_b = gamma^w`.
//! 2. Prover -> Issuer: [`SecondMessage`] for each token the blinded challenge `sigma_c = sigma_c' + beta1`.
//! 3. Issuer -> Prover: [`ThirdMessage`] for each token the response `sigma_r = sigma_c * y0 + w`.
//!
//! The prover then unblinds each response into `sigma_r' = sigma_r + beta2` and obtains tokens whose
//! signatures the issuer has never seen, together with their private keys. [`IssuerSession`] holds the
//! issuer side and [`Prover`] the prover side; both enforce the order of the steps.

pub mod issuer;
pub mod prover;

pub use issuer::{IssuerSession, IssuerState};
pub use prover::{Prover, ProverState};

use crate::{
    common::scalars_to_wire,
    error::UProveError,
    messages::{SerializedFirstMessage, SerializedSecondMessage, SerializedThirdMessage},
};
use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::vec::Vec;
use uprove_crypto_utils::ec::{element_to_bytes, elements_to_bytes};

#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct FirstMessage<G: AffineRepr> {
    pub sz: G,
    pub sa: Vec<G>,
    pub sb: Vec<G>,
}

#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct SecondMessage<F: PrimeField> {
    pub sc: Vec<F>,
}

#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ThirdMessage<F: PrimeField> {
    pub sr: Vec<F>,
}

impl<G: AffineRepr> FirstMessage<G> {
    /// Number of tokens in the batch
    pub fn len(&self) -> usize {
        self.sa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sa.is_empty()
    }

    pub fn to_serialized(&self) -> Result<SerializedFirstMessage, UProveError> {
        Ok(SerializedFirstMessage {
            sz: element_to_bytes(&self.sz)?,
            sa: elements_to_bytes(&self.sa)?,
            sb: elements_to_bytes(&self.sb)?,
        })
    }
}

impl<F: PrimeField> SecondMessage<F> {
    pub fn to_serialized(&self) -> SerializedSecondMessage {
        SerializedSecondMessage {
            sc: scalars_to_wire(&self.sc),
        }
    }
}

impl<F: PrimeField> ThirdMessage<F> {
    pub fn to_serialized(&self) -> SerializedThirdMessage {
        SerializedThirdMessage {
            sr: scalars_to_wire(&self.sr),
        }
    }
}
