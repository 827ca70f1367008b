use ark_ff::PrimeField;
use ark_std::vec::Vec;
use uprove_crypto_utils::ff::scalar_to_bytes;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Storage of a private key, the issuer's `y0` or an escrow auditor's decryption key. Implementations
/// may keep the key outside of process memory and only hand it out when it is needed.
pub trait PrivateKeyContainer {
    /// Fixed width big-endian encoding of the key
    fn private_key_bytes(&self) -> Vec<u8>;
}

#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct InMemoryPrivateKeyContainer<F: PrimeField>(F);

impl<F: PrimeField> InMemoryPrivateKeyContainer<F> {
    pub fn new(y0: F) -> Self {
        Self(y0)
    }

    pub fn private_key(&self) -> &F {
        &self.0
    }
}

impl<F: PrimeField> PrivateKeyContainer for InMemoryPrivateKeyContainer<F> {
    fn private_key_bytes(&self) -> Vec<u8> {
        scalar_to_bytes(&self.0)
    }
}
