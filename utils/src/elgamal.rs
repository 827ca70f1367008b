//! Elgamal encryption in the exponent. A scalar `m` is encrypted as `(g * r, g * m + pk * r)` so decryption
//! only recovers the group element `g * m`.

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{rand::RngCore, UniformRand};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Decryption key `x`
#[derive(
    Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop, CanonicalSerialize, CanonicalDeserialize,
)]
pub struct SecretKey<F: PrimeField>(pub F);

/// Encryption key `gen * x`
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PublicKey<G: AffineRepr>(pub G);

impl<G: AffineRepr> PublicKey<G> {
    pub fn new(secret_key: &SecretKey<G::ScalarField>, gen: &G) -> Self {
        Self((*gen * secret_key.0).into_affine())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Ciphertext<G: AffineRepr> {
    /// Ephemeral public key `gen * r`
    pub enc1: G,
    /// `gen * m + pk * r`
    pub enc2: G,
}

impl<G: AffineRepr> Ciphertext<G> {
    /// Encrypt `msg` with the given randomness `r`
    pub fn new_with_randomness(
        msg: &G::ScalarField,
        randomness: &G::ScalarField,
        public_key: &G,
        gen: &G,
    ) -> Self {
        let enc1 = (*gen * randomness).into_affine();
        let enc2 = (*gen * msg + *public_key * randomness).into_affine();
        Self { enc1, enc2 }
    }

    /// Returns the ciphertext and randomness created for encryption
    pub fn new<R: RngCore>(
        rng: &mut R,
        msg: &G::ScalarField,
        public_key: &G,
        gen: &G,
    ) -> (Self, G::ScalarField) {
        let r = G::ScalarField::rand(rng);
        (Self::new_with_randomness(msg, &r, public_key, gen), r)
    }

    /// Returns `gen * m`
    pub fn decrypt(&self, secret_key: &G::ScalarField) -> G {
        (self.enc2.into_group() - self.enc1 * secret_key).into_affine()
    }
}
