use crate::{
    error::UProveError,
    messages::{SerializedKeyAndToken, SerializedUProveToken},
};
use ark_ec::AffineRepr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::vec::Vec;
use uprove_crypto_utils::{ec::element_to_bytes, ff::scalar_to_bytes};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A token as produced by issuance: the issuer's blind signature `(sigma_z', sigma_c', sigma_r')` on the
/// token public key `h`, bound to the token information `ti` and the prover information `pi`.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct UProveToken<G: AffineRepr> {
    pub uidp: Vec<u8>,
    pub h: G,
    pub ti: Vec<u8>,
    pub pi: Vec<u8>,
    pub szp: G,
    pub scp: G::ScalarField,
    pub srp: G::ScalarField,
    /// Device protected tokens are not supported so this is always false
    pub is_device_protected: bool,
}

/// A token with its private key `alpha^-1`, the discrete log of `gamma` relative to `h`
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyAndToken<G: AffineRepr> {
    #[zeroize(skip)]
    pub token: UProveToken<G>,
    pub key: G::ScalarField,
}

impl<G: AffineRepr> UProveToken<G> {
    pub fn to_serialized(&self) -> Result<SerializedUProveToken, UProveError> {
        Ok(SerializedUProveToken {
            uidp: self.uidp.clone(),
            h: element_to_bytes(&self.h)?,
            ti: self.ti.clone(),
            pi: self.pi.clone(),
            szp: element_to_bytes(&self.szp)?,
            scp: scalar_to_bytes(&self.scp),
            srp: scalar_to_bytes(&self.srp),
        })
    }
}

impl<G: AffineRepr> KeyAndToken<G> {
    pub fn to_serialized(&self) -> Result<SerializedKeyAndToken, UProveError> {
        Ok(SerializedKeyAndToken {
            token: self.token.to_serialized()?,
            key: scalar_to_bytes(&self.key),
        })
    }
}
