//! Registry of the groups issuer parameters can be created over.
//!
//! Each supported group is an arkworks curve whose affine point type implements [`UProveGroup`]. Besides
//! the curve arithmetic it provides the hash contribution of the group description, the pre-generated
//! attribute bases `g_1..g_n, g_t` and the derivation of scope elements. Bases are verifiably random so
//! no one knows discrete log relations between them.

use crate::error::UProveError;
use ark_ec::{short_weierstrass::SWCurveConfig, twisted_edwards::TECurveConfig, AffineRepr, CurveConfig};
use ark_ff::{BigInteger, PrimeField};
use ark_serialize::SerializationError;
use ark_std::{cfg_into_iter, format, string::ToString, vec::Vec};
use sha2::Sha256;
use uprove_crypto_utils::{
    concat_slices, hashing_utils::affine_group_elem_from_try_and_incr, transcript::UProveHash,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Largest number of attributes the pre-generated bases cover
pub const MAX_ATTRIBUTES: usize = 50;

/// Index used when deriving `g_t`, the base of the token information attribute
pub const GT_INDEX: u8 = 255;

/// Prefix of the context from which the pre-generated bases are derived, followed by the group identifier
pub const RECOMMENDED_PARAMETERS_LABEL: &[u8] = b"U-Prove Recommended Parameters Profile";

pub const P256_NAME: &str = "1.3.6.1.4.1.311.75.1.2.1";
pub const CURVE25519_NAME: &str = "curve25519";
/// Identifier of the 2048-bit subgroup family. Recognised but not supported.
pub const L2048N256_NAME: &str = "1.3.6.1.4.1.311.75.1.1.1";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupFamily {
    P256,
    Curve25519,
}

impl GroupFamily {
    pub fn name(&self) -> &'static str {
        match self {
            Self::P256 => P256_NAME,
            Self::Curve25519 => CURVE25519_NAME,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, UProveError> {
        match name {
            P256_NAME => Ok(Self::P256),
            CURVE25519_NAME => Ok(Self::Curve25519),
            L2048N256_NAME => Err(UProveError::UnknownGroup(format!(
                "{} (subgroup construction is not supported)",
                name
            ))),
            _ => Err(UProveError::UnknownGroup(name.to_string())),
        }
    }
}

pub trait UProveGroup: AffineRepr {
    const FAMILY: GroupFamily;

    /// Adds the group description to the hash: field modulus, curve coefficients, generator,
    /// group order and cofactor
    fn update_hash(hasher: &mut UProveHash) -> Result<(), SerializationError>;

    /// Deterministically derive an element from public `context` and `index`
    fn verifiably_random_element(context: &[u8], index: u8) -> Self {
        affine_group_elem_from_try_and_incr::<Self, Sha256>(context, index)
    }

    /// Returns `n + 2` bases `g_0, g_1, .., g_n, g_t`. `g_0` is the group generator and is replaced by
    /// the issuer's public key in issuer parameters.
    fn pregenerated_generators(n: usize) -> Result<Vec<Self>, UProveError> {
        if n > MAX_ATTRIBUTES {
            return Err(UProveError::TooManyAttributes(n));
        }
        let label = concat_slices!(RECOMMENDED_PARAMETERS_LABEL, Self::FAMILY.name().as_bytes());
        let mut g = Vec::with_capacity(n + 2);
        g.push(Self::generator());
        g.extend(
            cfg_into_iter!(1..=n)
                .map(|i| Self::verifiably_random_element(&label, i as u8))
                .collect::<Vec<_>>(),
        );
        g.push(Self::verifiably_random_element(&label, GT_INDEX));
        Ok(g)
    }

    /// Base of pseudonyms for the scope `s`
    fn scope_element(s: &[u8]) -> Self {
        Self::verifiably_random_element(s, 0)
    }
}

fn limbs_to_be_bytes(limbs: &[u64]) -> Vec<u8> {
    limbs.iter().rev().flat_map(|l| l.to_be_bytes()).collect()
}

fn update_hash_with_curve<G: AffineRepr, F: PrimeField>(
    hasher: &mut UProveHash,
    coefficients: &[F],
    cofactor: &[u64],
) -> Result<(), SerializationError> {
    hasher.update_bytes(&F::MODULUS.to_bytes_be());
    for c in coefficients {
        hasher.update_scalar(c);
    }
    hasher.update_element(&G::generator())?;
    hasher.update_bytes(&G::ScalarField::MODULUS.to_bytes_be());
    hasher.update_bytes(&limbs_to_be_bytes(cofactor));
    Ok(())
}

impl UProveGroup for ark_secp256r1::Affine {
    const FAMILY: GroupFamily = GroupFamily::P256;

    fn update_hash(hasher: &mut UProveHash) -> Result<(), SerializationError> {
        type C = ark_secp256r1::Config;
        update_hash_with_curve::<Self, ark_secp256r1::Fq>(
            hasher,
            &[<C as SWCurveConfig>::COEFF_A, <C as SWCurveConfig>::COEFF_B],
            <C as CurveConfig>::COFACTOR,
        )
    }
}

impl UProveGroup for ark_curve25519::EdwardsAffine {
    const FAMILY: GroupFamily = GroupFamily::Curve25519;

    fn update_hash(hasher: &mut UProveHash) -> Result<(), SerializationError> {
        type C = ark_curve25519::Curve25519Config;
        update_hash_with_curve::<Self, ark_curve25519::Fq>(
            hasher,
            &[<C as TECurveConfig>::COEFF_A, <C as TECurveConfig>::COEFF_D],
            <C as CurveConfig>::COFACTOR,
        )
    }
}
