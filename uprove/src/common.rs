//! Values computed the same way by the issuer, the prover and the verifier: attribute scalars, the
//! token information scalar, token identifiers and the presentation challenge.

use crate::{error::UProveError, group::UProveGroup, issuer_params::IssuerParams, token::UProveToken};
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_std::{format, vec::Vec};
use uprove_crypto_utils::{
    ec::element_from_bytes,
    ff::{scalar_from_bytes, scalar_from_bytes_mod_order, scalar_to_bytes},
    hash_elements,
    transcript::{UProveHash, DIGEST_SIZE},
};

/// Hash identifying a token
pub type TokenId = [u8; DIGEST_SIZE];

/// Attribute is encoded directly into `Z_q`
pub const ENCODING_DIRECT: u8 = 0;
/// Attribute is hashed into `Z_q`
pub const ENCODING_HASHED: u8 = 1;

/// Map an attribute value to `Z_q` according to its encoding policy `e`. An absent value is mapped
/// to 0 under the hashed policy.
pub fn compute_x<F: PrimeField>(attribute: Option<&[u8]>, e: u8) -> Result<F, UProveError> {
    match e {
        ENCODING_HASHED => Ok(match attribute {
            None => F::zero(),
            Some(a) => {
                let mut hasher = UProveHash::new();
                hasher.update_bytes(a);
                hasher.digest_to_scalar()
            }
        }),
        ENCODING_DIRECT => Ok(scalar_from_bytes_mod_order(attribute.unwrap_or_default())),
        _ => Err(UProveError::InvalidEncodingPolicy(e)),
    }
}

pub fn compute_x_array<F: PrimeField, B: AsRef<[u8]>>(
    attributes: &[B],
    e: &[u8],
) -> Result<Vec<F>, UProveError> {
    if attributes.len() != e.len() {
        return Err(UProveError::LengthMismatch(e.len(), attributes.len()));
    }
    attributes
        .iter()
        .zip(e.iter())
        .map(|(a, e)| compute_x(Some(a.as_ref()), *e))
        .collect()
}

/// Scalar of the token information, `H(1, P, TI)` where `P` is the issuer parameters digest
pub fn compute_xt<G: UProveGroup>(ip: &IssuerParams<G>, ti: &[u8]) -> G::ScalarField {
    let mut hasher = UProveHash::new();
    hasher.update_byte(1);
    hasher.update_bytes(ip.digest());
    hasher.update_bytes(ti);
    hasher.digest_to_scalar()
}

/// `gamma = g_0 * g_1^x_1 * .. * g_n^x_n * g_t^x_t`, the element the issuer signs
pub fn compute_gamma<G: UProveGroup, B: AsRef<[u8]>>(
    ip: &IssuerParams<G>,
    attributes: &[B],
    ti: &[u8],
) -> Result<G, UProveError> {
    let mut exponents = Vec::with_capacity(ip.g().len());
    exponents.push(G::ScalarField::from(1u64));
    exponents.append(&mut compute_x_array(attributes, ip.e())?);
    exponents.push(compute_xt(ip, ti));
    Ok(multi_mod_exp(ip.g(), &exponents)?.into_affine())
}

/// `prod bases[i]^exponents[i]`
pub fn multi_mod_exp<G: AffineRepr>(
    bases: &[G],
    exponents: &[G::ScalarField],
) -> Result<G::Group, UProveError> {
    if bases.len() != exponents.len() {
        return Err(UProveError::LengthMismatch(bases.len(), exponents.len()));
    }
    G::Group::msm(bases, exponents).map_err(|_| UProveError::LengthMismatch(bases.len(), exponents.len()))
}

/// `H(elem)`, used to hash commitments to randomness before they are sent
pub fn hash_element<G: AffineRepr>(elem: &G) -> Result<[u8; DIGEST_SIZE], UProveError> {
    let mut hasher = UProveHash::new();
    hasher.update_element(elem)?;
    Ok(hasher.digest())
}

/// `UID_t = H(h, sigma_z', sigma_c', sigma_r')`
pub fn compute_token_id<G: AffineRepr>(token: &UProveToken<G>) -> Result<TokenId, UProveError> {
    let mut hasher = UProveHash::new();
    hash_elements!(hasher, &token.h, &token.szp);
    hasher.update_scalar(&token.scp);
    hasher.update_scalar(&token.srp);
    Ok(hasher.digest())
}

/// `sigma_c' = H(h, PI, sigma_z', sigma_a', sigma_b')`
pub fn compute_sigma_c_prime<G: AffineRepr>(
    h: &G,
    pi: &[u8],
    sigma_z_prime: &G,
    sigma_a_prime: &G,
    sigma_b_prime: &G,
) -> Result<G::ScalarField, UProveError> {
    let mut hasher = UProveHash::new();
    hasher.update_element(h)?;
    hasher.update_bytes(pi);
    hash_elements!(hasher, sigma_z_prime, sigma_a_prime, sigma_b_prime);
    Ok(hasher.digest_to_scalar())
}

/// Presentation challenge. First `c' = H(UID_t, a, <D>, <x_i for i in D>, <C>, <tilde_c_i>, <tilde_a_i>,
/// p, ap, Ps, m)` and then `c = H(2, c', md)` reduced into `Z_q`. `p` is 0 when there is no scope.
pub fn generate_challenge<G: AffineRepr>(
    token_id: &[u8],
    a: &[u8],
    disclosed_indices: &[usize],
    disclosed_x: &[G::ScalarField],
    committed_indices: &[usize],
    tilde_c: &[G],
    tilde_a: &[[u8; DIGEST_SIZE]],
    p: usize,
    ap: Option<&[u8]>,
    ps: Option<&G>,
    m: &[u8],
    md: Option<&[u8]>,
) -> Result<G::ScalarField, UProveError> {
    let mut hasher = UProveHash::new();
    hasher.update_bytes(token_id);
    hasher.update_bytes(a);
    hasher.update_list_of_indices(disclosed_indices);
    hasher.update_list_of_scalars(disclosed_x);
    hasher.update_list_of_indices(committed_indices);
    hasher.update_list_of_elements(tilde_c)?;
    hasher.update_list_of_byte_arrays(tilde_a);
    hasher.update_u32(p as u32);
    match ap {
        Some(ap) => hasher.update_bytes(ap),
        None => hasher.update_null(),
    }
    hasher.update_optional_element(ps)?;
    hasher.update_bytes(m);
    let cp = hasher.digest();

    let mut hasher = UProveHash::new();
    hasher.update_u32(2);
    hasher.update_bytes(&cp);
    match md {
        Some(md) => hasher.update_bytes(md),
        None => hasher.update_null(),
    }
    Ok(hasher.digest_to_scalar())
}

pub(crate) fn scalar_from_wire<F: PrimeField>(bytes: &[u8], what: &str) -> Result<F, UProveError> {
    scalar_from_bytes(bytes).ok_or_else(|| {
        UProveError::InvalidSerialization(format!("{} is not a canonical scalar encoding", what))
    })
}

pub(crate) fn scalars_from_wire<F: PrimeField, B: AsRef<[u8]>>(
    list: &[B],
    what: &str,
) -> Result<Vec<F>, UProveError> {
    list.iter()
        .map(|b| scalar_from_wire(b.as_ref(), what))
        .collect()
}

pub(crate) fn scalars_to_wire<F: PrimeField>(list: &[F]) -> Vec<Vec<u8>> {
    list.iter().map(scalar_to_bytes).collect()
}

pub(crate) fn element_from_wire<G: AffineRepr>(bytes: &[u8], what: &str) -> Result<G, UProveError> {
    element_from_bytes(bytes).map_err(|e| {
        UProveError::InvalidSerialization(format!("{} is not a valid group element: {:?}", what, e))
    })
}

pub(crate) fn elements_from_wire<G: AffineRepr, B: AsRef<[u8]>>(
    list: &[B],
    what: &str,
) -> Result<Vec<G>, UProveError> {
    list.iter()
        .map(|b| element_from_wire(b.as_ref(), what))
        .collect()
}

pub(crate) fn digest_from_wire(bytes: &[u8], what: &str) -> Result<[u8; DIGEST_SIZE], UProveError> {
    bytes.try_into().map_err(|_| {
        UProveError::InvalidSerialization(format!(
            "{} must be {} bytes but is {}",
            what,
            DIGEST_SIZE,
            bytes.len()
        ))
    })
}

/// Checks that indices are distinct and lie in `1..=n`, returns them sorted
pub(crate) fn sorted_indices(indices: &[usize], n: usize, what: &str) -> Result<Vec<usize>, UProveError> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    if let Some(i) = sorted.iter().find(|i| **i == 0 || **i > n) {
        return Err(UProveError::InvalidDisclosureRequest(format!(
            "{} index {} is outside 1..={}",
            what, i, n
        )));
    }
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return Err(UProveError::InvalidDisclosureRequest(format!(
            "{} indices contain duplicates",
            what
        )));
    }
    Ok(sorted)
}
