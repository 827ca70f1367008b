use crate::concat_slices;
use ark_ec::AffineRepr;
use digest::Digest;

/// Hash bytes to a point in the prime order subgroup of the curve. Returns as Affine coordinates.
/// Tries `H(bytes || index || counter)` for increasing counter until the digest decodes to a curve
/// point whose cofactor multiple is not the identity. Anyone can rerun this to check that nobody knows
/// the discrete log of the result relative to other such elements. This is vulnerable to timing attack
/// and is only used when input is public anyway like when generating setup parameters or scope elements.
pub fn affine_group_elem_from_try_and_incr<G: AffineRepr, D: Digest>(bytes: &[u8], index: u8) -> G {
    let mut counter = 0u32;
    loop {
        let hash = D::digest(concat_slices!(bytes, [index], counter.to_be_bytes()));
        if let Some(g) = G::from_random_bytes(&hash) {
            let g = g.mul_by_cofactor();
            if !g.is_zero() {
                return g;
            }
        }
        counter += 1;
    }
}
