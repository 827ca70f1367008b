use ark_ff::{BigInteger, PrimeField};
use ark_std::vec::Vec;

/// Fixed width unsigned big-endian encoding of a scalar. All scalars of a field encode to the same length.
pub fn scalar_to_bytes<F: PrimeField>(f: &F) -> Vec<u8> {
    f.into_bigint().to_bytes_be()
}

/// Inverse of `scalar_to_bytes`. Returns `None` if the bytes are not the canonical encoding of a
/// scalar, i.e. if the length is wrong or the encoded integer is not reduced modulo the field order.
pub fn scalar_from_bytes<F: PrimeField>(bytes: &[u8]) -> Option<F> {
    let f = F::from_be_bytes_mod_order(bytes);
    if scalar_to_bytes(&f) == bytes {
        Some(f)
    } else {
        None
    }
}

/// Interpret arbitrary bytes as a big-endian integer and reduce it modulo the field order.
pub fn scalar_from_bytes_mod_order<F: PrimeField>(bytes: &[u8]) -> F {
    F::from_be_bytes_mod_order(bytes)
}
