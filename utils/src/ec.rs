use ark_ec::AffineRepr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use ark_std::vec::Vec;

/// Compressed canonical encoding of a group element, as used on the wire and in hashes.
pub fn element_to_bytes<G: AffineRepr>(elem: &G) -> Result<Vec<u8>, SerializationError> {
    let mut bytes = Vec::with_capacity(elem.compressed_size());
    elem.serialize_compressed(&mut bytes)?;
    Ok(bytes)
}

/// Parse a group element, checking that it lies in the prime order subgroup.
pub fn element_from_bytes<G: AffineRepr>(bytes: &[u8]) -> Result<G, SerializationError> {
    let elem = G::deserialize_compressed(bytes)?;
    if elem.compressed_size() != bytes.len() {
        return Err(SerializationError::InvalidData);
    }
    Ok(elem)
}

/// Encode each of the given elements
pub fn elements_to_bytes<G: AffineRepr>(elems: &[G]) -> Result<Vec<Vec<u8>>, SerializationError> {
    elems.iter().map(element_to_bytes).collect()
}

/// Parse each of the given byte strings as an element
pub fn elements_from_bytes<G: AffineRepr, B: AsRef<[u8]>>(
    bytes: &[B],
) -> Result<Vec<G>, SerializationError> {
    bytes
        .iter()
        .map(|b| element_from_bytes(b.as_ref()))
        .collect()
}
