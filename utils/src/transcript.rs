//! Transcript hasher from which every digest and Fiat-Shamir challenge of the protocol is derived.
//!
//! Inputs are framed so that the hashed byte string is unambiguous: integers are 4 byte big-endian,
//! byte strings are prefixed by their length and an absent value is hashed as a zero length. Group
//! elements are hashed as their compressed encoding and scalars as their fixed width big-endian
//! encoding, both as length prefixed byte strings.

use crate::{ec::element_to_bytes, ff::scalar_to_bytes};
use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use ark_serialize::SerializationError;
use sha2::{Digest, Sha256};

/// Size of the output of `UProveHash::digest`
pub const DIGEST_SIZE: usize = 32;

#[derive(Clone, Default)]
pub struct UProveHash(Sha256);

impl UProveHash {
    pub fn new() -> Self {
        Self(Sha256::new())
    }

    pub fn update_byte(&mut self, b: u8) {
        self.0.update([b]);
    }

    pub fn update_u32(&mut self, n: u32) {
        self.0.update(n.to_be_bytes());
    }

    /// Length prefixed bytes
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.update_u32(bytes.len() as u32);
        self.0.update(bytes);
    }

    /// Bytes without any framing
    pub fn update_raw_bytes(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    pub fn update_null(&mut self) {
        self.update_u32(0);
    }

    /// A list of single bytes, like the encoding policy of the attributes
    pub fn update_list_of_bytes(&mut self, list: &[u8]) {
        self.update_u32(list.len() as u32);
        self.0.update(list);
    }

    pub fn update_list_of_byte_arrays<B: AsRef<[u8]>>(&mut self, list: &[B]) {
        self.update_u32(list.len() as u32);
        for b in list {
            self.update_bytes(b.as_ref());
        }
    }

    pub fn update_list_of_indices(&mut self, list: &[usize]) {
        self.update_u32(list.len() as u32);
        for i in list {
            self.update_u32(*i as u32);
        }
    }

    /// A list of big-endian unsigned integers, each hashed as length prefixed bytes
    pub fn update_list_of_integers<B: AsRef<[u8]>>(&mut self, list: &[B]) {
        self.update_list_of_byte_arrays(list)
    }

    pub fn update_element<G: AffineRepr>(&mut self, elem: &G) -> Result<(), SerializationError> {
        self.update_bytes(&element_to_bytes(elem)?);
        Ok(())
    }

    pub fn update_scalar<F: PrimeField>(&mut self, f: &F) {
        self.update_bytes(&scalar_to_bytes(f));
    }

    pub fn update_optional_element<G: AffineRepr>(
        &mut self,
        elem: Option<&G>,
    ) -> Result<(), SerializationError> {
        match elem {
            Some(e) => self.update_element(e),
            None => {
                self.update_null();
                Ok(())
            }
        }
    }

    pub fn update_list_of_elements<G: AffineRepr>(
        &mut self,
        elems: &[G],
    ) -> Result<(), SerializationError> {
        self.update_u32(elems.len() as u32);
        for e in elems {
            self.update_element(e)?;
        }
        Ok(())
    }

    pub fn update_list_of_scalars<F: PrimeField>(&mut self, scalars: &[F]) {
        self.update_u32(scalars.len() as u32);
        for f in scalars {
            self.update_scalar(f);
        }
    }

    /// Finalize the hash. The hasher is consumed so it cannot be reused.
    pub fn digest(self) -> [u8; DIGEST_SIZE] {
        self.0.finalize().into()
    }

    /// Finalize the hash and reduce the digest modulo the order of the scalar field
    pub fn digest_to_scalar<F: PrimeField>(self) -> F {
        F::from_be_bytes_mod_order(&self.digest())
    }
}
