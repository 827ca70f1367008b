//! Serde adapters for the wire format. Byte strings travel as standard padded base64 text and
//! `arkworks-rs` objects, which don't implement serde themselves, as base64 of their compressed
//! canonical encoding.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{string::String, vec::Vec};
use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

pub fn to_base64(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}

pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64_STANDARD.decode(s)
}

/// Serialize a byte string as base64 text. Use as `#[serde_as(as = "Base64Bytes")]` on `Vec<u8>`
/// fields, `Vec<Base64Bytes>` on lists of byte strings and `Option<Base64Bytes>` on optional ones.
pub struct Base64Bytes;

impl<T: AsRef<[u8]>> SerializeAs<T> for Base64Bytes {
    fn serialize_as<S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(&to_base64(bytes.as_ref()), serializer)
    }
}

impl<'de> DeserializeAs<'de, Vec<u8>> for Base64Bytes {
    fn deserialize_as<D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        from_base64(&s).map_err(serde::de::Error::custom)
    }
}

pub type ArkObjectBase64 = AsCanonicalBase64;

// This is taken from the expanded [`serde_with::serde_conv!`] macro but generalized for any `T: CanonicalSerialize + CanonicalDeserialize`

pub struct AsCanonicalBase64;
impl AsCanonicalBase64 {
    pub fn serialize<S, T>(x: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: CanonicalSerialize,
        S: Serializer,
    {
        let size = x.compressed_size();
        let mut bytes = Vec::with_capacity(size);
        x.serialize_compressed(&mut bytes)
            .map_err(serde::ser::Error::custom)?;
        Serialize::serialize(&to_base64(&bytes), serializer)
    }
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        T: CanonicalDeserialize,
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let y = from_base64(&s).map_err(serde::de::Error::custom)?;
        T::deserialize_compressed(y.as_slice()).map_err(serde::de::Error::custom)
    }
}

impl<T> SerializeAs<T> for AsCanonicalBase64
where
    T: CanonicalSerialize,
{
    fn serialize_as<S>(x: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Self::serialize(x, serializer)
    }
}
impl<'de, T> DeserializeAs<'de, T> for AsCanonicalBase64
where
    T: CanonicalDeserialize,
{
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::deserialize(deserializer)
    }
}
