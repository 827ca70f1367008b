//! Common code shared by the U-Prove crates.
//!
//! - [`transcript`]: the length-prefixed SHA-256 accumulator from which every digest and challenge is derived
//! - [`hashing_utils`]: hashing to group elements (verifiably random elements)
//! - [`ec`] and [`ff`]: canonical byte encodings of group elements and scalars
//! - [`serde_utils`]: serde adapters for base64 wire fields and arkworks objects
//! - [`elgamal`]: Elgamal encryption in the exponent used by the ID escrow
//! - [`commitment`]: Pedersen commitments used for committed attributes

#[macro_use]
pub mod macros;
#[macro_use]
pub mod serde_utils;
pub mod commitment;
pub mod ec;
pub mod elgamal;
pub mod ff;
pub mod hashing_utils;
pub mod transcript;
