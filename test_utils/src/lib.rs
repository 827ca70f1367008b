//! Fixtures shared by the integration tests and benchmarks of the U-Prove crates

pub type P256 = ark_secp256r1::Affine;
pub type Curve25519 = ark_curve25519::EdwardsAffine;

pub mod issuance;
#[macro_use]
pub mod serialization;
