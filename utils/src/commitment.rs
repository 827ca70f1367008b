use crate::serde_utils::ArkObjectBase64;
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// Pedersen commitment key `(g, h)`. A value `m` is committed as `g * m + h * r` and opened by revealing
/// `(m, r)`. Attribute commitments use the group generator as `g` and the first attribute base as `h`.
#[serde_as]
#[derive(
    Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct PedersenCommitmentKey<G: AffineRepr> {
    #[serde_as(as = "ArkObjectBase64")]
    pub g: G,
    #[serde_as(as = "ArkObjectBase64")]
    pub h: G,
}

impl<G: AffineRepr> PedersenCommitmentKey<G> {
    pub fn new(g: G, h: G) -> Self {
        Self { g, h }
    }

    pub fn commit(&self, message: &G::ScalarField, randomness: &G::ScalarField) -> G {
        self.commit_as_projective(message, randomness).into_affine()
    }

    /// Same as `commit` without normalizing, for when the commitment feeds further group operations
    pub fn commit_as_projective(
        &self,
        message: &G::ScalarField,
        randomness: &G::ScalarField,
    ) -> G::Group {
        self.g * message + self.h * randomness
    }
}
