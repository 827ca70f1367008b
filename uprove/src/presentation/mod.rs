//! Presentation of a token: a proof of knowledge of the token private key and of the undisclosed
//! attributes, optionally with Pedersen commitments to some undisclosed attributes and a scope
//! pseudonym derived from one of them.

pub mod prover;
pub mod verifier;

pub use prover::{compute_pseudonym, generate_proof, CommitmentSecrets};
pub use verifier::Verifier;

use crate::{
    common::{scalars_to_wire, sorted_indices},
    error::UProveError,
    group::UProveGroup,
    messages::SerializedProof,
};
use ark_ec::AffineRepr;
use ark_std::{format, string::ToString, vec::Vec};
use uprove_crypto_utils::{
    ec::{element_to_bytes, elements_to_bytes},
    transcript::DIGEST_SIZE,
};

/// Scope of a pseudonym. The pseudonym of attribute `p` is `gs^x_p` where `gs` is given directly or
/// derived from the scope string `s`. When both are set `gs` is used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeData<G: AffineRepr> {
    pub p: usize,
    pub s: Option<Vec<u8>>,
    pub gs: Option<G>,
}

impl<G: UProveGroup> ScopeData<G> {
    pub fn new(p: usize, s: Vec<u8>) -> Self {
        Self {
            p,
            s: Some(s),
            gs: None,
        }
    }

    pub fn with_element(p: usize, gs: G) -> Self {
        Self { p, s: None, gs: Some(gs) }
    }

    pub fn scope_element(&self) -> Result<G, UProveError> {
        match (&self.gs, &self.s) {
            (Some(gs), _) => Ok(*gs),
            (None, Some(s)) => Ok(G::scope_element(s)),
            (None, None) => Err(UProveError::InvalidScope(
                "scope needs either a scope string or a scope element".to_string(),
            )),
        }
    }
}

/// What a presentation is about, shared by the prover and the verifier. `disclosed` and `committed` are
/// 1-based attribute indices, `message` is bound into the proof and `device_message` is the optional
/// message bound in the outer challenge hash.
#[derive(Clone, Copy, Debug)]
pub struct PresentationRequest<'a, G: AffineRepr> {
    pub disclosed: &'a [usize],
    pub committed: &'a [usize],
    pub message: &'a [u8],
    pub device_message: Option<&'a [u8]>,
    pub scope: Option<&'a ScopeData<G>>,
}

impl<'a, G: AffineRepr> PresentationRequest<'a, G> {
    pub fn new(disclosed: &'a [usize], message: &'a [u8]) -> Self {
        Self {
            disclosed,
            committed: &[],
            message,
            device_message: None,
            scope: None,
        }
    }

    pub fn with_committed(mut self, committed: &'a [usize]) -> Self {
        self.committed = committed;
        self
    }

    pub fn with_device_message(mut self, device_message: &'a [u8]) -> Self {
        self.device_message = Some(device_message);
        self
    }

    pub fn with_scope(mut self, scope: &'a ScopeData<G>) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Returns the sorted disclosed and committed indices after checking them against `n` attributes
    pub(crate) fn sorted_indices(&self, n: usize) -> Result<(Vec<usize>, Vec<usize>), UProveError> {
        let disclosed = sorted_indices(self.disclosed, n, "disclosed")?;
        let committed = sorted_indices(self.committed, n, "committed").map_err(|e| match e {
            UProveError::InvalidDisclosureRequest(m) => UProveError::InvalidCommitmentRequest(m),
            e => e,
        })?;
        if let Some(i) = committed.iter().find(|i| disclosed.binary_search(i).is_ok()) {
            return Err(UProveError::InvalidDisclosureRequest(format!(
                "attribute {} cannot be both disclosed and committed",
                i
            )));
        }
        if let Some(scope) = self.scope {
            if scope.p == 0 || scope.p > n {
                return Err(UProveError::InvalidScope(format!(
                    "pseudonym index {} is outside 1..={}",
                    scope.p, n
                )));
            }
            if disclosed.binary_search(&scope.p).is_ok() {
                return Err(UProveError::InvalidDisclosureRequest(format!(
                    "pseudonym attribute {} cannot be disclosed",
                    scope.p
                )));
            }
            if scope.s.is_none() && scope.gs.is_none() {
                return Err(UProveError::InvalidScope(
                    "scope needs either a scope string or a scope element".to_string(),
                ));
            }
        }
        Ok((disclosed, committed))
    }
}

/// Presentation proof. `disclosed` holds the encoded disclosed attributes in increasing index order and
/// `r` the responses for the token key followed by the undisclosed attributes in increasing index order.
/// `tc`, `ta` and `tr` have one entry per committed attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof<G: AffineRepr> {
    pub disclosed: Vec<Vec<u8>>,
    pub a: [u8; DIGEST_SIZE],
    pub r: Vec<G::ScalarField>,
    pub ap: Option<[u8; DIGEST_SIZE]>,
    pub ps: Option<G>,
    /// Commitments `g^x_i * g_1^o_i`
    pub tc: Vec<G>,
    pub ta: Vec<[u8; DIGEST_SIZE]>,
    pub tr: Vec<G::ScalarField>,
}

impl<G: AffineRepr> Proof<G> {
    pub fn to_serialized(&self) -> Result<SerializedProof, UProveError> {
        let committed = !self.tc.is_empty();
        Ok(SerializedProof {
            disclosed: self.disclosed.clone(),
            a: self.a.to_vec(),
            r: scalars_to_wire(&self.r),
            ap: self.ap.map(|ap| ap.to_vec()),
            ps: self.ps.as_ref().map(element_to_bytes).transpose()?,
            tc: if committed {
                Some(elements_to_bytes(&self.tc)?)
            } else {
                None
            },
            ta: committed.then(|| self.ta.iter().map(|t| t.to_vec()).collect()),
            tr: committed.then(|| scalars_to_wire(&self.tr)),
        })
    }
}
