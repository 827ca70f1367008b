use crate::{
    auditor::AuditorParams,
    encryption::{attribute_commitment_key, generate_escrow_challenge, IdEscrowProof},
    error::IdEscrowError,
};
use ark_ec::CurveGroup;
use uprove::{common::TokenId, group::UProveGroup, issuer_params::IssuerParams};
use uprove_crypto_utils::elgamal::Ciphertext;

/// Checks escrow proofs for an auditor under issuer parameters
pub struct IdEscrowVerifier<'a, G: UProveGroup> {
    ip: &'a IssuerParams<G>,
    auditor_params: &'a AuditorParams<G>,
}

impl<'a, G: UProveGroup> IdEscrowVerifier<'a, G> {
    pub fn new(ip: &'a IssuerParams<G>, auditor_params: &'a AuditorParams<G>) -> Self {
        Self { ip, auditor_params }
    }

    /// Verify that `proof` encrypts the value committed in `commitment`, the commitment of a
    /// presentation proof of the token with id `token_id`
    pub fn verify(
        &self,
        proof: &IdEscrowProof<G>,
        token_id: &TokenId,
        commitment: &G,
    ) -> Result<bool, IdEscrowError> {
        let comm_key = attribute_commitment_key(self.ip)?;
        let g = self.ip.generator();
        let c = proof.c;

        // C_b'' = C_b^c * g^rXb * g_1^rOb
        let commitment_prime =
            (*commitment * c + comm_key.commit_as_projective(&proof.r_xb, &proof.r_ob)).into_affine();
        // E1'' = E1^c * g^rR, E2'' = E2^c * H^rR * g^rXb
        let blinded =
            Ciphertext::new_with_randomness(&proof.r_xb, &proof.r_r, &self.auditor_params.h, &g);
        let ciphertext_prime = Ciphertext {
            enc1: (proof.ciphertext.enc1 * c + blinded.enc1).into_affine(),
            enc2: (proof.ciphertext.enc2 * c + blinded.enc2).into_affine(),
        };

        let expected = generate_escrow_challenge(
            self.ip.uidp(),
            token_id,
            self.auditor_params,
            commitment,
            &proof.ciphertext,
            &commitment_prime,
            &ciphertext_prime,
            &proof.info,
        )?;
        Ok(expected == c)
    }

    /// Like [`Self::verify`] but an invalid proof is an error
    pub fn ensure_valid(
        &self,
        proof: &IdEscrowProof<G>,
        token_id: &TokenId,
        commitment: &G,
    ) -> Result<(), IdEscrowError> {
        if self.verify(proof, token_id, commitment)? {
            Ok(())
        } else {
            Err(IdEscrowError::ProofVerificationFailed)
        }
    }
}
