use crate::{auditor::AuditorParams, error::IdEscrowError};
use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{end_timer, start_timer, vec::Vec};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use uprove::{
    common::{compute_token_id, compute_x, TokenId},
    group::UProveGroup,
    issuer_params::IssuerParams,
    presentation::{CommitmentSecrets, Proof},
    rng::RandomNumberGenerator,
    token::UProveToken,
};
use uprove_crypto_utils::{
    commitment::PedersenCommitmentKey,
    ec::{element_from_bytes, element_to_bytes},
    elgamal::Ciphertext,
    ff::{scalar_from_bytes, scalar_to_bytes},
    serde_utils::Base64Bytes,
    transcript::UProveHash,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An attribute committed to in a presentation proof, with the opening of the commitment
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct CommittedAttribute<G: AffineRepr> {
    /// 1-based index of the attribute
    #[zeroize(skip)]
    pub index: usize,
    /// Encoded attribute value
    pub attribute: Vec<u8>,
    /// `g^x_b * g_1^o_b`
    #[zeroize(skip)]
    pub commitment: G,
    pub opening: G::ScalarField,
}

impl<G: AffineRepr> CommittedAttribute<G> {
    /// Picks the commitment to attribute `index` out of a presentation proof made with the committed
    /// indices `committed` and the secrets returned with the proof
    pub fn from_presentation(
        proof: &Proof<G>,
        secrets: &CommitmentSecrets<G::ScalarField>,
        committed: &[usize],
        index: usize,
        attribute: &[u8],
    ) -> Result<Self, IdEscrowError> {
        let mut sorted = committed.to_vec();
        sorted.sort_unstable();
        let pos = sorted
            .binary_search(&index)
            .map_err(|_| IdEscrowError::InvalidAttributeIndex(index))?;
        match (proof.tc.get(pos), secrets.tilde_o.get(pos)) {
            (Some(commitment), Some(opening)) => Ok(Self {
                index,
                attribute: attribute.to_vec(),
                commitment: *commitment,
                opening: *opening,
            }),
            _ => Err(IdEscrowError::InvalidAttributeIndex(index)),
        }
    }
}

/// Encryption `(E1, E2) = (g^r, g^x_b * H^r)` of a committed attribute with a proof that it encrypts
/// the committed value. `info` is bound into the proof.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct IdEscrowProof<G: AffineRepr> {
    pub ciphertext: Ciphertext<G>,
    pub info: Vec<u8>,
    pub c: G::ScalarField,
    pub r_xb: G::ScalarField,
    pub r_r: G::ScalarField,
    pub r_ob: G::ScalarField,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedEscrowResponses {
    #[serde_as(as = "Base64Bytes")]
    pub c: Vec<u8>,
    #[serde(rename = "rXb")]
    #[serde_as(as = "Base64Bytes")]
    pub r_xb: Vec<u8>,
    #[serde(rename = "rR")]
    #[serde_as(as = "Base64Bytes")]
    pub r_r: Vec<u8>,
    #[serde(rename = "rOb")]
    #[serde_as(as = "Base64Bytes")]
    pub r_ob: Vec<u8>,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedIdEscrowProof {
    #[serde(rename = "E1")]
    #[serde_as(as = "Base64Bytes")]
    pub e1: Vec<u8>,
    #[serde(rename = "E2")]
    #[serde_as(as = "Base64Bytes")]
    pub e2: Vec<u8>,
    #[serde_as(as = "Base64Bytes")]
    pub info: Vec<u8>,
    pub ieproof: SerializedEscrowResponses,
}

impl<G: AffineRepr> IdEscrowProof<G> {
    pub fn to_serialized(&self) -> Result<SerializedIdEscrowProof, IdEscrowError> {
        Ok(SerializedIdEscrowProof {
            e1: element_to_bytes(&self.ciphertext.enc1)?,
            e2: element_to_bytes(&self.ciphertext.enc2)?,
            info: self.info.clone(),
            ieproof: SerializedEscrowResponses {
                c: scalar_to_bytes(&self.c),
                r_xb: scalar_to_bytes(&self.r_xb),
                r_r: scalar_to_bytes(&self.r_r),
                r_ob: scalar_to_bytes(&self.r_ob),
            },
        })
    }

    pub fn parse(ser: &SerializedIdEscrowProof) -> Result<Self, IdEscrowError> {
        let element = |bytes: &[u8], what: &str| {
            element_from_bytes::<G>(bytes).map_err(|e| {
                IdEscrowError::InvalidSerialization(format!(
                    "{} is not a valid group element: {:?}",
                    what, e
                ))
            })
        };
        let scalar = |bytes: &[u8], what: &str| {
            scalar_from_bytes::<G::ScalarField>(bytes).ok_or_else(|| {
                IdEscrowError::InvalidSerialization(format!(
                    "{} is not a canonical scalar encoding",
                    what
                ))
            })
        };
        Ok(Self {
            ciphertext: Ciphertext {
                enc1: element(&ser.e1, "E1")?,
                enc2: element(&ser.e2, "E2")?,
            },
            info: ser.info.clone(),
            c: scalar(&ser.ieproof.c, "c")?,
            r_xb: scalar(&ser.ieproof.r_xb, "rXb")?,
            r_r: scalar(&ser.ieproof.r_r, "rR")?,
            r_ob: scalar(&ser.ieproof.r_ob, "rOb")?,
        })
    }
}

/// Pedersen commitment key `(g, g_1)` under which attributes are committed in presentation proofs
pub(crate) fn attribute_commitment_key<G: UProveGroup>(
    ip: &IssuerParams<G>,
) -> Result<PedersenCommitmentKey<G>, IdEscrowError> {
    match ip.g().get(1) {
        Some(g1) => Ok(PedersenCommitmentKey::new(ip.generator(), *g1)),
        None => Err(IdEscrowError::InvalidAttributeIndex(1)),
    }
}

/// `c = H(UID_p, UID_t, H, C_b, E1, E2, C_b', E1', E2', info)`
pub(crate) fn generate_escrow_challenge<G: AffineRepr>(
    uidp: &[u8],
    token_id: &TokenId,
    auditor_params: &AuditorParams<G>,
    commitment: &G,
    ciphertext: &Ciphertext<G>,
    commitment_prime: &G,
    ciphertext_prime: &Ciphertext<G>,
    info: &[u8],
) -> Result<G::ScalarField, IdEscrowError> {
    let mut hasher = UProveHash::new();
    hasher.update_bytes(uidp);
    hasher.update_bytes(token_id);
    hasher.update_element(&auditor_params.h)?;
    hasher.update_element(commitment)?;
    hasher.update_element(&ciphertext.enc1)?;
    hasher.update_element(&ciphertext.enc2)?;
    hasher.update_element(commitment_prime)?;
    hasher.update_element(&ciphertext_prime.enc1)?;
    hasher.update_element(&ciphertext_prime.enc2)?;
    hasher.update_bytes(info);
    Ok(hasher.digest_to_scalar())
}

/// `-c * secret + blinding`
fn response<F: PrimeField>(c: &F, secret: &F, blinding: &F) -> F {
    -*c * secret + blinding
}

/// Encrypt the committed attribute to the auditor and prove that the ciphertext and the commitment
/// hide the same value. Randomness is drawn in the order `r, x_b', o_b', r'`.
pub fn verifiable_encrypt<G: UProveGroup, R: RandomNumberGenerator<G::ScalarField>>(
    rng: &mut R,
    ip: &IssuerParams<G>,
    auditor_params: &AuditorParams<G>,
    token: &UProveToken<G>,
    committed: &CommittedAttribute<G>,
    info: &[u8],
) -> Result<IdEscrowProof<G>, IdEscrowError> {
    if committed.index == 0 || committed.index > ip.n() {
        return Err(IdEscrowError::InvalidAttributeIndex(committed.index));
    }
    let timer = start_timer!(|| "Verifiable encryption");
    let comm_key = attribute_commitment_key(ip)?;
    let g = ip.generator();
    let mut x_b = compute_x::<G::ScalarField>(
        Some(committed.attribute.as_slice()),
        ip.e()[committed.index - 1],
    )?;

    let mut r = rng.random_zq_element();
    let ciphertext = Ciphertext::new_with_randomness(&x_b, &r, &auditor_params.h, &g);

    let mut x_b_prime = rng.random_zq_element();
    let mut o_b_prime = rng.random_zq_element();
    let commitment_prime = comm_key.commit(&x_b_prime, &o_b_prime);
    let mut r_prime = rng.random_zq_element();
    let ciphertext_prime =
        Ciphertext::new_with_randomness(&x_b_prime, &r_prime, &auditor_params.h, &g);

    let c = generate_escrow_challenge(
        ip.uidp(),
        &compute_token_id(token)?,
        auditor_params,
        &committed.commitment,
        &ciphertext,
        &commitment_prime,
        &ciphertext_prime,
        info,
    )?;
    let proof = IdEscrowProof {
        ciphertext,
        info: info.to_vec(),
        c,
        r_xb: response(&c, &x_b, &x_b_prime),
        r_r: response(&c, &r, &r_prime),
        r_ob: response(&c, &committed.opening, &o_b_prime),
    };
    x_b.zeroize();
    r.zeroize();
    x_b_prime.zeroize();
    o_b_prime.zeroize();
    r_prime.zeroize();
    end_timer!(timer);
    Ok(proof)
}
