use crate::{encryption::IdEscrowProof, error::IdEscrowError};
use ark_ec::AffineRepr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::string::ToString;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use uprove::{
    group::UProveGroup, issuer_params::IssuerParams, key_container::PrivateKeyContainer,
    rng::RandomNumberGenerator,
};
use uprove_crypto_utils::{
    elgamal::{PublicKey, SecretKey},
    ff::scalar_from_bytes,
    serde_utils::ArkObjectBase64,
};
use zeroize::Zeroize;

/// Auditor public key `H = g^x` under the group generator `g`
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct AuditorParams<G: AffineRepr> {
    #[serde(rename = "H")]
    #[serde_as(as = "ArkObjectBase64")]
    pub h: G,
}

/// Holder of the escrow decryption key
pub struct Auditor<G: AffineRepr> {
    secret_key: SecretKey<G::ScalarField>,
    params: AuditorParams<G>,
}

impl<G: UProveGroup> Auditor<G> {
    /// Auditor with a fresh non-zero key
    pub fn generate<R: RandomNumberGenerator<G::ScalarField>>(
        rng: &mut R,
        ip: &IssuerParams<G>,
    ) -> Result<Self, IdEscrowError> {
        let secret_key = SecretKey(rng.random_nonzero_zq_element()?);
        Ok(Self::from_secret_key(ip, secret_key))
    }

    /// Auditor with the key `x` held by `key_container`
    pub fn new<K: PrivateKeyContainer>(
        ip: &IssuerParams<G>,
        key_container: &K,
    ) -> Result<Self, IdEscrowError> {
        let mut bytes = key_container.private_key_bytes();
        let x = scalar_from_bytes(&bytes);
        bytes.zeroize();
        let x = x.ok_or_else(|| {
            IdEscrowError::InvalidSerialization(
                "auditor private key is not a canonical scalar encoding".to_string(),
            )
        })?;
        Ok(Self::from_secret_key(ip, SecretKey(x)))
    }

    fn from_secret_key(ip: &IssuerParams<G>, secret_key: SecretKey<G::ScalarField>) -> Self {
        let public_key = PublicKey::new(&secret_key, &ip.generator());
        Self {
            secret_key,
            params: AuditorParams { h: public_key.0 },
        }
    }

    pub fn params(&self) -> &AuditorParams<G> {
        &self.params
    }

    /// Returns `g^x_b` for the escrowed attribute `x_b`. Recovering `x_b` needs a lookup of the
    /// candidate attribute values. The proof is not checked, use [`crate::verifier::IdEscrowVerifier`]
    /// first.
    pub fn decrypt(&self, proof: &IdEscrowProof<G>) -> G {
        proof.ciphertext.decrypt(&self.secret_key.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::CurveGroup;
    use ark_ff::Zero;
    use ark_secp256r1::{Affine, Fr};
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };
    use uprove::{
        error::UProveError, key_container::InMemoryPrivateKeyContainer, rng::TestVectorRng,
    };
    use uprove_crypto_utils::elgamal::Ciphertext;

    #[test]
    fn key_and_decryption() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let (ip, _) =
            IssuerParams::<Affine>::generate(&mut rng, b"uidp".to_vec(), vec![0, 0], vec![])
                .unwrap();
        let x = Fr::rand(&mut rng);
        let auditor = Auditor::new(&ip, &InMemoryPrivateKeyContainer::new(x)).unwrap();
        assert_eq!(auditor.params().h, (Affine::generator() * x).into_affine());

        let m = Fr::rand(&mut rng);
        let r = Fr::rand(&mut rng);
        let proof = IdEscrowProof {
            ciphertext: Ciphertext::new_with_randomness(
                &m,
                &r,
                &auditor.params().h,
                &Affine::generator(),
            ),
            info: vec![],
            c: Fr::from(0u64),
            r_xb: Fr::from(0u64),
            r_r: Fr::from(0u64),
            r_ob: Fr::from(0u64),
        };
        assert_eq!(
            auditor.decrypt(&proof),
            (Affine::generator() * m).into_affine()
        );
        let other = Auditor::generate(&mut rng, &ip).unwrap();
        assert_ne!(other.decrypt(&proof), auditor.decrypt(&proof));

        let json = serde_json::to_value(auditor.params()).unwrap();
        assert!(json.get("H").is_some());
        let params: AuditorParams<Affine> = serde_json::from_value(json).unwrap();
        assert_eq!(&params, auditor.params());
    }

    #[test]
    fn key_sources() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let (ip, _) =
            IssuerParams::<Affine>::generate(&mut rng, b"uidp".to_vec(), vec![0], vec![]).unwrap();

        let mut zeros = TestVectorRng::new(vec![Fr::zero(); 4]).unwrap();
        assert!(matches!(
            Auditor::generate(&mut zeros, &ip),
            Err(IdEscrowError::UProve(UProveError::InvalidRandomSource(_)))
        ));

        let mut values = TestVectorRng::new(vec![Fr::zero(), Fr::from(5u64)]).unwrap();
        let auditor = Auditor::generate(&mut values, &ip).unwrap();
        let stored =
            Auditor::new(&ip, &InMemoryPrivateKeyContainer::new(Fr::from(5u64))).unwrap();
        assert_eq!(auditor.params(), stored.params());

        struct Unreduced;
        impl PrivateKeyContainer for Unreduced {
            fn private_key_bytes(&self) -> Vec<u8> {
                vec![0xff; 32]
            }
        }
        assert!(matches!(
            Auditor::new(&ip, &Unreduced),
            Err(IdEscrowError::InvalidSerialization(_))
        ));
    }
}
