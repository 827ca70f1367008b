//! Issuer parameters: the public descriptor of an issuer. It fixes the group, the encoding policy of
//! each attribute, the bases `g_0..g_n, g_t` with the issuer public key `g_0 = g^y0`, and issuer
//! specific data `s`. All protocol messages are parsed against the issuer parameters they belong to.

use crate::{
    common::{
        element_from_wire, elements_from_wire, scalar_from_wire, scalars_from_wire,
        ENCODING_HASHED,
    },
    error::UProveError,
    group::{GroupFamily, UProveGroup, MAX_ATTRIBUTES},
    issuance::{FirstMessage, SecondMessage, ThirdMessage},
    key_container::InMemoryPrivateKeyContainer,
    messages::{
        SerializedFirstMessage, SerializedGroupDescription, SerializedIssuerParams,
        SerializedKeyAndToken, SerializedSecondMessage, SerializedThirdMessage,
        SerializedUProveToken,
    },
    rng::RandomNumberGenerator,
    token::{KeyAndToken, UProveToken},
};
use ark_ec::CurveGroup;
use ark_std::{format, string::ToString, vec::Vec};
use uprove_crypto_utils::{
    ec::elements_to_bytes,
    transcript::{UProveHash, DIGEST_SIZE},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuerParams<G: UProveGroup> {
    uidp: Vec<u8>,
    e: Vec<u8>,
    g: Vec<G>,
    s: Vec<u8>,
    /// `P`, computed once at creation
    digest: [u8; DIGEST_SIZE],
}

impl<G: UProveGroup> IssuerParams<G> {
    /// `g` must have `e.len() + 2` entries, `g_0` being the issuer public key and the last one `g_t`
    pub fn new(uidp: Vec<u8>, e: Vec<u8>, g: Vec<G>, s: Vec<u8>) -> Result<Self, UProveError> {
        if e.len() > MAX_ATTRIBUTES {
            return Err(UProveError::TooManyAttributes(e.len()));
        }
        if let Some(b) = e.iter().find(|b| **b > ENCODING_HASHED) {
            return Err(UProveError::InvalidEncodingPolicy(*b));
        }
        if g.len() != e.len() + 2 {
            return Err(UProveError::LengthMismatch(e.len() + 2, g.len()));
        }
        let digest = Self::compute_digest(&uidp, &e, &g, &s)?;
        Ok(Self {
            uidp,
            e,
            g,
            s,
            digest,
        })
    }

    /// Create issuer parameters over the recommended bases with a new private key `y0`. Returns the
    /// parameters and a container holding `y0`.
    pub fn generate<R: RandomNumberGenerator<G::ScalarField>>(
        rng: &mut R,
        uidp: Vec<u8>,
        e: Vec<u8>,
        s: Vec<u8>,
    ) -> Result<(Self, InMemoryPrivateKeyContainer<G::ScalarField>), UProveError> {
        let y0 = rng.random_nonzero_zq_element()?;
        let mut g = G::pregenerated_generators(e.len())?;
        g[0] = (G::generator() * y0).into_affine();
        Ok((Self::new(uidp, e, g, s)?, InMemoryPrivateKeyContainer::new(y0)))
    }

    /// `P = H(UID_p, group description, <g_0..g_n, g_t>, <e>, S)`
    fn compute_digest(
        uidp: &[u8],
        e: &[u8],
        g: &[G],
        s: &[u8],
    ) -> Result<[u8; DIGEST_SIZE], UProveError> {
        let mut hasher = UProveHash::new();
        hasher.update_bytes(uidp);
        G::update_hash(&mut hasher)?;
        hasher.update_list_of_elements(g)?;
        hasher.update_list_of_bytes(e);
        hasher.update_bytes(s);
        Ok(hasher.digest())
    }

    pub fn family(&self) -> GroupFamily {
        G::FAMILY
    }

    pub fn uidp(&self) -> &[u8] {
        &self.uidp
    }

    pub fn e(&self) -> &[u8] {
        &self.e
    }

    /// All bases `g_0, g_1, .., g_n, g_t`
    pub fn g(&self) -> &[G] {
        &self.g
    }

    pub fn s(&self) -> &[u8] {
        &self.s
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Number of attributes
    pub fn n(&self) -> usize {
        self.e.len()
    }

    /// Index of `g_t` in `g`
    pub fn t(&self) -> usize {
        self.n() + 1
    }

    /// Issuer public key
    pub fn g0(&self) -> &G {
        &self.g[0]
    }

    pub fn gt(&self) -> &G {
        &self.g[self.t()]
    }

    /// Group generator `g`
    pub fn generator(&self) -> G {
        G::generator()
    }

    /// Checks that the public key is not the identity and the other bases are the recommended ones
    pub fn is_valid(&self) -> bool {
        match G::pregenerated_generators(self.n()) {
            Ok(expected) => !self.g[0].is_zero() && expected[1..] == self.g[1..],
            Err(_) => false,
        }
    }

    pub fn to_serialized(&self) -> Result<SerializedIssuerParams, UProveError> {
        Ok(SerializedIssuerParams {
            uidp: self.uidp.clone(),
            desc_gq: SerializedGroupDescription {
                name: G::FAMILY.name().to_string(),
            },
            e: self.e.clone(),
            g: elements_to_bytes(&self.g)?,
            s: self.s.clone(),
        })
    }

    /// Parse issuer parameters. The group must be the one `G` belongs to. Only `g_0` is read from the
    /// wire, the other bases are the recommended ones for the group.
    pub fn parse(ser: &SerializedIssuerParams) -> Result<Self, UProveError> {
        let family = GroupFamily::from_name(&ser.desc_gq.name)?;
        if family != G::FAMILY {
            return Err(UProveError::IncompatibleGroup {
                expected: G::FAMILY.name(),
                found: ser.desc_gq.name.clone(),
            });
        }
        if ser.g.len() != ser.e.len() + 2 {
            return Err(UProveError::InvalidSerialization(format!(
                "expected {} bases for {} attributes but found {}",
                ser.e.len() + 2,
                ser.e.len(),
                ser.g.len()
            )));
        }
        let g0 = element_from_wire::<G>(&ser.g[0], "g0")?;
        if g0.is_zero() {
            return Err(UProveError::InvalidSerialization(
                "issuer public key is the identity".to_string(),
            ));
        }
        let mut g = G::pregenerated_generators(ser.e.len())?;
        g[0] = g0;
        Self::new(ser.uidp.clone(), ser.e.clone(), g, ser.s.clone())
    }

    pub fn parse_first_message(
        &self,
        ser: &SerializedFirstMessage,
    ) -> Result<FirstMessage<G>, UProveError> {
        let parse = || {
            if ser.sa.len() != ser.sb.len() {
                return Err(UProveError::InvalidSerialization(format!(
                    "sa has {} entries but sb has {}",
                    ser.sa.len(),
                    ser.sb.len()
                )));
            }
            Ok(FirstMessage {
                sz: element_from_wire(&ser.sz, "sz")?,
                sa: elements_from_wire(&ser.sa, "sa")?,
                sb: elements_from_wire(&ser.sb, "sb")?,
            })
        };
        parse().map_err(|e| UProveError::parse_error("first message", e))
    }

    pub fn parse_second_message(
        &self,
        ser: &SerializedSecondMessage,
    ) -> Result<SecondMessage<G::ScalarField>, UProveError> {
        scalars_from_wire(&ser.sc, "sc")
            .map(|sc| SecondMessage { sc })
            .map_err(|e| UProveError::parse_error("second message", e))
    }

    pub fn parse_third_message(
        &self,
        ser: &SerializedThirdMessage,
    ) -> Result<ThirdMessage<G::ScalarField>, UProveError> {
        scalars_from_wire(&ser.sr, "sr")
            .map(|sr| ThirdMessage { sr })
            .map_err(|e| UProveError::parse_error("third message", e))
    }

    pub fn parse_token(&self, ser: &SerializedUProveToken) -> Result<UProveToken<G>, UProveError> {
        let parse = || {
            if ser.uidp != self.uidp {
                return Err(UProveError::InvalidSerialization(
                    "token was issued under different issuer parameters".to_string(),
                ));
            }
            Ok(UProveToken {
                uidp: ser.uidp.clone(),
                h: element_from_wire(&ser.h, "h")?,
                ti: ser.ti.clone(),
                pi: ser.pi.clone(),
                szp: element_from_wire(&ser.szp, "szp")?,
                scp: scalar_from_wire(&ser.scp, "scp")?,
                srp: scalar_from_wire(&ser.srp, "srp")?,
                is_device_protected: false,
            })
        };
        parse().map_err(|e| UProveError::parse_error("token", e))
    }

    pub fn parse_key_and_token(
        &self,
        ser: &SerializedKeyAndToken,
    ) -> Result<KeyAndToken<G>, UProveError> {
        let token = self.parse_token(&ser.token)?;
        let key = scalar_from_wire(&ser.key, "key")
            .map_err(|e| UProveError::parse_error("token key", e))?;
        Ok(KeyAndToken { token, key })
    }
}

/// Issuer parameters over any supported group, for when the group is only known after reading the
/// serialized parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyIssuerParams {
    P256(IssuerParams<ark_secp256r1::Affine>),
    Curve25519(IssuerParams<ark_curve25519::EdwardsAffine>),
}

impl AnyIssuerParams {
    pub fn parse(ser: &SerializedIssuerParams) -> Result<Self, UProveError> {
        Ok(match GroupFamily::from_name(&ser.desc_gq.name)? {
            GroupFamily::P256 => Self::P256(IssuerParams::parse(ser)?),
            GroupFamily::Curve25519 => Self::Curve25519(IssuerParams::parse(ser)?),
        })
    }

    pub fn family(&self) -> GroupFamily {
        match self {
            Self::P256(_) => GroupFamily::P256,
            Self::Curve25519(_) => GroupFamily::Curve25519,
        }
    }

    pub fn digest(&self) -> &[u8] {
        match self {
            Self::P256(ip) => ip.digest(),
            Self::Curve25519(ip) => ip.digest(),
        }
    }

    pub fn to_serialized(&self) -> Result<SerializedIssuerParams, UProveError> {
        match self {
            Self::P256(ip) => ip.to_serialized(),
            Self::Curve25519(ip) => ip.to_serialized(),
        }
    }
}
