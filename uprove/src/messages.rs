//! Wire format of everything the parties exchange or persist. Byte strings, group elements and scalars
//! are base64 text. Group elements are in their compressed encoding and scalars in fixed width
//! big-endian. Field names match the JSON the messages travel as.

use ark_std::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use uprove_crypto_utils::serde_utils::Base64Bytes;

/// Issuer to prover, `sigma_z` and `sigma_a`, `sigma_b` for each token of the batch
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedFirstMessage {
    #[serde_as(as = "Base64Bytes")]
    pub sz: Vec<u8>,
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub sa: Vec<Vec<u8>>,
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub sb: Vec<Vec<u8>>,
}

/// Prover to issuer, blinded challenge `sigma_c` for each token
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedSecondMessage {
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub sc: Vec<Vec<u8>>,
}

/// Issuer to prover, response `sigma_r` for each token
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedThirdMessage {
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub sr: Vec<Vec<u8>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedGroupDescription {
    pub name: String,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedIssuerParams {
    #[serde_as(as = "Base64Bytes")]
    pub uidp: Vec<u8>,
    #[serde(rename = "descGq")]
    pub desc_gq: SerializedGroupDescription,
    /// One encoding policy byte per attribute
    #[serde_as(as = "Base64Bytes")]
    pub e: Vec<u8>,
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub g: Vec<Vec<u8>>,
    #[serde_as(as = "Base64Bytes")]
    pub s: Vec<u8>,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedUProveToken {
    #[serde_as(as = "Base64Bytes")]
    pub uidp: Vec<u8>,
    #[serde_as(as = "Base64Bytes")]
    pub h: Vec<u8>,
    #[serde_as(as = "Base64Bytes")]
    pub ti: Vec<u8>,
    #[serde_as(as = "Base64Bytes")]
    pub pi: Vec<u8>,
    #[serde_as(as = "Base64Bytes")]
    pub szp: Vec<u8>,
    #[serde_as(as = "Base64Bytes")]
    pub scp: Vec<u8>,
    #[serde_as(as = "Base64Bytes")]
    pub srp: Vec<u8>,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedKeyAndToken {
    pub token: SerializedUProveToken,
    /// Token private key `alpha^-1`
    #[serde_as(as = "Base64Bytes")]
    pub key: Vec<u8>,
}

/// Presentation proof. `D` holds the encoded values of the disclosed attributes, `r` the responses for
/// the token key and each undisclosed attribute. The scope fields `ap`, `Ps` are present only for
/// pseudonymous presentations and the commitment fields `tc`, `ta`, `tr` only when some attribute is
/// committed.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedProof {
    #[serde(rename = "D")]
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub disclosed: Vec<Vec<u8>>,
    #[serde_as(as = "Base64Bytes")]
    pub a: Vec<u8>,
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub r: Vec<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde_as(as = "Option<Base64Bytes>")]
    pub ap: Option<Vec<u8>>,
    #[serde(rename = "Ps", default, skip_serializing_if = "Option::is_none")]
    #[serde_as(as = "Option<Base64Bytes>")]
    pub ps: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde_as(as = "Option<Vec<Base64Bytes>>")]
    pub tc: Option<Vec<Vec<u8>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde_as(as = "Option<Vec<Base64Bytes>>")]
    pub ta: Option<Vec<Vec<u8>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde_as(as = "Option<Vec<Base64Bytes>>")]
    pub tr: Option<Vec<Vec<u8>>>,
}

/// Prover state between sending the second message and receiving the third, one entry per token
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceState {
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub h: Vec<Vec<u8>>,
    #[serde(rename = "alphaInverse")]
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub alpha_inverse: Vec<Vec<u8>>,
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub beta2: Vec<Vec<u8>>,
    #[serde(rename = "sigmaZPrime")]
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub sigma_z_prime: Vec<Vec<u8>>,
    #[serde(rename = "sigmaCPrime")]
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub sigma_c_prime: Vec<Vec<u8>>,
    #[serde(
        rename = "tokenValidationValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    #[serde_as(as = "Option<Vec<Base64Bytes>>")]
    pub token_validation_value: Option<Vec<Vec<u8>>>,
}

/// Issuer session without its secrets. The `w` values are exported separately with
/// `IssuerSession::serialize_w` and the private key stays in its container.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedIssuerSession {
    pub ip: SerializedIssuerParams,
    #[serde_as(as = "Base64Bytes")]
    pub ti: Vec<u8>,
    #[serde_as(as = "Vec<Base64Bytes>")]
    pub attributes: Vec<Vec<u8>>,
    #[serde(rename = "numTokens")]
    pub num_tokens: usize,
    #[serde(rename = "firstMessage", default, skip_serializing_if = "Option::is_none")]
    pub first_message: Option<SerializedFirstMessage>,
    #[serde(rename = "secondMessage", default, skip_serializing_if = "Option::is_none")]
    pub second_message: Option<SerializedSecondMessage>,
    #[serde(rename = "thirdMessage", default, skip_serializing_if = "Option::is_none")]
    pub third_message: Option<SerializedThirdMessage>,
}
