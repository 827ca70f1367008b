use ark_std::rand::RngCore;
use uprove::{
    attribute::AttributeSet,
    issuance::{IssuerSession, Prover},
    issuer_params::IssuerParams,
    key_container::InMemoryPrivateKeyContainer,
    messages::{SerializedFirstMessage, SerializedSecondMessage, SerializedThirdMessage},
    prelude::UProveGroup,
    token::KeyAndToken,
};

pub const UIDP: &[u8] = b"http://issuer.example/uprove";
pub const SPEC: &[u8] = b"Sample spec";
pub const TOKEN_INFORMATION: &[u8] = b"token information field value";
pub const PROVER_INFORMATION: &[u8] = b"prover information field value";

/// Attribute set with `count` attributes of all kinds. Every fifth attribute is a string long enough
/// to be hashed.
pub fn sample_attributes(count: usize) -> AttributeSet {
    let mut attributes = AttributeSet::new();
    for i in 0..count {
        let name = format!("attribute{}", i + 1);
        match i % 5 {
            0 => attributes.add_string_attribute(name, format!("value {}", i)),
            1 => attributes.add_number_attribute(name, i as f64 * 1.5),
            2 => attributes.add_boolean_attribute(name, i % 2 == 0),
            3 => attributes.add_null_attribute(name),
            _ => attributes.add_string_attribute(
                name,
                "a string value that is definitely longer than thirty two characters",
            ),
        }
        .unwrap();
    }
    attributes
}

/// Issuer parameters with the encoding policy of `attributes` and the issuer's key
pub fn setup_issuer<G: UProveGroup, R: RngCore>(
    rng: &mut R,
    attributes: &AttributeSet,
) -> (IssuerParams<G>, InMemoryPrivateKeyContainer<G::ScalarField>) {
    IssuerParams::<G>::generate(
        rng,
        UIDP.to_vec(),
        attributes.encoding_policy(),
        SPEC.to_vec(),
    )
    .unwrap()
}

fn over_the_wire<T: serde::Serialize + serde::de::DeserializeOwned>(msg: &T) -> T {
    serde_json::from_str(&serde_json::to_string(msg).unwrap()).unwrap()
}

/// Run issuance of `num_tokens` tokens with every message passing through its JSON encoding
pub fn issue_tokens<G: UProveGroup, R: RngCore>(
    rng: &mut R,
    ip: &IssuerParams<G>,
    key: &InMemoryPrivateKeyContainer<G::ScalarField>,
    attributes: &[Vec<u8>],
    num_tokens: usize,
) -> Vec<KeyAndToken<G>> {
    let mut issuer = IssuerSession::new(
        rng,
        ip,
        key,
        num_tokens,
        attributes.to_vec(),
        TOKEN_INFORMATION.to_vec(),
    )
    .unwrap();
    let mut prover = Prover::new(ip);

    let fm: SerializedFirstMessage = over_the_wire(&issuer.get_first_message().unwrap());
    prover.receive_first_message(&fm).unwrap();
    let sm: SerializedSecondMessage = over_the_wire(
        &prover
            .generate_second_message(
                rng,
                num_tokens,
                attributes,
                TOKEN_INFORMATION,
                PROVER_INFORMATION,
                None,
                false,
            )
            .unwrap(),
    );
    issuer.receive_second_message(&sm).unwrap();
    let tm: SerializedThirdMessage = over_the_wire(&issuer.get_third_message().unwrap());
    prover.generate_tokens(&tm).unwrap()
}
