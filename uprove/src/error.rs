use ark_serialize::SerializationError;
use ark_std::{boxed::Box, fmt::Debug, string::String};

#[derive(Debug)]
pub enum UProveError {
    /// A wire message or stored state is missing a field or has a malformed one
    InvalidSerialization(String),
    /// Group identifier is not in the registry of supported groups
    UnknownGroup(String),
    /// Issuer parameters use a different group than the one the caller is typed over
    IncompatibleGroup {
        expected: &'static str,
        found: String,
    },
    /// A session step was called before the step it depends on or after the session ended
    OutOfSequence(&'static str),
    InvalidEncodingPolicy(u8),
    InvalidAttribute(String),
    InvalidDisclosureRequest(String),
    InvalidCommitmentRequest(String),
    InvalidScope(String),
    /// Token at the given index of the batch failed validation
    InvalidTokenSignature(usize),
    ProofVerificationFailed,
    /// Expected, found
    LengthMismatch(usize, usize),
    TooManyAttributes(usize),
    /// The random source cannot produce the values needed, e.g. it only returns zero
    InvalidRandomSource(&'static str),
    /// A batch must have at least one token
    InvalidNumberOfTokens(usize),
    /// Failure while parsing the named message
    ParseError {
        what: &'static str,
        cause: Box<UProveError>,
    },
    Serialization(SerializationError),
}

impl UProveError {
    pub fn parse_error(what: &'static str, cause: UProveError) -> Self {
        Self::ParseError {
            what,
            cause: Box::new(cause),
        }
    }
}

impl From<SerializationError> for UProveError {
    fn from(e: SerializationError) -> Self {
        Self::Serialization(e)
    }
}
