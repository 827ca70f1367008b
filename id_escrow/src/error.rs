use ark_serialize::SerializationError;
use uprove::error::UProveError;

#[derive(Debug)]
pub enum IdEscrowError {
    /// Index is not one of the issuer parameters' attributes or was not committed
    InvalidAttributeIndex(usize),
    ProofVerificationFailed,
    InvalidSerialization(String),
    UProve(UProveError),
    Serialization(SerializationError),
}

impl From<UProveError> for IdEscrowError {
    fn from(e: UProveError) -> Self {
        Self::UProve(e)
    }
}

impl From<SerializationError> for IdEscrowError {
    fn from(e: SerializationError) -> Self {
        Self::Serialization(e)
    }
}
