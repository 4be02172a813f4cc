use crate::zcl::DataType;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum BridgeError {
    #[error("Failed to decode data point {dp_id}: {source}")]
    TransformDecode {
        dp_id: u8,
        #[source]
        source: TransformError,
    },

    #[error("Attribute {cluster}.{attribute} is not available on endpoint {endpoint_id}")]
    TargetAttributeUnresolved {
        endpoint_id: u8,
        cluster: String,
        attribute: String,
    },

    #[error("Value {value} is out of range for {cluster}.{attribute}")]
    ValueOutOfRange {
        cluster: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("{cluster}.{attribute} cannot hold this value, expected {expected}")]
    TypeMismatch {
        cluster: &'static str,
        attribute: &'static str,
        expected: DataType,
    },

    #[error("Data point {0} is mapped more than once")]
    DuplicateDataPoint(u8),

    #[error("Invalid device profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown device profile: {0}")]
    UnknownProfile(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

/// Failure of a value transform to interpret a raw data point.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("{transform} cannot decode a {kind} data point")]
    UnexpectedKind {
        transform: &'static str,
        kind: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, BridgeError>;
