//! Error types for wire-format serialization and schema resolution.
//!
//! Four classes of failure, all reported synchronously to the caller:
//! malformed wire format (decode path), invalid configuration
//! (construction path), registry failures (resolution path, propagated
//! verbatim) and payload codec failures from prost.

use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::registry::RegistryError;
pub use crate::wire::WireFormatError;

/// Top-level error type for serializer and deserializer operations.
#[derive(Debug, Error)]
pub enum SerdeError {
    /// The byte buffer is not in Confluent Schema Registry wire format.
    /// Fatal to the decode call; the message should be rejected, not
    /// retried.
    #[error("invalid wire format: {0}")]
    Format(#[from] WireFormatError),

    /// Construction-time configuration failure. No partially configured
    /// serializer is ever returned.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Schema registry lookup or registration failure, propagated
    /// unchanged. Retry policy belongs to the caller; dependency
    /// registration is idempotent registry-side, so retrying a failed
    /// resolution is safe.
    #[error("schema registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Payload encoding failure from the protobuf codec.
    #[error("protobuf encoding failed: {0}")]
    Encode(#[from] prost::EncodeError),

    /// Payload decoding failure from the protobuf codec.
    #[error("protobuf decoding failed: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Result alias used throughout the crate.
pub type SerdeResult<T> = Result<T, SerdeError>;
