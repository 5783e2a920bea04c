//! Schema registry client interface.
//!
//! The registry itself is an external collaborator: this crate only
//! needs the three calls the resolution protocol consumes, so they are
//! expressed as a narrow object-safe trait and callers plug in their own
//! client. Registry failures are propagated to the send path verbatim;
//! nothing here retries or logs-and-swallows.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Schema document types the registry distinguishes. This crate only
/// produces [`SchemaType::Protobuf`], but the registry API is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Avro,
    Json,
    Protobuf,
}

/// A reference from one schema to another registered schema, as the
/// registry's API models it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaReference {
    /// Name the referencing schema uses, i.e. the protobuf import path.
    pub name: String,
    /// Subject the referenced schema is registered under.
    pub subject: String,
    /// Registered version of the referenced schema.
    pub version: i32,
}

/// Identity the registry assigned to a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredSchema {
    /// Globally unique schema ID, embedded in the wire header.
    pub id: u32,
    /// Version within the subject's history.
    pub version: i32,
}

/// Registry failure, propagated unchanged to the caller of the send or
/// resolve operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("subject '{subject}' not found in the schema registry")]
    SubjectNotFound { subject: String },

    #[error("schema registry rejected the request: {message}")]
    Rejected { message: String },

    #[error("schema registry transport error: {message}")]
    Transport { message: String },
}

/// The narrow registry surface the resolution protocol consumes.
///
/// Implementations are expected to be idempotent for
/// [`create_schema`](SchemaRegistry::create_schema): registering a
/// schema document that is already registered under the subject returns
/// the existing identity. The resolver relies on that to make races and
/// retries harmless.
#[async_trait]
pub trait SchemaRegistry: Send + Sync {
    /// Registers `schema` under `subject`, returning its assigned
    /// identity. Idempotent for an already-registered document.
    async fn create_schema(
        &self,
        subject: &str,
        schema: &str,
        schema_type: SchemaType,
        references: &[SchemaReference],
    ) -> Result<RegisteredSchema, RegistryError>;

    /// Looks up the identity of exactly this `schema` under `subject`,
    /// without registering it.
    async fn lookup_schema(
        &self,
        subject: &str,
        schema: &str,
        schema_type: SchemaType,
        references: &[SchemaReference],
    ) -> Result<RegisteredSchema, RegistryError>;

    /// Fetches the identity of the latest registered version under
    /// `subject`.
    async fn get_latest_schema(&self, subject: &str) -> Result<RegisteredSchema, RegistryError>;
}
