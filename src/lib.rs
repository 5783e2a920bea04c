//! # protoserde
//!
//! A Confluent Schema Registry wire-format serializer/deserializer for
//! Protobuf-encoded Kafka messages.
//!
//! Every message produced with this crate is framed as:
//!
//! ```text
//! [ magic byte (0x00) | schema id (4 bytes, big-endian) | message index header | payload ]
//! ```
//!
//! The message index header is a zig-zag varint array locating the message
//! type inside its schema file's nested-message tree, so a registry-aware
//! consumer can tell which of several message types in one `.proto` file
//! produced the payload.
//!
//! ## Features
//!
//! - **Byte-exact wire format**: interoperates with the Confluent Java, Go
//!   and Python serializers, including the single-byte encoding of the
//!   common top-level-message case
//! - **Schema ID resolution with caching**: one registry round-trip per
//!   subject, then read-locked cache hits on the send path
//! - **Recursive reference resolution**: schema file imports are
//!   registered/looked up depth-first before the schema that needs them
//! - **Pluggable subject naming**: topic, topic-record and record
//!   strategies, configured with the standard property names
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use protoserde::{
//!     MessageField, ProtobufDeserializer, ProtobufSerializer, SerializationContext,
//!     SerializerConfig,
//! };
//! use std::sync::Arc;
//!
//! # #[derive(Clone, PartialEq, prost::Message)]
//! # struct OrderCreated { #[prost(int64, tag = "1")] id: i64 }
//! # async fn example(
//! #     descriptor: prost_reflect::MessageDescriptor,
//! #     registry: Arc<dyn protoserde::SchemaRegistry>,
//! # ) -> Result<(), protoserde::SerdeError> {
//! let serializer = ProtobufSerializer::new(descriptor, registry, SerializerConfig::default())?;
//!
//! let ctx = SerializationContext::new("orders", MessageField::Value);
//! let order = OrderCreated { id: 42 };
//! let bytes = serializer.serialize(&order, &ctx).await?;
//!
//! let deserializer = ProtobufDeserializer::new();
//! let decoded: OrderCreated = deserializer.deserialize(&bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod descriptor;
pub mod deserializer;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod serializer;
pub mod subject;
pub mod wire;

pub use config::{
    SerializerConfig, AUTO_REGISTER_SCHEMAS, REFERENCE_SUBJECT_NAME_STRATEGY, SKIP_KNOWN_TYPES,
    SUBJECT_NAME_STRATEGY, USE_LATEST_VERSION,
};
pub use deserializer::ProtobufDeserializer;
pub use error::{ConfigError, RegistryError, SerdeError, WireFormatError};
pub use registry::{RegisteredSchema, SchemaReference, SchemaRegistry, SchemaType};
pub use resolver::SchemaIdResolver;
pub use serializer::ProtobufSerializer;
pub use subject::{
    MessageField, ReferenceSubjectNameStrategy, SerializationContext, SubjectNameStrategy,
};
pub use wire::{WireHeader, MAGIC_BYTE};
