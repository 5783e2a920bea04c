//! Producer-side wire-format serializer.

use std::sync::Arc;

use prost_reflect::MessageDescriptor;

use crate::config::SerializerConfig;
use crate::descriptor::message_index_path;
use crate::error::{SerdeError, SerdeResult};
use crate::registry::SchemaRegistry;
use crate::resolver::SchemaIdResolver;
use crate::subject::SerializationContext;
use crate::wire::{self, MAGIC_BYTE};

/// Serializes Protobuf messages of one message type into the Confluent
/// Schema Registry wire format.
///
/// The message index header is fixed per message type, so it is computed
/// and encoded once at construction. The schema ID can depend on the send
/// context (topic and key/value role), so it is resolved per send, with
/// the known-subjects cache making repeat sends free of registry I/O.
///
/// The serializer is safe to share across tasks; all state after
/// construction is the resolver's cache.
pub struct ProtobufSerializer {
    descriptor: MessageDescriptor,
    message_index_bytes: Vec<u8>,
    resolver: SchemaIdResolver,
}

impl std::fmt::Debug for ProtobufSerializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtobufSerializer")
            .field("descriptor", &self.descriptor)
            .field("message_index_bytes", &self.message_index_bytes)
            .finish_non_exhaustive()
    }
}

impl ProtobufSerializer {
    /// Creates a serializer bound to one message type.
    ///
    /// Fails with a configuration error if `config` combines
    /// `use.latest.version` with `auto.register.schemas`.
    pub fn new(
        descriptor: MessageDescriptor,
        registry: Arc<dyn SchemaRegistry>,
        config: SerializerConfig,
    ) -> Result<Self, SerdeError> {
        let message_index_bytes = wire::encode_message_indexes(&message_index_path(&descriptor));
        let resolver = SchemaIdResolver::new(registry, config)?;
        Ok(Self {
            descriptor,
            message_index_bytes,
            resolver,
        })
    }

    /// The message type this serializer is bound to.
    pub fn descriptor(&self) -> &MessageDescriptor {
        &self.descriptor
    }

    /// The pre-encoded message index header.
    pub fn message_index_bytes(&self) -> &[u8] {
        &self.message_index_bytes
    }

    /// Serializes `message` for the given send context.
    ///
    /// Output layout: magic byte, big-endian schema ID, message index
    /// header, prost-encoded payload. Registry failures during schema ID
    /// resolution and payload encoding failures propagate unchanged.
    pub async fn serialize<M: prost::Message>(
        &self,
        message: &M,
        ctx: &SerializationContext,
    ) -> SerdeResult<Vec<u8>> {
        let schema_id = self
            .resolver
            .resolve_schema_id(ctx, &self.descriptor)
            .await?;

        let mut buf = Vec::with_capacity(
            wire::WIRE_HEADER_LEN + self.message_index_bytes.len() + message.encoded_len(),
        );
        buf.push(MAGIC_BYTE);
        buf.extend_from_slice(&schema_id.to_be_bytes());
        buf.extend_from_slice(&self.message_index_bytes);
        message.encode(&mut buf)?;

        Ok(buf)
    }
}
