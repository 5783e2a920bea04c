//! Consumer-side wire-format deserializer.
//!
//! The consumer path needs no registry client: once the caller names the
//! target message type, a protobuf payload is self-describing. Decoding
//! the index header here only serves to locate where the payload begins;
//! callers that multiplex several message types from one schema file can
//! use [`ProtobufDeserializer::decode_header`] to route on the schema ID
//! or index path before decoding.

use prost::Message;

use crate::error::SerdeResult;
use crate::wire::{self, WireHeader};

/// Deserializes Confluent wire-format messages into Protobuf messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtobufDeserializer;

impl ProtobufDeserializer {
    pub fn new() -> Self {
        Self
    }

    /// Validates and decodes the wire-format header without touching the
    /// payload.
    pub fn decode_header(&self, bytes: &[u8]) -> SerdeResult<WireHeader> {
        Ok(wire::decode_wire_header(bytes)?)
    }

    /// Decodes a wire-format message into `M`.
    ///
    /// Fails with a format error if the buffer is too small, carries the
    /// wrong magic byte, or has a malformed index header; payload decode
    /// errors from prost propagate unchanged.
    pub fn deserialize<M: Message + Default>(&self, bytes: &[u8]) -> SerdeResult<M> {
        let header = wire::decode_wire_header(bytes)?;
        let message = M::decode(&bytes[header.payload_offset..])?;
        Ok(message)
    }
}
