//! Confluent Schema Registry wire-format codec.
//!
//! Layout of a wire-format message:
//!
//! ```text
//! byte 0      magic byte, always 0x00
//! bytes 1-4   schema id, big-endian u32
//! bytes 5..k  message index header (zig-zag varint array)
//! bytes k..   encoded payload, opaque to this module
//! ```
//!
//! The message index header is a zig-zag varint element count followed by
//! that many zig-zag varint index values, root-to-leaf. The common case of
//! the first top-level message in a file (`[0]`) is encoded as the single
//! varint `0` instead of a length-prefixed array; that compact form must
//! be preserved bit-for-bit for compatibility with the Java, Go and Python
//! serializers.

use thiserror::Error;

/// Leading byte identifying the Confluent wire-format scheme.
pub const MAGIC_BYTE: u8 = 0;

/// Bytes occupied by the magic byte and the schema ID.
pub const WIRE_HEADER_LEN: usize = 5;

/// Smallest possible wire-format message: fixed header plus at least one
/// message index byte.
pub const MIN_MESSAGE_LEN: usize = 6;

// A varint-encoded u64 never exceeds ten bytes.
const MAX_VARINT_LEN: usize = 10;

/// Malformed wire-format header. Always fatal to the decode call; callers
/// should reject the message rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireFormatError {
    #[error("message too small, not produced with a schema registry serializer")]
    TooSmall,
    #[error("unknown magic byte {0:#04x}, not produced with a schema registry serializer")]
    BadMagic(u8),
    #[error("unable to decode message index array")]
    BadIndexArray,
    #[error("unable to decode value in message index array")]
    BadIndexValue,
}

/// Decoded fixed + variable header of a wire-format message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireHeader {
    /// Registry-assigned schema ID embedded by the producer.
    pub schema_id: u32,
    /// Index path of the message type within its schema file,
    /// root-to-leaf. `[0]` for the common top-level case.
    pub message_indexes: Vec<i64>,
    /// Offset at which the encoded payload begins.
    pub payload_offset: usize,
}

/// Appends the zig-zag varint encoding of `value` to `buf`.
pub(crate) fn encode_zigzag_varint(value: i64, buf: &mut Vec<u8>) {
    let mut encoded = ((value << 1) ^ (value >> 63)) as u64;
    loop {
        let byte = (encoded & 0x7f) as u8;
        encoded >>= 7;
        if encoded == 0 {
            buf.push(byte);
            return;
        }
        buf.push(byte | 0x80);
    }
}

/// Decodes one zig-zag varint from the front of `buf`, returning the value
/// and the number of bytes consumed. `None` on truncated or overlong input.
pub(crate) fn decode_zigzag_varint(buf: &[u8]) -> Option<(i64, usize)> {
    let mut encoded: u64 = 0;
    for (i, &byte) in buf.iter().enumerate().take(MAX_VARINT_LEN) {
        encoded |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            let value = (encoded >> 1) as i64 ^ -((encoded & 1) as i64);
            return Some((value, i + 1));
        }
    }
    None
}

/// Encodes a message index path as a wire-format index header.
///
/// The path `[0]` uses the compact single-byte form; every other path,
/// including other single-element paths, is written as a zig-zag varint
/// element count followed by the zig-zag varint elements in order.
pub fn encode_message_indexes(indexes: &[i64]) -> Vec<u8> {
    if indexes.len() == 1 && indexes[0] == 0 {
        return vec![0];
    }

    let mut buf = Vec::with_capacity(1 + indexes.len());
    encode_zigzag_varint(indexes.len() as i64, &mut buf);
    for &index in indexes {
        encode_zigzag_varint(index, &mut buf);
    }
    buf
}

/// Decodes a message index header from the front of `buf`, returning the
/// index path and the number of bytes consumed.
///
/// A decoded element count of zero is the compact form of the top-level
/// path and yields `[0]`, so decoding always round-trips what
/// [`encode_message_indexes`] produced, consuming exactly the bytes it
/// wrote.
pub fn decode_message_indexes(buf: &[u8]) -> Result<(Vec<i64>, usize), WireFormatError> {
    let (count, mut consumed) =
        decode_zigzag_varint(buf).ok_or(WireFormatError::BadIndexArray)?;
    if count < 0 {
        return Err(WireFormatError::BadIndexArray);
    }
    if count == 0 {
        return Ok((vec![0], consumed));
    }

    // Capacity bounded by the buffer: every element takes at least one
    // byte, and a hostile count must not drive a huge allocation.
    let mut indexes = Vec::with_capacity((count as usize).min(buf.len()));
    for _ in 0..count {
        let (value, read) = decode_zigzag_varint(&buf[consumed..])
            .ok_or(WireFormatError::BadIndexValue)?;
        indexes.push(value);
        consumed += read;
    }
    Ok((indexes, consumed))
}

/// Validates and decodes the complete wire-format header of `buf`.
///
/// Checks are applied in order: minimum length, magic byte, index element
/// count, index values. The payload is the slice starting at
/// `payload_offset`; this module never interprets it.
pub fn decode_wire_header(buf: &[u8]) -> Result<WireHeader, WireFormatError> {
    if buf.len() < MIN_MESSAGE_LEN {
        return Err(WireFormatError::TooSmall);
    }
    if buf[0] != MAGIC_BYTE {
        return Err(WireFormatError::BadMagic(buf[0]));
    }

    let schema_id = u32::from_be_bytes([buf[1], buf[2], buf[3], buf[4]]);
    let (message_indexes, consumed) = decode_message_indexes(&buf[WIRE_HEADER_LEN..])?;

    Ok(WireHeader {
        schema_id,
        message_indexes,
        payload_offset: WIRE_HEADER_LEN + consumed,
    })
}
