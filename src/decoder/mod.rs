//! Dash P2P wire protocol decoder
//!
//! Decodes framed Dash network messages into a tree of labelled fields. The
//! decoder is layered leaf-first:
//!
//! - `cursor` / `compact_size`: bounds-checked primitive reads
//! - `emit`: primitive reads that also report a field to the sink
//! - `compound`: outpoints, addresses, keys, signatures, block headers
//! - `transaction`: inputs, outputs and the gated extra payload
//! - `special_tx`: the six typed special-transaction payloads
//! - `llmq`: bitsets, quorum commitments and signing-session messages
//! - `messages`: one decode function per command
//! - `registry` / `frame`: command lookup and the 24-byte frame header
//!
//! Every read advances a `Cursor` and never touches bytes past the end of the
//! buffer; failures come back as a typed `DecodeError` naming the field and
//! the byte offset where decoding stopped.

pub mod compact_size;
pub mod compound;
pub mod cursor;
pub mod emit;
pub mod frame;
pub mod llmq;
pub mod messages;
pub mod registry;
pub mod render;
pub mod sink;
pub mod special_tx;
pub mod transaction;

pub use compact_size::{decode_compact_size, encode_compact_size, CompactSize};
pub use cursor::{Cursor, MAX_PACKET_SIZE};
pub use frame::{FrameDecoder, FrameHeader, FrameOutcome, FrameReport, FrameState, Framer};
pub use registry::{DecoderRegistry, MessageDecoder};
pub use sink::{Field, FieldNode, FieldSink, FieldValue, NullSink, TreeSink};

/// Result type for decoder operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Decoder-specific error types
///
/// Offsets are absolute positions within the buffer handed to the frame
/// layer, so they can be located directly in a hex view of the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("truncated input reading {field} at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedInput {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("offset overflow reading {field} at offset {offset}: declared length {declared} exceeds the maximum packet size")]
    OffsetOverflow {
        field: &'static str,
        offset: usize,
        declared: u64,
    },

    #[error("malformed tag {tag} for {field} at offset {offset}")]
    MalformedTag {
        field: &'static str,
        offset: usize,
        tag: u64,
    },
}

impl DecodeError {
    /// Name of the field being decoded when the error occurred
    pub fn field(&self) -> &'static str {
        match self {
            DecodeError::TruncatedInput { field, .. }
            | DecodeError::OffsetOverflow { field, .. }
            | DecodeError::MalformedTag { field, .. } => field,
        }
    }

    /// Absolute byte offset at which the failing field starts
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::TruncatedInput { offset, .. }
            | DecodeError::OffsetOverflow { offset, .. }
            | DecodeError::MalformedTag { offset, .. } => *offset,
        }
    }

    /// Short machine-friendly error kind
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::TruncatedInput { .. } => "TruncatedInput",
            DecodeError::OffsetOverflow { .. } => "OffsetOverflow",
            DecodeError::MalformedTag { .. } => "MalformedTag",
        }
    }
}
