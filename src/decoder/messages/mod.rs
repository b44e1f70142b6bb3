//! Per-command payload decoders
//!
//! Every decoder has the same shape, `fn(&mut Cursor, &mut dyn FieldSink) ->
//! DecodeResult<()>`, and reads its fields in strict wire order. Quorum
//! commands live in `decoder::llmq` next to the structures they share.

pub mod blocks;
pub mod governance;
pub mod instantsend;
pub mod masternode;
pub mod network;
pub mod privatesend;

use super::cursor::Cursor;
use super::sink::FieldSink;
use super::DecodeResult;

/// Decoder for commands that carry no payload
pub fn empty(_c: &mut Cursor<'_>, _s: &mut dyn FieldSink) -> DecodeResult<()> {
    Ok(())
}
