//! InstantSend and ChainLocks messages

use super::super::compound;
use super::super::cursor::Cursor;
use super::super::emit;
use super::super::sink::FieldSink;
use super::super::transaction;
use super::super::DecodeResult;

/// `ix` lock request; a plain transaction
pub fn ix(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    transaction::transaction(c, s, "transaction").map(|_| ())
}

/// `txlvote` masternode lock vote
pub fn txlvote(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::hash(c, s, "transaction hash")?;
    compound::outpoint(c, s, "outpoint")?;
    compound::outpoint(c, s, "masternode outpoint")?;
    emit::var_bytes(c, s, "signature length", "signature")?;
    Ok(())
}

/// `islock` LLMQ-based InstantSend lock
pub fn islock(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    let count = emit::compact_size(c, s, "input count")?;
    for _ in 0..count.value {
        compound::outpoint(c, s, "input")?;
    }
    emit::hash(c, s, "transaction id")?;
    compound::bls_signature(c, s, "signature")?;
    Ok(())
}

/// `clsig` ChainLock signature
pub fn clsig(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::i32_le(c, s, "height")?;
    emit::hash(c, s, "block hash")?;
    compound::bls_signature(c, s, "signature")?;
    Ok(())
}
