//! Governance objects and votes

use super::super::compound;
use super::super::cursor::Cursor;
use super::super::emit;
use super::super::sink::FieldSink;
use super::super::DecodeResult;
use super::network::bloom_filter;
use crate::types::governance::{object_type_name, vote_outcome_name, vote_signal_name};

pub fn govobj(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::hash(c, s, "parent hash")?;
    emit::i32_le(c, s, "revision")?;
    emit::time_i64(c, s, "time")?;
    emit::hash(c, s, "collateral hash")?;
    emit::var_str(c, s, "data length", "data")?;
    emit::named_u32(c, s, "object type", object_type_name)?;
    compound::outpoint(c, s, "masternode outpoint")?;
    emit::var_bytes(c, s, "signature length", "signature")?;
    Ok(())
}

pub fn govobjvote(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    compound::outpoint(c, s, "masternode outpoint")?;
    emit::hash(c, s, "parent hash")?;
    emit::named_u32(c, s, "vote signal", vote_signal_name)?;
    emit::named_u32(c, s, "vote outcome", vote_outcome_name)?;
    emit::time_i64(c, s, "time")?;
    emit::var_bytes(c, s, "signature length", "signature")?;
    Ok(())
}

/// `govsync`: object hash (zero for all) and a bloom filter of known votes
pub fn govsync(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::hash(c, s, "object hash")?;
    bloom_filter(c, s, "vote filter")
}
