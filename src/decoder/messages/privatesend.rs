//! PrivateSend mixing messages

use super::super::compound;
use super::super::cursor::Cursor;
use super::super::emit;
use super::super::sink::FieldSink;
use super::super::transaction;
use super::super::DecodeResult;
use crate::types::governance::{pool_state_name, pool_status_name};

/// `dstx` broadcast mixing transaction
pub fn dstx(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    transaction::transaction(c, s, "transaction")?;
    compound::outpoint(c, s, "masternode outpoint")?;
    compound::signature(c, s, "signature")?;
    emit::time_i64(c, s, "signature time")?;
    Ok(())
}

/// `dssu` pool status update
pub fn dssu(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::i32_le(c, s, "session id")?;
    emit::named_u32(c, s, "state", pool_state_name)?;
    emit::i32_le(c, s, "entries count")?;
    emit::named_u32(c, s, "status update", pool_status_name)?;
    emit::i32_le(c, s, "message id")?;
    Ok(())
}

/// `dsq` mixing queue announcement
pub fn dsq(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::u32_le(c, s, "denomination")?;
    compound::outpoint(c, s, "masternode outpoint")?;
    emit::time_i64(c, s, "time")?;
    emit::bool8(c, s, "ready")?;
    compound::signature(c, s, "signature")?;
    Ok(())
}

/// `dsa` accept request
pub fn dsa(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::u32_le(c, s, "denomination")?;
    transaction::transaction(c, s, "collateral transaction")?;
    Ok(())
}

fn inputs(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    let count = emit::compact_size(c, s, "input count")?;
    for _ in 0..count.value {
        transaction::tx_in(c, s, "input")?;
    }
    Ok(())
}

/// `dsi` entry: inputs, collateral and outputs
pub fn dsi(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    inputs(c, s)?;
    transaction::transaction(c, s, "collateral transaction")?;
    let count = emit::compact_size(c, s, "output count")?;
    for _ in 0..count.value {
        transaction::tx_out(c, s, "output")?;
    }
    Ok(())
}

/// `dsf` final transaction to sign
pub fn dsf(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::i32_le(c, s, "session id")?;
    transaction::transaction(c, s, "final transaction")?;
    Ok(())
}

/// `dss` signed inputs
pub fn dss(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    inputs(c, s)
}

/// `dsc` session complete
pub fn dsc(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::i32_le(c, s, "session id")?;
    emit::i32_le(c, s, "message id")?;
    Ok(())
}

pub fn senddsq(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::bool8(c, s, "send dsq").map(|_| ())
}
