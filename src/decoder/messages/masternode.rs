//! Masternode, spork and deterministic masternode list messages

use super::super::compound;
use super::super::cursor::Cursor;
use super::super::emit::{self, record};
use super::super::llmq;
use super::super::sink::FieldSink;
use super::super::transaction;
use super::super::DecodeResult;
use super::blocks::partial_merkle_tree;
use crate::types::llmq::llmq_type_name;
use crate::types::spork::spork_name;

/// `mnb` masternode broadcast, with its embedded ping
pub fn mnb(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    compound::outpoint(c, s, "masternode outpoint")?;
    compound::service(c, s, "address")?;
    compound::public_key(c, s, "collateral public key")?;
    compound::public_key(c, s, "masternode public key")?;
    compound::signature(c, s, "signature")?;
    emit::time_i64(c, s, "signature time")?;
    emit::u32_le(c, s, "protocol version")?;
    record(c, s, "last ping", mnp)
}

/// `mnp` masternode ping
pub fn mnp(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    compound::outpoint(c, s, "masternode outpoint")?;
    emit::hash(c, s, "block hash")?;
    emit::time_i64(c, s, "signature time")?;
    compound::signature(c, s, "signature")?;
    emit::bool8(c, s, "sentinel current")?;
    emit::u32_le(c, s, "sentinel version")?;
    emit::u32_le(c, s, "daemon version")?;
    Ok(())
}

/// `mnw` payment vote; `mnwb` uses the same layout
pub fn mnw(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    compound::outpoint(c, s, "masternode outpoint")?;
    emit::i32_le(c, s, "block height")?;
    compound::script(c, s, "payee script")?;
    compound::signature(c, s, "signature")?;
    Ok(())
}

/// `mnv` masternode verification
pub fn mnv(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    compound::outpoint(c, s, "masternode outpoint 1")?;
    compound::outpoint(c, s, "masternode outpoint 2")?;
    compound::service(c, s, "address")?;
    emit::i32_le(c, s, "nonce")?;
    emit::i32_le(c, s, "block height")?;
    compound::signature(c, s, "signature 1")?;
    compound::signature(c, s, "signature 2")?;
    Ok(())
}

/// `dseg` masternode list request
pub fn dseg(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    compound::outpoint(c, s, "masternode outpoint").map(|_| ())
}

/// `ssc` sync status count
pub fn ssc(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::i32_le(c, s, "item id")?;
    emit::i32_le(c, s, "count")?;
    Ok(())
}

/// `mnget` payment sync request
pub fn mnget(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::i32_le(c, s, "count needed").map(|_| ())
}

pub fn spork(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::named_u32(c, s, "spork id", spork_name)?;
    emit::i64_le(c, s, "value")?;
    emit::time_i64(c, s, "time signed")?;
    compound::signature(c, s, "signature")?;
    Ok(())
}

pub fn getmnlistd(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::hash(c, s, "base block hash")?;
    emit::hash(c, s, "block hash")?;
    Ok(())
}

/// One `CSimplifiedMNListEntry`
fn sml_entry(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    record(c, s, "masternode", |c, s| {
        emit::hash(c, s, "pro reg tx hash")?;
        emit::hash(c, s, "confirmed hash")?;
        compound::service(c, s, "address")?;
        compound::bls_public_key(c, s, "operator public key")?;
        emit::array::<20>(c, s, "voting key id")?;
        emit::bool8(c, s, "valid")?;
        Ok(())
    })
}

pub fn mnlistdiff(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::hash(c, s, "base block hash")?;
    emit::hash(c, s, "block hash")?;
    record(c, s, "coinbase merkle proof", partial_merkle_tree)?;
    transaction::transaction(c, s, "coinbase transaction")?;

    let deleted = emit::compact_size(c, s, "deleted masternode count")?;
    for _ in 0..deleted.value {
        emit::hash(c, s, "deleted masternode")?;
    }

    let count = emit::compact_size(c, s, "masternode count")?;
    for _ in 0..count.value {
        sml_entry(c, s)?;
    }

    let deleted_quorums = emit::compact_size(c, s, "deleted quorum count")?;
    for _ in 0..deleted_quorums.value {
        record(c, s, "deleted quorum", |c, s| {
            emit::named_u8(c, s, "llmq type", llmq_type_name)?;
            emit::hash(c, s, "quorum hash")?;
            Ok(())
        })?;
    }

    let new_quorums = emit::compact_size(c, s, "new quorum count")?;
    for _ in 0..new_quorums.value {
        llmq::final_commitment(c, s, "new quorum")?;
    }
    Ok(())
}

pub fn mnauth(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::hash(c, s, "pro reg tx hash")?;
    compound::bls_signature(c, s, "signature")?;
    Ok(())
}
