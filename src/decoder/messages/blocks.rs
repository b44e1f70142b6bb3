//! Transaction, block and compact-block messages

use super::super::compound;
use super::super::cursor::Cursor;
use super::super::emit::{self, record};
use super::super::sink::FieldSink;
use super::super::transaction;
use super::super::DecodeResult;

pub fn tx(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    transaction::transaction(c, s, "transaction").map(|_| ())
}

pub fn block(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    compound::block_header(c, s, "block header")?;
    transactions(c, s)
}

/// CompactSize count followed by that many transactions
fn transactions(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    let count = emit::compact_size(c, s, "transaction count")?;
    for _ in 0..count.value {
        transaction::transaction(c, s, "transaction")?;
    }
    Ok(())
}

/// Each header is followed by a transaction count that is always zero
pub fn headers(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    let count = emit::compact_size(c, s, "count")?;
    for _ in 0..count.value {
        record(c, s, "header", |c, s| {
            compound::block_header(c, s, "block header")?;
            emit::compact_size(c, s, "transaction count")?;
            Ok(())
        })?;
    }
    Ok(())
}

/// Partial merkle tree: total count, hashes and flag bits
pub fn partial_merkle_tree(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::u32_le(c, s, "total transactions")?;
    let count = emit::compact_size(c, s, "hash count")?;
    for _ in 0..count.value {
        emit::hash(c, s, "hash")?;
    }
    emit::var_bytes(c, s, "flag bytes", "flags")?;
    Ok(())
}

pub fn merkleblock(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    compound::block_header(c, s, "block header")?;
    partial_merkle_tree(c, s)
}

/// BIP152 compact block
pub fn cmpctblock(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    compound::block_header(c, s, "block header")?;
    emit::hex_u64(c, s, "nonce")?;

    let short_ids = emit::compact_size(c, s, "short id count")?;
    for _ in 0..short_ids.value {
        emit::array::<6>(c, s, "short id")?;
    }

    let prefilled = emit::compact_size(c, s, "prefilled transaction count")?;
    for _ in 0..prefilled.value {
        record(c, s, "prefilled transaction", |c, s| {
            // differentially encoded against the previous index
            emit::compact_size(c, s, "index")?;
            transaction::transaction(c, s, "transaction")?;
            Ok(())
        })?;
    }
    Ok(())
}

pub fn getblocktxn(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::hash(c, s, "block hash")?;
    let count = emit::compact_size(c, s, "index count")?;
    for _ in 0..count.value {
        emit::compact_size(c, s, "index")?;
    }
    Ok(())
}

pub fn blocktxn(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::hash(c, s, "block hash")?;
    transactions(c, s)
}
