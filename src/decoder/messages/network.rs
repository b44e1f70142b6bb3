//! Connection, address and inventory messages

use super::super::compound;
use super::super::cursor::Cursor;
use super::super::emit::{self, record};
use super::super::sink::FieldSink;
use super::super::DecodeResult;
use crate::types::network::{bloom_flag_name, reject_code_name};

/// Sender address, nonce and user agent
pub const VERSION_ADDR_FROM: i32 = 106;
/// Starting block height
pub const VERSION_START_HEIGHT: i32 = 209;
/// Relay flag (BIP37)
pub const VERSION_RELAY: i32 = 70002;
/// Masternode authentication challenge
pub const VERSION_MNAUTH_CHALLENGE: i32 = 70214;

/// `version`
///
/// The gates are cumulative and evaluated in order against the version read
/// at the start of the message; each gated field shifts every later offset.
pub fn version(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    let version = emit::i32_le(c, s, "version")?;
    compound::services(c, s, "services")?;
    emit::time_i64(c, s, "timestamp")?;
    compound::service_address(c, s, "addr_recv")?;

    if version >= VERSION_ADDR_FROM {
        compound::service_address(c, s, "addr_from")?;
        emit::hex_u64(c, s, "nonce")?;
        emit::var_str(c, s, "user agent length", "user agent")?;
    }
    if version >= VERSION_START_HEIGHT {
        emit::i32_le(c, s, "start height")?;
    }
    if version >= VERSION_RELAY {
        emit::bool8(c, s, "relay")?;
    }
    if version >= VERSION_MNAUTH_CHALLENGE {
        emit::hash(c, s, "mnauth challenge")?;
    }
    Ok(())
}

pub fn addr(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    let count = emit::compact_size(c, s, "count")?;
    for _ in 0..count.value {
        compound::net_address(c, s, "address")?;
    }
    Ok(())
}

/// `inv`, `getdata` and `notfound` share one layout
pub fn inv(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    compound::inventory_list(c, s).map(|_| ())
}

/// `getblocks` and `getheaders`
pub fn block_locator(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::u32_le(c, s, "version")?;
    let count = emit::compact_size(c, s, "hash count")?;
    for _ in 0..count.value {
        emit::hash(c, s, "block locator hash")?;
    }
    emit::hash(c, s, "hash stop")?;
    Ok(())
}

/// `ping` and `pong`
pub fn ping(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::hex_u64(c, s, "nonce").map(|_| ())
}

pub fn reject(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::var_str(c, s, "message length", "message")?;
    emit::named_u8(c, s, "code", reject_code_name)?;
    emit::var_str(c, s, "reason length", "reason")?;
    // tx and block rejects append the object hash
    if c.remaining() >= 32 {
        emit::hash(c, s, "data")?;
    }
    Ok(())
}

/// Bloom filter body shared by `filterload` and `govsync`
pub fn bloom_filter(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &str) -> DecodeResult<()> {
    record(c, s, label, |c, s| {
        emit::var_bytes(c, s, "filter length", "filter")?;
        emit::u32_le(c, s, "hash functions")?;
        emit::u32_le(c, s, "tweak")?;
        emit::named_u8(c, s, "flags", bloom_flag_name)?;
        Ok(())
    })
}

pub fn filterload(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    bloom_filter(c, s, "bloom filter")
}

pub fn filteradd(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::var_bytes(c, s, "data length", "data").map(|_| ())
}

pub fn sendcmpct(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::bool8(c, s, "announce")?;
    emit::u64_le(c, s, "version")?;
    Ok(())
}
