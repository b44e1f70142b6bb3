//! LLMQ structures and quorum messages
//!
//! DKG session messages (`qcontrib`, `qcomplaint`, `qjustify`, `qpcommit`,
//! `qfcommit`) and signing-session messages (`qsigsesann`, `qsigsinv`,
//! `qgetsigs`, `qbsigs`, `qsigrec`, `qsendrecsigs`) share a header of LLMQ type,
//! quorum hash and ProRegTx hash, member bitsets and trailing BLS values.
//!
//! Two bitset encodings appear on the wire:
//!
//! - dynamic: CompactSize bit count, then `ceil(bits / 8)` bytes
//! - tagged: a leading byte selecting `0` (dynamic layout) or `1` (bytes up
//!   to and including the first zero byte); any other tag leaves the length
//!   unknown, so the rest of the message cannot be decoded

use tracing::warn;

use super::compound::{self, BLS_PUBLIC_KEY_SIZE, BLS_SIGNATURE_SIZE};
use super::cursor::Cursor;
use super::emit::{self, record};
use super::sink::FieldSink;
use super::{DecodeError, DecodeResult};
use crate::types::llmq::llmq_type_name;

/// Member bitset as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitset<'a> {
    /// Declared number of bits; `None` for the zero-terminated encoding
    pub bit_count: Option<u64>,
    pub bytes: &'a [u8],
}

impl Bitset<'_> {
    /// Bit `i`, least significant bit of the first byte first
    pub fn is_set(&self, i: u64) -> bool {
        if let Some(n) = self.bit_count {
            if i >= n {
                return false;
            }
        }
        let Ok(byte) = usize::try_from(i / 8) else {
            return false;
        };
        self.bytes
            .get(byte)
            .map(|b| b & (1 << (i % 8)) != 0)
            .unwrap_or(false)
    }

    pub fn count_ones(&self) -> u64 {
        match self.bit_count {
            Some(n) => {
                let whole = usize::try_from(n / 8).unwrap_or(usize::MAX);
                let full: u64 = self.bytes[..whole.min(self.bytes.len())]
                    .iter()
                    .map(|b| b.count_ones() as u64)
                    .sum();
                let rem = n % 8;
                let partial = match self.bytes.get(whole) {
                    Some(b) if rem > 0 => (b & ((1u8 << rem) - 1)).count_ones() as u64,
                    _ => 0,
                };
                full + partial
            }
            None => self.bytes.iter().map(|b| b.count_ones() as u64).sum(),
        }
    }
}

/// Number of bytes holding `bits` bits
pub fn bitset_byte_len(bits: u64) -> u64 {
    bits / 8 + u64::from(bits % 8 != 0)
}

fn bitset_body<'a>(c: &mut Cursor<'a>, s: &mut dyn FieldSink) -> DecodeResult<Bitset<'a>> {
    let bits = emit::compact_size(c, s, "bit count")?;
    let n = c.check_length("bits", bitset_byte_len(bits.value))?;
    let start = c.position();
    let bytes = emit::bytes(c, s, "bits", n)?;
    let bitset = Bitset {
        bit_count: Some(bits.value),
        bytes,
    };
    emit::note(
        s,
        "set",
        start,
        n,
        format!("{} of {}", bitset.count_ones(), bits.value),
    );
    Ok(bitset)
}

/// CompactSize-counted bitset (`DYNBITSET`)
pub fn dyn_bitset<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &str,
) -> DecodeResult<Bitset<'a>> {
    record(c, s, label, bitset_body)
}

fn bitset_encoding_name(tag: u64) -> &'static str {
    match tag {
        0 => "Fixed",
        1 => "Zero-terminated",
        _ => "Malformed",
    }
}

/// Bitset with a leading encoding tag
///
/// An unknown tag is reported as an unparseable field and returned as
/// `MalformedTag`: the bitset length cannot be known, so no later field of
/// the message can be located.
pub fn tagged_bitset<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &str,
) -> DecodeResult<Bitset<'a>> {
    record(c, s, label, |c, s| {
        let tag_offset = c.position();
        let tag = emit::named_u8(c, s, "encoding", bitset_encoding_name)?;
        match tag {
            0 => bitset_body(c, s),
            1 => {
                let rest = c.peek_rest();
                match rest.iter().position(|b| *b == 0) {
                    Some(end) => {
                        let bytes = emit::bytes(c, s, "bits", end + 1)?;
                        Ok(Bitset {
                            bit_count: None,
                            bytes,
                        })
                    }
                    None => Err(DecodeError::TruncatedInput {
                        field: "bits",
                        offset: c.position(),
                        needed: rest.len() + 1,
                        available: rest.len(),
                    }),
                }
            }
            other => {
                warn!(tag = other, offset = tag_offset, "malformed bitset encoding tag");
                emit::note(
                    s,
                    "bits",
                    tag_offset,
                    1,
                    format!("unparseable bitset (encoding tag {})", other),
                );
                Err(DecodeError::MalformedTag {
                    field: "bitset encoding",
                    offset: tag_offset,
                    tag: other as u64,
                })
            }
        }
    })
}

/// Final quorum commitment (`qfcommit`, `QcTx`, `mnlistdiff`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalCommitment<'a> {
    pub version: u16,
    pub llmq_type: u8,
    pub quorum_hash: &'a [u8; 32],
    pub signers: Bitset<'a>,
    pub valid_members: Bitset<'a>,
    pub quorum_public_key: &'a [u8; BLS_PUBLIC_KEY_SIZE],
    pub quorum_vvec_hash: &'a [u8; 32],
    pub quorum_sig: &'a [u8; BLS_SIGNATURE_SIZE],
    pub members_sig: &'a [u8; BLS_SIGNATURE_SIZE],
}

pub fn final_commitment<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &str,
) -> DecodeResult<FinalCommitment<'a>> {
    record(c, s, label, |c, s| {
        let version = emit::u16_le(c, s, "version")?;
        let llmq_type = emit::named_u8(c, s, "llmq type", llmq_type_name)?;
        let quorum_hash = emit::hash(c, s, "quorum hash")?;
        let signers = dyn_bitset(c, s, "signers")?;
        let valid_members = dyn_bitset(c, s, "valid members")?;
        let quorum_public_key = compound::bls_public_key(c, s, "quorum public key")?;
        let quorum_vvec_hash = emit::hash(c, s, "quorum vvec hash")?;
        let quorum_sig = compound::bls_signature(c, s, "quorum signature")?;
        let members_sig = compound::bls_signature(c, s, "members signature")?;
        Ok(FinalCommitment {
            version,
            llmq_type,
            quorum_hash,
            signers,
            valid_members,
            quorum_public_key,
            quorum_vvec_hash,
            quorum_sig,
            members_sig,
        })
    })
}

/// LLMQ type, quorum hash and ProRegTx hash opening every DKG message
fn dkg_header(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<u8> {
    let llmq_type = emit::named_u8(c, s, "llmq type", llmq_type_name)?;
    emit::hash(c, s, "quorum hash")?;
    emit::hash(c, s, "pro tx hash")?;
    Ok(llmq_type)
}

pub fn qcontrib(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    dkg_header(c, s)?;

    let vvec_count = emit::compact_size(c, s, "verification vector count")?;
    for _ in 0..vvec_count.value {
        compound::bls_public_key(c, s, "verification vector key")?;
    }

    record(c, s, "contributions", |c, s| {
        compound::bls_public_key(c, s, "ephemeral public key")?;
        emit::hash(c, s, "iv seed")?;
        let blobs = emit::compact_size(c, s, "blob count")?;
        for _ in 0..blobs.value {
            emit::var_bytes(c, s, "blob length", "encrypted contribution")?;
        }
        Ok(())
    })?;

    compound::bls_signature(c, s, "signature")?;
    Ok(())
}

pub fn qcomplaint(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    dkg_header(c, s)?;
    dyn_bitset(c, s, "bad members")?;
    dyn_bitset(c, s, "complain for members")?;
    compound::bls_signature(c, s, "signature")?;
    Ok(())
}

pub fn qjustify(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    dkg_header(c, s)?;
    let count = emit::compact_size(c, s, "contribution count")?;
    for _ in 0..count.value {
        record(c, s, "contribution", |c, s| {
            emit::u32_le(c, s, "member index")?;
            emit::array::<32>(c, s, "secret key contribution")?;
            Ok(())
        })?;
    }
    compound::bls_signature(c, s, "signature")?;
    Ok(())
}

pub fn qpcommit(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    dkg_header(c, s)?;
    dyn_bitset(c, s, "valid members")?;
    compound::bls_public_key(c, s, "quorum public key")?;
    emit::hash(c, s, "quorum vvec hash")?;
    compound::bls_signature(c, s, "quorum signature")?;
    compound::bls_signature(c, s, "signature")?;
    Ok(())
}

pub fn qfcommit(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    final_commitment(c, s, "commitment").map(|_| ())
}

pub fn qsendrecsigs(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::bool8(c, s, "send recovered signatures").map(|_| ())
}

pub fn qsigsesann(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    let count = emit::compact_size(c, s, "announcement count")?;
    for _ in 0..count.value {
        record(c, s, "session announcement", |c, s| {
            emit::u32_le(c, s, "session id")?;
            emit::named_u8(c, s, "llmq type", llmq_type_name)?;
            emit::hash(c, s, "quorum hash")?;
            emit::hash(c, s, "id")?;
            emit::hash(c, s, "message hash")?;
            Ok(())
        })?;
    }
    Ok(())
}

/// Session id plus a tagged bitset of share indexes
fn sig_shares_inv(c: &mut Cursor<'_>, s: &mut dyn FieldSink, inv_label: &str) -> DecodeResult<()> {
    emit::u32_le(c, s, "session id")?;
    tagged_bitset(c, s, inv_label)?;
    Ok(())
}

pub fn qsigsinv(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    let count = emit::compact_size(c, s, "inventory count")?;
    for _ in 0..count.value {
        record(c, s, "sig shares inventory", |c, s| {
            sig_shares_inv(c, s, "announced shares")
        })?;
    }
    Ok(())
}

pub fn qgetsigs(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    let count = emit::compact_size(c, s, "request count")?;
    for _ in 0..count.value {
        record(c, s, "sig shares request", |c, s| {
            sig_shares_inv(c, s, "requested shares")
        })?;
    }
    Ok(())
}

pub fn qbsigs(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    let count = emit::compact_size(c, s, "batch count")?;
    for _ in 0..count.value {
        record(c, s, "batched sig shares", |c, s| {
            emit::u32_le(c, s, "session id")?;
            let shares = emit::compact_size(c, s, "share count")?;
            for _ in 0..shares.value {
                record(c, s, "sig share", |c, s| {
                    emit::u16_le(c, s, "member index")?;
                    compound::bls_signature(c, s, "signature share")?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;
    }
    Ok(())
}

pub fn qsigrec(c: &mut Cursor<'_>, s: &mut dyn FieldSink) -> DecodeResult<()> {
    emit::named_u8(c, s, "llmq type", llmq_type_name)?;
    emit::hash(c, s, "quorum hash")?;
    emit::hash(c, s, "id")?;
    emit::hash(c, s, "message hash")?;
    compound::bls_signature(c, s, "signature")?;
    Ok(())
}
