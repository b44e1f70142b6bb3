//! CompactSize variable-length integers
//!
//! First byte `< 0xFD` is the value itself; `0xFD`, `0xFE` and `0xFF` prefix a
//! little-endian u16, u32 or u64. The encoded width (1/3/5/9) is returned with
//! the value because callers size adjacent length fields with it.

use super::cursor::Cursor;
use super::DecodeResult;

/// A decoded CompactSize value and the number of bytes it occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactSize {
    pub value: u64,
    pub encoded_len: usize,
}

pub fn read_compact_size(cursor: &mut Cursor<'_>, field: &'static str) -> DecodeResult<CompactSize> {
    let start = cursor.consumed();
    let tag = cursor.read_u8(field)?;

    let value = match tag {
        0x00..=0xfc => tag as u64,
        0xfd => cursor.read_u16_le(field)? as u64,
        0xfe => cursor.read_u32_le(field)? as u64,
        0xff => cursor.read_u64_le(field)?,
    };

    Ok(CompactSize {
        value,
        encoded_len: cursor.consumed() - start,
    })
}

/// Decode a CompactSize from the front of `b`, ignoring anything that follows
pub fn decode_compact_size(b: &[u8]) -> DecodeResult<(u64, usize)> {
    let mut cursor = Cursor::new(b);
    let cs = read_compact_size(&mut cursor, "compact_size")?;
    Ok((cs.value, cs.encoded_len))
}

/// Shortest encoding of `n`
pub fn encode_compact_size(n: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(9);
    match n {
        0x00..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
    out
}
