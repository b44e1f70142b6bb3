//! Bounds-checked read cursor over a borrowed byte buffer
//!
//! All offset arithmetic is checked. A read that needs more bytes than remain
//! fails with `TruncatedInput`; a declared length that would push the offset
//! past `MAX_PACKET_SIZE` fails with `OffsetOverflow`.

use super::{DecodeError, DecodeResult};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Largest offset a message may reach (signed 32-bit, as used by capture tooling)
pub const MAX_PACKET_SIZE: usize = i32::MAX as usize;

/// Read position over an immutable buffer
///
/// `base` is the absolute offset of `buf[0]` inside the full message, so
/// sub-cursors report positions that still line up with the full buffer.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_base(buf, 0)
    }

    /// Create a cursor whose reported positions start at `base`
    pub fn with_base(buf: &'a [u8], base: usize) -> Self {
        Self { buf, pos: 0, base }
    }

    /// Absolute position of the next byte to be read
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    /// Bytes consumed so far by this cursor
    pub fn consumed(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Look at the next byte without consuming it
    pub fn peek_u8(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Unread bytes, without consuming them
    pub fn peek_rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Verify that `n` more bytes can be read for `field`
    pub fn ensure(&self, field: &'static str, n: usize) -> DecodeResult<()> {
        let end = self
            .position()
            .checked_add(n)
            .filter(|end| *end <= MAX_PACKET_SIZE);
        if end.is_none() {
            return Err(DecodeError::OffsetOverflow {
                field,
                offset: self.position(),
                declared: n as u64,
            });
        }
        if n > self.remaining() {
            return Err(DecodeError::TruncatedInput {
                field,
                offset: self.position(),
                needed: n,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Convert a declared wire length into a usable byte count
    pub fn check_length(&self, field: &'static str, declared: u64) -> DecodeResult<usize> {
        let n = usize::try_from(declared).map_err(|_| DecodeError::OffsetOverflow {
            field,
            offset: self.position(),
            declared,
        })?;
        self.ensure(field, n)?;
        Ok(n)
    }

    pub fn read_bytes(&mut self, field: &'static str, n: usize) -> DecodeResult<&'a [u8]> {
        self.ensure(field, n)?;
        let v = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(v)
    }

    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> DecodeResult<&'a [u8; N]> {
        let offset = self.position();
        let bytes = self.read_bytes(field, N)?;
        <&[u8; N]>::try_from(bytes).map_err(|_| DecodeError::TruncatedInput {
            field,
            offset,
            needed: N,
            available: bytes.len(),
        })
    }

    /// Consume everything that is left
    pub fn rest(&mut self) -> &'a [u8] {
        let v = &self.buf[self.pos..];
        self.pos = self.buf.len();
        v
    }

    /// Split off a child cursor over the next `n` bytes and advance past them
    pub fn sub_cursor(&mut self, field: &'static str, n: usize) -> DecodeResult<Cursor<'a>> {
        let base = self.position();
        let bytes = self.read_bytes(field, n)?;
        Ok(Cursor::with_base(bytes, base))
    }

    pub fn read_u8(&mut self, field: &'static str) -> DecodeResult<u8> {
        Ok(self.read_bytes(field, 1)?[0])
    }

    pub fn read_u16_le(&mut self, field: &'static str) -> DecodeResult<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(field, 2)?))
    }

    pub fn read_u16_be(&mut self, field: &'static str) -> DecodeResult<u16> {
        Ok(BigEndian::read_u16(self.read_bytes(field, 2)?))
    }

    pub fn read_u32_le(&mut self, field: &'static str) -> DecodeResult<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(field, 4)?))
    }

    pub fn read_u32_be(&mut self, field: &'static str) -> DecodeResult<u32> {
        Ok(BigEndian::read_u32(self.read_bytes(field, 4)?))
    }

    pub fn read_i32_le(&mut self, field: &'static str) -> DecodeResult<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(field, 4)?))
    }

    pub fn read_u64_le(&mut self, field: &'static str) -> DecodeResult<u64> {
        Ok(LittleEndian::read_u64(self.read_bytes(field, 8)?))
    }

    pub fn read_i64_le(&mut self, field: &'static str) -> DecodeResult<i64> {
        Ok(LittleEndian::read_i64(self.read_bytes(field, 8)?))
    }
}
