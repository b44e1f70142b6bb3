//! Primitive reads that also report the field to the sink
//!
//! Each helper reads one value, emits it with its absolute offset and byte
//! length, and returns the value so later reads can depend on it.

use super::compact_size::{read_compact_size, CompactSize};
use super::cursor::Cursor;
use super::sink::{Field, FieldSink, FieldValue};
use super::DecodeResult;

/// Run `f` inside a nested record named `label`
///
/// The record is closed even when `f` fails, so fields decoded before the
/// failure stay in the output.
pub fn record<'a, T>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &str,
    f: impl FnOnce(&mut Cursor<'a>, &mut dyn FieldSink) -> DecodeResult<T>,
) -> DecodeResult<T> {
    let start = c.position();
    s.begin(label, start);
    let result = f(&mut *c, &mut *s);
    s.end(c.position() - start);
    result
}

/// Emit a field spanning `[start, c.position())`
pub fn emit(c: &Cursor<'_>, s: &mut dyn FieldSink, label: &str, start: usize, value: FieldValue<'_>) {
    s.field(Field::new(label, start, c.position() - start, value));
}

pub fn u8(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<u8> {
    let start = c.position();
    let v = c.read_u8(label)?;
    emit(c, s, label, start, FieldValue::UInt(v as u64));
    Ok(v)
}

pub fn bool8(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<bool> {
    let start = c.position();
    let v = c.read_u8(label)? != 0;
    emit(c, s, label, start, FieldValue::Bool(v));
    Ok(v)
}

pub fn u16_le(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<u16> {
    let start = c.position();
    let v = c.read_u16_le(label)?;
    emit(c, s, label, start, FieldValue::UInt(v as u64));
    Ok(v)
}

pub fn u16_be(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<u16> {
    let start = c.position();
    let v = c.read_u16_be(label)?;
    emit(c, s, label, start, FieldValue::UInt(v as u64));
    Ok(v)
}

pub fn u32_le(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<u32> {
    let start = c.position();
    let v = c.read_u32_le(label)?;
    emit(c, s, label, start, FieldValue::UInt(v as u64));
    Ok(v)
}

pub fn i32_le(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<i32> {
    let start = c.position();
    let v = c.read_i32_le(label)?;
    emit(c, s, label, start, FieldValue::Int(v as i64));
    Ok(v)
}

pub fn u64_le(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<u64> {
    let start = c.position();
    let v = c.read_u64_le(label)?;
    emit(c, s, label, start, FieldValue::UInt(v));
    Ok(v)
}

pub fn i64_le(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<i64> {
    let start = c.position();
    let v = c.read_i64_le(label)?;
    emit(c, s, label, start, FieldValue::Int(v));
    Ok(v)
}

/// u64 rendered as fixed-width hex (nonces, flag words)
pub fn hex_u64(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<u64> {
    let start = c.position();
    let v = c.read_u64_le(label)?;
    emit(c, s, label, start, FieldValue::Hex { value: v, width: 16 });
    Ok(v)
}

/// 32-bit Unix timestamp
pub fn time_u32(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<u32> {
    let start = c.position();
    let v = c.read_u32_le(label)?;
    emit(c, s, label, start, FieldValue::Timestamp(v as i64));
    Ok(v)
}

/// 64-bit signed Unix timestamp
pub fn time_i64(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<i64> {
    let start = c.position();
    let v = c.read_i64_le(label)?;
    emit(c, s, label, start, FieldValue::Timestamp(v));
    Ok(v)
}

/// Duff amount
pub fn amount(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<u64> {
    let start = c.position();
    let v = c.read_u64_le(label)?;
    emit(c, s, label, start, FieldValue::Amount(v));
    Ok(v)
}

/// u32 code with a symbolic name from `name_of`
pub fn named_u32(
    c: &mut Cursor<'_>,
    s: &mut dyn FieldSink,
    label: &'static str,
    name_of: fn(u64) -> &'static str,
) -> DecodeResult<u32> {
    let start = c.position();
    let v = c.read_u32_le(label)?;
    emit(
        c,
        s,
        label,
        start,
        FieldValue::Named {
            value: v as u64,
            name: name_of(v as u64),
        },
    );
    Ok(v)
}

/// u8 code with a symbolic name from `name_of`
pub fn named_u8(
    c: &mut Cursor<'_>,
    s: &mut dyn FieldSink,
    label: &'static str,
    name_of: fn(u64) -> &'static str,
) -> DecodeResult<u8> {
    let start = c.position();
    let v = c.read_u8(label)?;
    emit(
        c,
        s,
        label,
        start,
        FieldValue::Named {
            value: v as u64,
            name: name_of(v as u64),
        },
    );
    Ok(v)
}

/// u16 code with a symbolic name from `name_of`
pub fn named_u16(
    c: &mut Cursor<'_>,
    s: &mut dyn FieldSink,
    label: &'static str,
    name_of: fn(u64) -> &'static str,
) -> DecodeResult<u16> {
    let start = c.position();
    let v = c.read_u16_le(label)?;
    emit(
        c,
        s,
        label,
        start,
        FieldValue::Named {
            value: v as u64,
            name: name_of(v as u64),
        },
    );
    Ok(v)
}

/// 32-byte hash, displayed in reversed byte order
pub fn hash<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &'static str,
) -> DecodeResult<&'a [u8; 32]> {
    let start = c.position();
    let v = c.read_array::<32>(label)?;
    emit(c, s, label, start, FieldValue::Hash(v));
    Ok(v)
}

/// Fixed-size byte blob, displayed as hex in wire order
pub fn array<'a, const N: usize>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &'static str,
) -> DecodeResult<&'a [u8; N]> {
    let start = c.position();
    let v = c.read_array::<N>(label)?;
    emit(c, s, label, start, FieldValue::Bytes(v));
    Ok(v)
}

/// `n` raw bytes, displayed as hex
pub fn bytes<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &'static str,
    n: usize,
) -> DecodeResult<&'a [u8]> {
    let start = c.position();
    let v = c.read_bytes(label, n)?;
    emit(c, s, label, start, FieldValue::Bytes(v));
    Ok(v)
}

/// CompactSize value, reported with its encoded width as the field length
pub fn compact_size(
    c: &mut Cursor<'_>,
    s: &mut dyn FieldSink,
    label: &'static str,
) -> DecodeResult<CompactSize> {
    let start = c.position();
    let v = read_compact_size(c, label)?;
    emit(c, s, label, start, FieldValue::UInt(v.value));
    Ok(v)
}

/// CompactSize length prefix followed by that many bytes
///
/// The declared length is checked against the packet-size limit before any
/// bytes are touched.
pub fn var_bytes<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    length_label: &'static str,
    label: &'static str,
) -> DecodeResult<&'a [u8]> {
    let len = compact_size(c, s, length_label)?;
    let n = c.check_length(label, len.value)?;
    bytes(c, s, label, n)
}

/// CompactSize length prefix followed by a string (lossy UTF-8)
pub fn var_str<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    length_label: &'static str,
    label: &'static str,
) -> DecodeResult<&'a [u8]> {
    let len = compact_size(c, s, length_label)?;
    let n = c.check_length(label, len.value)?;
    let start = c.position();
    let v = c.read_bytes(label, n)?;
    emit(
        c,
        s,
        label,
        start,
        FieldValue::Text(String::from_utf8_lossy(v).into_owned()),
    );
    Ok(v)
}

/// Emit a note about the bytes at `[start, start + length)` without reading
pub fn note(s: &mut dyn FieldSink, label: &str, start: usize, length: usize, text: String) {
    s.field(Field::new(label, start, length, FieldValue::Text(text)));
}
