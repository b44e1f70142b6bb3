//! Compound wire structures built from primitive reads
//!
//! Each decoder consumes exactly the bytes of its structure, emits one record
//! with its sub-fields nested inside, and returns a borrowed view of the
//! decoded value.

use std::net::{IpAddr, Ipv6Addr};

use super::cursor::Cursor;
use super::emit::{self, record};
use super::sink::{Field, FieldSink, FieldValue};
use super::DecodeResult;
use crate::types::inventory::inventory_type_name;
use crate::types::services::service_flag_names;

pub const BLS_PUBLIC_KEY_SIZE: usize = 48;
pub const BLS_SIGNATURE_SIZE: usize = 96;

/// Reference to a previous transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outpoint<'a> {
    pub hash: &'a [u8; 32],
    pub index: u32,
}

pub fn outpoint<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &str,
) -> DecodeResult<Outpoint<'a>> {
    record(c, s, label, |c, s| {
        let hash = emit::hash(c, s, "hash")?;
        let index = emit::u32_le(c, s, "index")?;
        Ok(Outpoint { hash, index })
    })
}

/// 16-byte address field; IPv4-mapped values come back as `IpAddr::V4`
pub fn ip_from_bytes(bytes: &[u8; 16]) -> IpAddr {
    let v6 = Ipv6Addr::from(*bytes);
    match v6.to_ipv4_mapped() {
        Some(v4) => IpAddr::V4(v4),
        None => IpAddr::V6(v6),
    }
}

/// 16-byte IP address field
pub fn ip_address(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<IpAddr> {
    let start = c.position();
    let ip = ip_from_bytes(c.read_array::<16>(label)?);
    emit::emit(c, s, label, start, FieldValue::Ip(ip));
    Ok(ip)
}

/// Service flag word rendered with its flag names
pub fn services(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<u64> {
    let start = c.position();
    let v = c.read_u64_le(label)?;
    let names = service_flag_names(v);
    let text = if names.is_empty() {
        format!("0x{:016x}", v)
    } else {
        format!("0x{:016x} ({})", v, names.join(", "))
    };
    emit::emit(c, s, label, start, FieldValue::Text(text));
    Ok(v)
}

/// services + address + port, as carried in `version` and `addr`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceAddress {
    pub services: u64,
    pub ip: IpAddr,
    pub port: u16,
}

pub fn service_address(
    c: &mut Cursor<'_>,
    s: &mut dyn FieldSink,
    label: &str,
) -> DecodeResult<ServiceAddress> {
    record(c, s, label, |c, s| {
        let services = services(c, s, "services")?;
        let ip = ip_address(c, s, "address")?;
        let port = emit::u16_be(c, s, "port")?;
        Ok(ServiceAddress { services, ip, port })
    })
}

/// Timestamped address entry of an `addr` message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetAddress {
    pub time: u32,
    pub address: ServiceAddress,
}

pub fn net_address(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &str) -> DecodeResult<NetAddress> {
    record(c, s, label, |c, s| {
        let time = emit::time_u32(c, s, "time")?;
        let services = services(c, s, "services")?;
        let ip = ip_address(c, s, "address")?;
        let port = emit::u16_be(c, s, "port")?;
        Ok(NetAddress {
            time,
            address: ServiceAddress { services, ip, port },
        })
    })
}

/// Address and port without a service word (masternode messages)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub ip: IpAddr,
    pub port: u16,
}

pub fn service(c: &mut Cursor<'_>, s: &mut dyn FieldSink, label: &str) -> DecodeResult<Service> {
    record(c, s, label, |c, s| {
        let ip = ip_address(c, s, "address")?;
        let port = emit::u16_be(c, s, "port")?;
        Ok(Service { ip, port })
    })
}

/// Display name for the first byte of a serialised secp256k1 key
pub fn pubkey_type_name(value: u64) -> &'static str {
    match value {
        2 | 3 => "Compressed",
        4 | 6 | 7 => "Uncompressed",
        _ => "Unknown",
    }
}

/// Length-prefixed secp256k1 public key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey<'a> {
    pub key: &'a [u8],
}

impl PublicKey<'_> {
    pub fn key_type(&self) -> Option<u8> {
        self.key.first().copied()
    }
}

pub fn public_key<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &str,
) -> DecodeResult<PublicKey<'a>> {
    record(c, s, label, |c, s| {
        let len = emit::u8(c, s, "length")? as usize;
        c.ensure("key", len)?;
        if let Some(kind) = c.peek_u8() {
            if len > 0 {
                s.field(Field::new(
                    "key type",
                    c.position(),
                    1,
                    FieldValue::Named {
                        value: kind as u64,
                        name: pubkey_type_name(kind as u64),
                    },
                ));
            }
        }
        let key = emit::bytes(c, s, "key", len)?;
        Ok(PublicKey { key })
    })
}

/// Length-prefixed ECDSA signature; the length byte is trusted, not assumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature<'a> {
    pub bytes: &'a [u8],
}

pub fn signature<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &str,
) -> DecodeResult<Signature<'a>> {
    record(c, s, label, |c, s| {
        let len = emit::u8(c, s, "length")? as usize;
        let bytes = emit::bytes(c, s, "signature", len)?;
        Ok(Signature { bytes })
    })
}

/// CompactSize-prefixed script
pub fn script<'a>(c: &mut Cursor<'a>, s: &mut dyn FieldSink, label: &'static str) -> DecodeResult<&'a [u8]> {
    emit::var_bytes(c, s, "script length", label)
}

pub fn bls_public_key<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &'static str,
) -> DecodeResult<&'a [u8; BLS_PUBLIC_KEY_SIZE]> {
    emit::array::<BLS_PUBLIC_KEY_SIZE>(c, s, label)
}

pub fn bls_signature<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &'static str,
) -> DecodeResult<&'a [u8; BLS_SIGNATURE_SIZE]> {
    emit::array::<BLS_SIGNATURE_SIZE>(c, s, label)
}

/// Inventory vector (`type` + hash)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryVector<'a> {
    pub inv_type: u32,
    pub hash: &'a [u8; 32],
}

pub fn inventory_vector<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &str,
) -> DecodeResult<InventoryVector<'a>> {
    record(c, s, label, |c, s| {
        let inv_type = emit::named_u32(c, s, "type", inventory_type_name)?;
        let hash = emit::hash(c, s, "hash")?;
        Ok(InventoryVector { inv_type, hash })
    })
}

/// CompactSize count followed by that many inventory vectors
pub fn inventory_list<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
) -> DecodeResult<Vec<InventoryVector<'a>>> {
    let count = emit::compact_size(c, s, "count")?;
    let mut items = Vec::new();
    for _ in 0..count.value {
        items.push(inventory_vector(c, s, "inventory vector")?);
    }
    Ok(items)
}

/// 80-byte block header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader<'a> {
    pub version: i32,
    pub prev_block: &'a [u8; 32],
    pub merkle_root: &'a [u8; 32],
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

pub fn block_header<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &str,
) -> DecodeResult<BlockHeader<'a>> {
    record(c, s, label, |c, s| {
        let version = emit::i32_le(c, s, "version")?;
        let prev_block = emit::hash(c, s, "previous block")?;
        let merkle_root = emit::hash(c, s, "merkle root")?;
        let time = emit::time_u32(c, s, "time")?;
        let start = c.position();
        let bits = c.read_u32_le("bits")?;
        emit::emit(
            c,
            s,
            "bits",
            start,
            FieldValue::Hex {
                value: bits as u64,
                width: 8,
            },
        );
        let nonce = emit::u32_le(c, s, "nonce")?;
        Ok(BlockHeader {
            version,
            prev_block,
            merkle_root,
            time,
            bits,
            nonce,
        })
    })
}
