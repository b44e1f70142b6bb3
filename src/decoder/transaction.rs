//! Transactions: inputs, outputs and the gated extra payload
//!
//! A Dash transaction carries a 16-bit version and a 16-bit type in place of
//! Bitcoin's 32-bit version. The extra payload is never flagged on the wire;
//! it is present only when bytes remain after `lockTime`, `version >= 2` and
//! `type > 0`. Getting this wrong shifts every following read, which in a
//! `block` message corrupts all later transactions.

use tracing::warn;

use super::compound::{self, Outpoint};
use super::cursor::Cursor;
use super::emit::{self, record};
use super::sink::FieldSink;
use super::special_tx::{self, SpecialTxPayload};
use super::DecodeResult;
use crate::types::special_tx::{tx_type_name, SpecialTxType};

/// Lowest transaction version that may carry an extra payload
pub const SPECIAL_TX_MIN_VERSION: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn<'a> {
    pub previous_output: Outpoint<'a>,
    pub signature_script: &'a [u8],
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut<'a> {
    pub value: u64,
    pub script: &'a [u8],
}

/// Extra payload of a special transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraPayload<'a> {
    Decoded(SpecialTxPayload<'a>),
    /// Type value with no known layout; bytes skipped using the declared size
    Undecoded { tx_type: u16, bytes: &'a [u8] },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction<'a> {
    pub version: u16,
    pub tx_type: u16,
    pub inputs: Vec<TxIn<'a>>,
    pub outputs: Vec<TxOut<'a>>,
    pub lock_time: u32,
    pub extra_payload: Option<ExtraPayload<'a>>,
}

impl Transaction<'_> {
    pub fn is_special(&self) -> bool {
        self.version >= SPECIAL_TX_MIN_VERSION && self.tx_type > 0
    }

    pub fn total_output_value(&self) -> u64 {
        self.outputs
            .iter()
            .fold(0u64, |acc, o| acc.saturating_add(o.value))
    }
}

/// Whether an extra payload follows `lockTime`
pub fn has_extra_payload(version: u16, tx_type: u16, remaining: usize) -> bool {
    remaining > 0 && version >= SPECIAL_TX_MIN_VERSION && tx_type > 0
}

pub fn tx_in<'a>(c: &mut Cursor<'a>, s: &mut dyn FieldSink, label: &str) -> DecodeResult<TxIn<'a>> {
    record(c, s, label, |c, s| {
        let previous_output = compound::outpoint(c, s, "previous output")?;
        let signature_script = compound::script(c, s, "signature script")?;
        let sequence = emit::u32_le(c, s, "sequence")?;
        Ok(TxIn {
            previous_output,
            signature_script,
            sequence,
        })
    })
}

pub fn tx_out<'a>(c: &mut Cursor<'a>, s: &mut dyn FieldSink, label: &str) -> DecodeResult<TxOut<'a>> {
    record(c, s, label, |c, s| {
        let value = emit::amount(c, s, "value")?;
        let script = compound::script(c, s, "script")?;
        Ok(TxOut { value, script })
    })
}

/// Decode one transaction, including its extra payload when the gate opens
pub fn transaction<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    label: &str,
) -> DecodeResult<Transaction<'a>> {
    record(c, s, label, |c, s| {
        let version = emit::u16_le(c, s, "version")?;
        let tx_type = emit::named_u16(c, s, "type", tx_type_name)?;

        let input_count = emit::compact_size(c, s, "input count")?;
        let mut inputs = Vec::new();
        for _ in 0..input_count.value {
            inputs.push(tx_in(c, s, "input")?);
        }

        let output_count = emit::compact_size(c, s, "output count")?;
        let mut outputs = Vec::new();
        for _ in 0..output_count.value {
            outputs.push(tx_out(c, s, "output")?);
        }

        let lock_time = emit::u32_le(c, s, "lock time")?;

        let extra_payload = if has_extra_payload(version, tx_type, c.remaining()) {
            Some(extra_payload(c, s, tx_type)?)
        } else {
            None
        };

        Ok(Transaction {
            version,
            tx_type,
            inputs,
            outputs,
            lock_time,
            extra_payload,
        })
    })
}

/// CompactSize size followed by a type-dispatched payload of that size
fn extra_payload<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
    tx_type: u16,
) -> DecodeResult<ExtraPayload<'a>> {
    let size = emit::compact_size(c, s, "extra payload size")?;
    let n = c.check_length("extra payload", size.value)?;
    let mut payload = c.sub_cursor("extra payload", n)?;

    let Some(kind) = SpecialTxType::from_u16(tx_type) else {
        let start = payload.position();
        let bytes = payload.rest();
        warn!(tx_type, size = n, "extra payload present but undecoded");
        emit::note(
            s,
            "extra payload",
            start,
            n,
            format!(
                "extra payload present but undecoded (type {}, {} bytes)",
                tx_type, n
            ),
        );
        return Ok(ExtraPayload::Undecoded { tx_type, bytes });
    };

    let decoded = record(&mut payload, s, kind.payload_name(), |p, s| {
        special_tx::decode_payload(kind, p, s)
    })?;

    if !payload.is_empty() {
        let start = payload.position();
        let left = payload.remaining();
        payload.rest();
        emit::note(
            s,
            "trailing extra payload bytes",
            start,
            left,
            format!("{} bytes not covered by the {} layout", left, kind.payload_name()),
        );
    }

    Ok(ExtraPayload::Decoded(decoded))
}
