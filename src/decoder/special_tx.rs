//! DIP2 special transaction payloads
//!
//! `SpecialTxPayload` is a closed set selected by `Transaction.type`. Each
//! decoder runs on a cursor bounded by the declared extra-payload size.

use std::net::IpAddr;

use super::compound::{self, Outpoint, BLS_PUBLIC_KEY_SIZE, BLS_SIGNATURE_SIZE};
use super::cursor::Cursor;
use super::emit;
use super::llmq::{self, FinalCommitment};
use super::sink::FieldSink;
use super::DecodeResult;
use crate::types::special_tx::{
    provider_mode_name, provider_type_name, revocation_reason_name, SpecialTxType,
};

/// Provider registration (type 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProRegTx<'a> {
    pub version: u16,
    pub provider_type: u16,
    pub mode: u16,
    pub collateral_outpoint: Outpoint<'a>,
    pub ip: IpAddr,
    pub port: u16,
    pub owner_key_id: &'a [u8; 20],
    pub operator_pubkey: &'a [u8; BLS_PUBLIC_KEY_SIZE],
    pub voting_key_id: &'a [u8; 20],
    pub operator_reward: u16,
    pub payout_script: &'a [u8],
    pub inputs_hash: &'a [u8; 32],
    pub payload_sig: &'a [u8],
}

/// Provider service update (type 2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProUpServTx<'a> {
    pub version: u16,
    pub pro_tx_hash: &'a [u8; 32],
    pub ip: IpAddr,
    pub port: u16,
    pub operator_payout_script: &'a [u8],
    pub inputs_hash: &'a [u8; 32],
    pub payload_sig: &'a [u8; BLS_SIGNATURE_SIZE],
}

/// Provider registrar update (type 3)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProUpRegTx<'a> {
    pub version: u16,
    pub pro_tx_hash: &'a [u8; 32],
    pub mode: u16,
    pub operator_pubkey: &'a [u8; BLS_PUBLIC_KEY_SIZE],
    pub voting_key_id: &'a [u8; 20],
    pub payout_script: &'a [u8],
    pub inputs_hash: &'a [u8; 32],
    pub payload_sig: &'a [u8],
}

/// Provider revocation (type 4)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProUpRevTx<'a> {
    pub version: u16,
    pub pro_tx_hash: &'a [u8; 32],
    pub reason: u16,
    pub inputs_hash: &'a [u8; 32],
    pub payload_sig: &'a [u8; BLS_SIGNATURE_SIZE],
}

/// Coinbase payload (type 5)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CbTx<'a> {
    pub version: u16,
    pub height: u32,
    pub merkle_root_mn_list: &'a [u8; 32],
    pub merkle_root_quorums: &'a [u8; 32],
}

/// Quorum commitment (type 6)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QcTx<'a> {
    pub version: u16,
    pub height: u32,
    pub commitment: FinalCommitment<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialTxPayload<'a> {
    ProRegTx(ProRegTx<'a>),
    ProUpServTx(ProUpServTx<'a>),
    ProUpRegTx(ProUpRegTx<'a>),
    ProUpRevTx(ProUpRevTx<'a>),
    CbTx(CbTx<'a>),
    QcTx(QcTx<'a>),
}

impl SpecialTxPayload<'_> {
    pub fn tx_type(&self) -> SpecialTxType {
        match self {
            SpecialTxPayload::ProRegTx(_) => SpecialTxType::ProviderRegister,
            SpecialTxPayload::ProUpServTx(_) => SpecialTxType::ProviderUpdateService,
            SpecialTxPayload::ProUpRegTx(_) => SpecialTxType::ProviderUpdateRegistrar,
            SpecialTxPayload::ProUpRevTx(_) => SpecialTxType::ProviderUpdateRevoke,
            SpecialTxPayload::CbTx(_) => SpecialTxType::Coinbase,
            SpecialTxPayload::QcTx(_) => SpecialTxType::QuorumCommitment,
        }
    }
}

/// Decode the payload layout for `kind`
pub fn decode_payload<'a>(
    kind: SpecialTxType,
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
) -> DecodeResult<SpecialTxPayload<'a>> {
    let payload = match kind {
        SpecialTxType::ProviderRegister => SpecialTxPayload::ProRegTx(pro_reg_tx(c, s)?),
        SpecialTxType::ProviderUpdateService => {
            SpecialTxPayload::ProUpServTx(pro_up_serv_tx(c, s)?)
        }
        SpecialTxType::ProviderUpdateRegistrar => {
            SpecialTxPayload::ProUpRegTx(pro_up_reg_tx(c, s)?)
        }
        SpecialTxType::ProviderUpdateRevoke => SpecialTxPayload::ProUpRevTx(pro_up_rev_tx(c, s)?),
        SpecialTxType::Coinbase => SpecialTxPayload::CbTx(cb_tx(c, s)?),
        SpecialTxType::QuorumCommitment => SpecialTxPayload::QcTx(qc_tx(c, s)?),
    };
    Ok(payload)
}

pub fn pro_reg_tx<'a>(c: &mut Cursor<'a>, s: &mut dyn FieldSink) -> DecodeResult<ProRegTx<'a>> {
    let version = emit::u16_le(c, s, "version")?;
    let provider_type = emit::named_u16(c, s, "type", provider_type_name)?;
    let mode = emit::named_u16(c, s, "mode", provider_mode_name)?;
    let collateral_outpoint = compound::outpoint(c, s, "collateral outpoint")?;
    let ip = compound::ip_address(c, s, "address")?;
    let port = emit::u16_be(c, s, "port")?;
    let owner_key_id = emit::array::<20>(c, s, "owner key id")?;
    let operator_pubkey = compound::bls_public_key(c, s, "operator public key")?;
    let voting_key_id = emit::array::<20>(c, s, "voting key id")?;
    let operator_reward = emit::u16_le(c, s, "operator reward")?;
    let payout_script = emit::var_bytes(c, s, "payout script length", "payout script")?;
    let inputs_hash = emit::hash(c, s, "inputs hash")?;
    let payload_sig = emit::var_bytes(c, s, "payload signature length", "payload signature")?;

    Ok(ProRegTx {
        version,
        provider_type,
        mode,
        collateral_outpoint,
        ip,
        port,
        owner_key_id,
        operator_pubkey,
        voting_key_id,
        operator_reward,
        payout_script,
        inputs_hash,
        payload_sig,
    })
}

/// The signature is read at the cursor, directly after `inputsHash`
pub fn pro_up_serv_tx<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
) -> DecodeResult<ProUpServTx<'a>> {
    let version = emit::u16_le(c, s, "version")?;
    let pro_tx_hash = emit::hash(c, s, "pro tx hash")?;
    let ip = compound::ip_address(c, s, "address")?;
    let port = emit::u16_be(c, s, "port")?;
    let operator_payout_script = emit::var_bytes(
        c,
        s,
        "operator payout script length",
        "operator payout script",
    )?;
    let inputs_hash = emit::hash(c, s, "inputs hash")?;
    let payload_sig = compound::bls_signature(c, s, "payload signature")?;

    Ok(ProUpServTx {
        version,
        pro_tx_hash,
        ip,
        port,
        operator_payout_script,
        inputs_hash,
        payload_sig,
    })
}

pub fn pro_up_reg_tx<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
) -> DecodeResult<ProUpRegTx<'a>> {
    let version = emit::u16_le(c, s, "version")?;
    let pro_tx_hash = emit::hash(c, s, "pro tx hash")?;
    let mode = emit::named_u16(c, s, "mode", provider_mode_name)?;
    let operator_pubkey = compound::bls_public_key(c, s, "operator public key")?;
    let voting_key_id = emit::array::<20>(c, s, "voting key id")?;
    let payout_script = emit::var_bytes(c, s, "payout script length", "payout script")?;
    let inputs_hash = emit::hash(c, s, "inputs hash")?;
    let payload_sig = emit::var_bytes(c, s, "payload signature length", "payload signature")?;

    Ok(ProUpRegTx {
        version,
        pro_tx_hash,
        mode,
        operator_pubkey,
        voting_key_id,
        payout_script,
        inputs_hash,
        payload_sig,
    })
}

pub fn pro_up_rev_tx<'a>(
    c: &mut Cursor<'a>,
    s: &mut dyn FieldSink,
) -> DecodeResult<ProUpRevTx<'a>> {
    let version = emit::u16_le(c, s, "version")?;
    let pro_tx_hash = emit::hash(c, s, "pro tx hash")?;
    let reason = emit::named_u16(c, s, "reason", revocation_reason_name)?;
    let inputs_hash = emit::hash(c, s, "inputs hash")?;
    let payload_sig = compound::bls_signature(c, s, "payload signature")?;

    Ok(ProUpRevTx {
        version,
        pro_tx_hash,
        reason,
        inputs_hash,
        payload_sig,
    })
}

pub fn cb_tx<'a>(c: &mut Cursor<'a>, s: &mut dyn FieldSink) -> DecodeResult<CbTx<'a>> {
    let version = emit::u16_le(c, s, "version")?;
    let height = emit::u32_le(c, s, "height")?;
    let merkle_root_mn_list = emit::hash(c, s, "masternode list merkle root")?;
    let merkle_root_quorums = emit::hash(c, s, "quorum merkle root")?;

    Ok(CbTx {
        version,
        height,
        merkle_root_mn_list,
        merkle_root_quorums,
    })
}

pub fn qc_tx<'a>(c: &mut Cursor<'a>, s: &mut dyn FieldSink) -> DecodeResult<QcTx<'a>> {
    let version = emit::u16_le(c, s, "version")?;
    let height = emit::u32_le(c, s, "height")?;
    let commitment = llmq::final_commitment(c, s, "commitment")?;
    Ok(QcTx {
        version,
        height,
        commitment,
    })
}
