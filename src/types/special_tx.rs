//! Special transaction (DIP2) type codes and provider enums

use serde::{Deserialize, Serialize};

/// `Transaction.type` values that carry an extra payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialTxType {
    ProviderRegister = 1,
    ProviderUpdateService = 2,
    ProviderUpdateRegistrar = 3,
    ProviderUpdateRevoke = 4,
    Coinbase = 5,
    QuorumCommitment = 6,
}

impl SpecialTxType {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::ProviderRegister),
            2 => Some(Self::ProviderUpdateService),
            3 => Some(Self::ProviderUpdateRegistrar),
            4 => Some(Self::ProviderUpdateRevoke),
            5 => Some(Self::Coinbase),
            6 => Some(Self::QuorumCommitment),
            _ => None,
        }
    }

    /// Short payload name as used in Dash Core (`ProRegTx`, `CbTx`, ...)
    pub fn payload_name(&self) -> &'static str {
        match self {
            Self::ProviderRegister => "ProRegTx",
            Self::ProviderUpdateService => "ProUpServTx",
            Self::ProviderUpdateRegistrar => "ProUpRegTx",
            Self::ProviderUpdateRevoke => "ProUpRevTx",
            Self::Coinbase => "CbTx",
            Self::QuorumCommitment => "QcTx",
        }
    }
}

/// Display name for a raw transaction type
pub fn tx_type_name(value: u64) -> &'static str {
    match value {
        0 => "TRANSACTION_NORMAL",
        1 => "TRANSACTION_PROVIDER_REGISTER",
        2 => "TRANSACTION_PROVIDER_UPDATE_SERVICE",
        3 => "TRANSACTION_PROVIDER_UPDATE_REGISTRAR",
        4 => "TRANSACTION_PROVIDER_UPDATE_REVOKE",
        5 => "TRANSACTION_COINBASE",
        6 => "TRANSACTION_QUORUM_COMMITMENT",
        _ => "Unknown",
    }
}

/// Provider type in ProRegTx
pub fn provider_type_name(value: u64) -> &'static str {
    match value {
        0 => "Regular masternode",
        _ => "Unknown",
    }
}

/// Provider mode in ProRegTx / ProUpRegTx
pub fn provider_mode_name(value: u64) -> &'static str {
    match value {
        0 => "Default",
        _ => "Unknown",
    }
}

/// Revocation reason in ProUpRevTx
pub fn revocation_reason_name(value: u64) -> &'static str {
    match value {
        0 => "Not specified",
        1 => "Termination of service",
        2 => "Compromised keys",
        3 => "Change of keys",
        _ => "Unknown",
    }
}
