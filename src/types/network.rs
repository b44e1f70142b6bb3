//! Dash network identifiers and frame header constants
//!
//! Magic values are compared as the big-endian u32 formed by the first four
//! bytes of the frame. An unrecognised value means the bytes are not a Dash
//! message at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the fixed frame header: magic(4) + command(12) + length(4) + checksum(4)
pub const HEADER_SIZE: usize = 24;

/// Width of the NUL-padded command name
pub const COMMAND_SIZE: usize = 12;

/// Dash Core `MAX_SIZE`, the largest payload a peer will accept
pub const MAX_MESSAGE_SIZE: usize = 0x0200_0000;

pub const MAGIC_MAINNET: u32 = 0xBF0C_6BBD;
pub const MAGIC_TESTNET: u32 = 0xCEE2_CAFF;
pub const MAGIC_REGTEST: u32 = 0xFCC1_B7DC;
pub const MAGIC_DEVNET: u32 = 0xE2CA_FFCE;

/// Dash network variants recognised by the frame layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
    Devnet,
}

impl Network {
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Testnet,
        Network::Regtest,
        Network::Devnet,
    ];

    pub fn from_magic(magic: u32) -> Option<Self> {
        match magic {
            MAGIC_MAINNET => Some(Self::Mainnet),
            MAGIC_TESTNET => Some(Self::Testnet),
            MAGIC_REGTEST => Some(Self::Regtest),
            MAGIC_DEVNET => Some(Self::Devnet),
            _ => None,
        }
    }

    pub fn magic(&self) -> u32 {
        match self {
            Self::Mainnet => MAGIC_MAINNET,
            Self::Testnet => MAGIC_TESTNET,
            Self::Regtest => MAGIC_REGTEST,
            Self::Devnet => MAGIC_DEVNET,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet3",
            Self::Regtest => "regtest",
            Self::Devnet => "devnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of a `reject` message code
pub fn reject_code_name(code: u64) -> &'static str {
    match code {
        0x01 => "REJECT_MALFORMED",
        0x10 => "REJECT_INVALID",
        0x11 => "REJECT_OBSOLETE",
        0x12 => "REJECT_DUPLICATE",
        0x40 => "REJECT_NONSTANDARD",
        0x41 => "REJECT_DUST",
        0x42 => "REJECT_INSUFFICIENTFEE",
        0x43 => "REJECT_CHECKPOINT",
        _ => "Unknown",
    }
}

/// Name of a `filterload` update flag
pub fn bloom_flag_name(flag: u64) -> &'static str {
    match flag {
        0 => "BLOOM_UPDATE_NONE",
        1 => "BLOOM_UPDATE_ALL",
        2 => "BLOOM_UPDATE_P2PUBKEY_ONLY",
        _ => "Unknown",
    }
}
