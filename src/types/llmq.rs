//! Long-living masternode quorum (LLMQ) types

use serde::{Deserialize, Serialize};

/// Quorum size/threshold profile selected by the single-byte LLMQ type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LlmqType {
    Llmq50_60 = 1,
    Llmq400_60 = 2,
    Llmq400_85 = 3,
    Llmq100_67 = 4,
    LlmqTest = 100,
    LlmqDevnet = 101,
}

impl LlmqType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Llmq50_60),
            2 => Some(Self::Llmq400_60),
            3 => Some(Self::Llmq400_85),
            4 => Some(Self::Llmq100_67),
            100 => Some(Self::LlmqTest),
            101 => Some(Self::LlmqDevnet),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Llmq50_60 => "LLMQ_50_60",
            Self::Llmq400_60 => "LLMQ_400_60",
            Self::Llmq400_85 => "LLMQ_400_85",
            Self::Llmq100_67 => "LLMQ_100_67",
            Self::LlmqTest => "LLMQ_TEST",
            Self::LlmqDevnet => "LLMQ_DEVNET",
        }
    }
}

/// Display name for a raw LLMQ type byte
pub fn llmq_type_name(value: u64) -> &'static str {
    u8::try_from(value)
        .ok()
        .and_then(LlmqType::from_u8)
        .map(|t| t.name())
        .unwrap_or("Unknown")
}
