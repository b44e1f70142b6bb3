//! Dash P2P Wire Protocol - Type System
//!
//! - `network`: network magic values and the frame header constants
//! - `inventory`: inventory vector types
//! - `services`: service flag bits
//! - `special_tx`: special transaction type codes and provider enums
//! - `llmq`: long-living quorum types
//! - `governance`: governance object and vote codes
//! - `spork`: spork identifiers

pub mod governance;
pub mod inventory;
pub mod llmq;
pub mod network;
pub mod services;
pub mod special_tx;
pub mod spork;

pub use inventory::InventoryType;
pub use llmq::LlmqType;
pub use network::Network;
pub use special_tx::SpecialTxType;
