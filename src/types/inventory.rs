//! Inventory vector types
//!
//! Values from Dash Core `protocol.h` (`GetDataMsg`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryType {
    Error = 0,
    Tx = 1,
    Block = 2,
    FilteredBlock = 3,
    TxLockRequest = 4,
    TxLockVote = 5,
    Spork = 6,
    MasternodePaymentVote = 7,
    MasternodePaymentBlock = 8,
    BudgetVote = 9,
    BudgetProposal = 10,
    BudgetFinalized = 11,
    BudgetFinalizedVote = 12,
    MasternodeQuorum = 13,
    MasternodeAnnounce = 14,
    MasternodePing = 15,
    Dstx = 16,
    GovernanceObject = 17,
    GovernanceObjectVote = 18,
    MasternodeVerify = 19,
    CmpctBlock = 20,
    QuorumFinalCommitment = 21,
    QuorumDummyCommitment = 22, // unused
    QuorumContrib = 23,
    QuorumComplaint = 24,
    QuorumJustification = 25,
    QuorumPrematureCommitment = 26,
    QuorumDebugStatus = 27,
    QuorumRecoveredSig = 28,
    Clsig = 29,
    Islock = 30,
}

impl InventoryType {
    pub fn from_u32(value: u32) -> Option<Self> {
        use InventoryType::*;
        let t = match value {
            0 => Error,
            1 => Tx,
            2 => Block,
            3 => FilteredBlock,
            4 => TxLockRequest,
            5 => TxLockVote,
            6 => Spork,
            7 => MasternodePaymentVote,
            8 => MasternodePaymentBlock,
            9 => BudgetVote,
            10 => BudgetProposal,
            11 => BudgetFinalized,
            12 => BudgetFinalizedVote,
            13 => MasternodeQuorum,
            14 => MasternodeAnnounce,
            15 => MasternodePing,
            16 => Dstx,
            17 => GovernanceObject,
            18 => GovernanceObjectVote,
            19 => MasternodeVerify,
            20 => CmpctBlock,
            21 => QuorumFinalCommitment,
            22 => QuorumDummyCommitment,
            23 => QuorumContrib,
            24 => QuorumComplaint,
            25 => QuorumJustification,
            26 => QuorumPrematureCommitment,
            27 => QuorumDebugStatus,
            28 => QuorumRecoveredSig,
            29 => Clsig,
            30 => Islock,
            _ => return None,
        };
        Some(t)
    }

    pub fn name(&self) -> &'static str {
        use InventoryType::*;
        match self {
            Error => "ERROR",
            Tx => "MSG_TX",
            Block => "MSG_BLOCK",
            FilteredBlock => "MSG_FILTERED_BLOCK",
            TxLockRequest => "MSG_TXLOCK_REQUEST",
            TxLockVote => "MSG_TXLOCK_VOTE",
            Spork => "MSG_SPORK",
            MasternodePaymentVote => "MSG_MASTERNODE_PAYMENT_VOTE",
            MasternodePaymentBlock => "MSG_MASTERNODE_PAYMENT_BLOCK",
            BudgetVote => "MSG_BUDGET_VOTE",
            BudgetProposal => "MSG_BUDGET_PROPOSAL",
            BudgetFinalized => "MSG_BUDGET_FINALIZED",
            BudgetFinalizedVote => "MSG_BUDGET_FINALIZED_VOTE",
            MasternodeQuorum => "MSG_MASTERNODE_QUORUM",
            MasternodeAnnounce => "MSG_MASTERNODE_ANNOUNCE",
            MasternodePing => "MSG_MASTERNODE_PING",
            Dstx => "MSG_DSTX",
            GovernanceObject => "MSG_GOVERNANCE_OBJECT",
            GovernanceObjectVote => "MSG_GOVERNANCE_OBJECT_VOTE",
            MasternodeVerify => "MSG_MASTERNODE_VERIFY",
            CmpctBlock => "MSG_CMPCT_BLOCK",
            QuorumFinalCommitment => "MSG_QUORUM_FINAL_COMMITMENT",
            QuorumDummyCommitment => "MSG_QUORUM_DUMMY_COMMITMENT",
            QuorumContrib => "MSG_QUORUM_CONTRIB",
            QuorumComplaint => "MSG_QUORUM_COMPLAINT",
            QuorumJustification => "MSG_QUORUM_JUSTIFICATION",
            QuorumPrematureCommitment => "MSG_QUORUM_PREMATURE_COMMITMENT",
            QuorumDebugStatus => "MSG_QUORUM_DEBUG_STATUS",
            QuorumRecoveredSig => "MSG_QUORUM_RECOVERED_SIG",
            Clsig => "MSG_CLSIG",
            Islock => "MSG_ISLOCK",
        }
    }
}

/// Display name for a raw inventory type code
pub fn inventory_type_name(value: u64) -> &'static str {
    u32::try_from(value)
        .ok()
        .and_then(InventoryType::from_u32)
        .map(|t| t.name())
        .unwrap_or("Unknown")
}
