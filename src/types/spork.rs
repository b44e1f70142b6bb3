//! Spork identifiers

/// Name of a spork ID (`nSporkID`)
pub fn spork_name(id: u64) -> &'static str {
    match id {
        10001 => "SPORK_2_INSTANTSEND_ENABLED",
        10002 => "SPORK_3_INSTANTSEND_BLOCK_FILTERING",
        10004 => "SPORK_5_INSTANTSEND_MAX_VALUE",
        10005 => "SPORK_6_NEW_SIGS",
        10007 => "SPORK_8_MASTERNODE_PAYMENT_ENFORCEMENT",
        10008 => "SPORK_9_SUPERBLOCKS_ENABLED",
        10009 => "SPORK_10_MASTERNODE_PAY_UPDATED_NODES",
        10011 => "SPORK_12_RECONSIDER_BLOCKS",
        10013 => "SPORK_14_REQUIRE_SENTINEL_FLAG",
        10014 => "SPORK_15_DETERMINISTIC_MNS_ENABLED",
        10015 => "SPORK_16_INSTANTSEND_AUTOLOCKS",
        10016 => "SPORK_17_QUORUM_DKG_ENABLED",
        10018 => "SPORK_19_CHAINLOCKS_ENABLED",
        10019 => "SPORK_20_INSTANTSEND_LLMQ_BASED",
        _ => "Unknown",
    }
}
