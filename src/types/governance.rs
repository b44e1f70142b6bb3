//! Governance object and vote codes

/// Governance object type (`nObjectType`)
pub fn object_type_name(value: u64) -> &'static str {
    match value {
        0 => "Unknown",
        1 => "Proposal",
        2 => "Trigger",
        3 => "Watchdog",
        _ => "Unknown",
    }
}

/// Vote signal (`nVoteSignal`)
pub fn vote_signal_name(value: u64) -> &'static str {
    match value {
        0 => "None",
        1 => "Funding",
        2 => "Valid",
        3 => "Delete",
        4 => "Endorsed",
        _ => "Unknown",
    }
}

/// Vote outcome (`nVoteOutcome`)
pub fn vote_outcome_name(value: u64) -> &'static str {
    match value {
        0 => "None",
        1 => "Yes",
        2 => "No",
        3 => "Abstain",
        _ => "Unknown",
    }
}

/// PrivateSend pool state carried in `dssu`
pub fn pool_state_name(value: u64) -> &'static str {
    match value {
        0 => "POOL_STATE_IDLE",
        1 => "POOL_STATE_QUEUE",
        2 => "POOL_STATE_ACCEPTING_ENTRIES",
        3 => "POOL_STATE_SIGNING",
        4 => "POOL_STATE_ERROR",
        5 => "POOL_STATE_SUCCESS",
        _ => "Unknown",
    }
}

/// PrivateSend status update carried in `dssu`
pub fn pool_status_name(value: u64) -> &'static str {
    match value {
        0 => "STATUS_REJECTED",
        1 => "STATUS_ACCEPTED",
        _ => "Unknown",
    }
}
