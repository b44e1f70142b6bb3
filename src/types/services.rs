//! Service flag bits advertised in version and addr messages

pub const NODE_NETWORK: u64 = 1 << 0;
pub const NODE_GETUTXO: u64 = 1 << 1;
pub const NODE_BLOOM: u64 = 1 << 2;

/// Names of the set bits we know about, lowest bit first
pub fn service_flag_names(services: u64) -> Vec<&'static str> {
    let mut names = Vec::new();
    if services & NODE_NETWORK != 0 {
        names.push("NETWORK");
    }
    if services & NODE_GETUTXO != 0 {
        names.push("GETUTXO");
    }
    if services & NODE_BLOOM != 0 {
        names.push("BLOOM");
    }
    names
}
