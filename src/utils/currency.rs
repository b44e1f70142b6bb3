//! Currency formatting utilities for Dash amounts
//!
//! Amounts travel on the wire as 64-bit duff counts. Formatting uses integer
//! arithmetic so large values keep full precision.

/// Duffs per DASH
pub const DUFFS_PER_DASH: u64 = 100_000_000;

/// Format a duff amount as dual DASH + duffs display
///
/// # Examples
/// ```
/// use dash_wire::utils::currency::format_duffs;
///
/// assert_eq!(
///     format_duffs(28125351850),
///     "281.25351850 DASH (28125351850 duffs)"
/// );
/// assert_eq!(format_duffs(5471), "0.00005471 DASH (5471 duffs)");
/// ```
pub fn format_duffs(duffs: u64) -> String {
    format!(
        "{}.{:08} DASH ({} duffs)",
        duffs / DUFFS_PER_DASH,
        duffs % DUFFS_PER_DASH,
        duffs
    )
}
