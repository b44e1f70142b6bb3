//! Display helpers shared by the decoder and the CLI
//!
//! - `currency`: duff amounts as DASH
//! - `time`: wire timestamps as UTC date-times

pub mod currency;
pub mod time;
