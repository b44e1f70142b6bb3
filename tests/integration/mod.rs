//! Integration Tests Module
//!
//! Whole messages through the frame layer, the stream framer and the CLI
//! configuration.

pub mod cli_config;
pub mod frame_dispatch;
pub mod idempotence;
pub mod scenarios;
pub mod stream;
