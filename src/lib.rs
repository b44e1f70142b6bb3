//! Dash P2P Wire Protocol Dissector
//!
//! Turns raw Dash network messages into a tree of labelled, offset-annotated
//! fields. The `decoder` module is usable on its own; `cli` wraps it in the
//! `dash-wire` binary.

pub mod cli;
pub mod config;
pub mod decoder;
pub mod errors;
pub mod types;
pub mod utils;
