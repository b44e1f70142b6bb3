use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Dash P2P Wire Protocol Decoder
#[derive(Parser)]
#[command(name = "dash-wire")]
#[command(about = "Dash P2P Wire Protocol Decoder")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Decode one framed message (24-byte header plus payload)
    Decode(commands::decode::DecodeCommand),
    /// Split a captured byte stream into messages and decode each in order
    Stream(commands::stream::StreamCommand),
    /// Decode a bare payload with the decoder registered for COMMAND
    Payload(commands::payload::PayloadCommand),
    /// List the registered command names
    Commands(commands::list::ListCommand),
}

/// Initialise the tracing subscriber
///
/// Uses RUST_LOG when set, otherwise `default_level` (from configuration).
pub fn init_tracing(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .try_init();
}

pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(command) => command.run(),
        Commands::Stream(command) => command.run(),
        Commands::Payload(command) => command.run(),
        Commands::Commands(command) => command.run(),
    }
}
