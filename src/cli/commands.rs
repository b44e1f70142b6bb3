//! CLI subcommands and the options they share

pub mod decode;
pub mod list;
pub mod payload;
pub mod stream;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use crate::config::{AppConfig, OutputFormat};
use crate::decoder::render::{render_json, render_text};
use crate::decoder::{FieldNode, FrameOutcome, FrameReport};
use crate::errors::{AppError, AppResult};

/// Where the bytes to decode come from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Input as hex (whitespace and a leading 0x are ignored)
    pub hex: Option<String>,

    /// Read raw bytes from a file instead
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    pub fn read(&self) -> AppResult<Vec<u8>> {
        match (&self.hex, &self.file) {
            (Some(hex), _) => parse_hex(hex),
            (None, Some(path)) => read_file(path),
            (None, None) => Err(AppError::InvalidData(
                "no input given: pass hex or --file".to_string(),
            )),
        }
    }
}

/// Parse hex text, ignoring whitespace and an optional 0x prefix
pub fn parse_hex(text: &str) -> AppResult<Vec<u8>> {
    let cleaned: String = text.split_whitespace().collect();
    let cleaned = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
        .unwrap_or(&cleaned);
    Ok(hex::decode(cleaned)?)
}

fn read_file(path: &Path) -> AppResult<Vec<u8>> {
    info!("Reading input from {}", path.display());
    Ok(fs::read(path)?)
}

/// Output and configuration options shared by the decoding commands
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format (overrides configuration)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file (default: ./dash-wire.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verify the header checksum against the payload
    #[arg(long)]
    pub verify_checksum: bool,

    /// Hide byte offsets in text output
    #[arg(long)]
    pub no_offsets: bool,
}

impl OutputArgs {
    /// Load configuration, apply CLI overrides and start logging
    pub fn load_config(&self) -> AppResult<AppConfig> {
        let mut config = AppConfig::load_from(self.config.as_deref())
            .map_err(|e| AppError::Config(format!("Failed to load configuration: {}", e)))?;

        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.verify_checksum {
            config.decoder.verify_checksum = true;
        }
        if self.no_offsets {
            config.output.show_offsets = false;
        }

        super::init_tracing(&config.output.log_level);
        Ok(config)
    }
}

/// One-line description of how a message ended
pub fn outcome_summary(report: &FrameReport) -> String {
    let mut summary = match &report.outcome {
        FrameOutcome::Decoded => format!("decoded {} ({} bytes)", report.header.command, report.header.length),
        FrameOutcome::UnknownMagic { magic } => {
            format!("unknown magic 0x{:08x}: not a Dash message", magic)
        }
        FrameOutcome::UnknownCommand { command, length } => {
            format!("unknown command '{}' ({} bytes)", command, length)
        }
        FrameOutcome::Malformed { command, error } => {
            format!("malformed {} message: {} [{}]", command, error, error.kind())
        }
    };
    if report.checksum_mismatch() {
        summary.push_str("; checksum mismatch");
    }
    if report.trailing > 0 {
        summary.push_str(&format!("; {} bytes after the message", report.trailing));
    }
    summary
}

/// Render a tree in the configured format
pub fn render(tree: &FieldNode, config: &AppConfig) -> AppResult<String> {
    match config.output.format {
        OutputFormat::Text => Ok(render_text(tree, config.output.show_offsets)),
        OutputFormat::Json => Ok(render_json(tree)?),
    }
}
