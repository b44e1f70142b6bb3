use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::network::{Network, MAX_MESSAGE_SIZE};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "dash-wire";

/// Environment variable prefix; nested keys use `__` (`DASH_WIRE_OUTPUT__FORMAT`)
pub const ENV_PREFIX: &str = "DASH_WIRE";

/// Application configuration loaded from dash-wire.toml or environment variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub decoder: DecoderConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Networks whose magic the frame layer accepts
    pub networks: Vec<Network>,
    /// Compare the header checksum against the payload
    pub verify_checksum: bool,
    /// Largest declared payload length accepted
    pub max_message_size: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            networks: Network::ALL.to_vec(),
            verify_checksum: false,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_offsets: bool,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_offsets: true,
            log_level: "error".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from dash-wire.toml and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default file when given
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let decoder = DecoderConfig::default();
        let output = OutputConfig::default();
        let networks: Vec<String> = decoder
            .networks
            .iter()
            .map(|n| network_key(*n).to_string())
            .collect();

        let file = match path {
            Some(p) => File::from(p).format(FileFormat::Toml).required(true),
            None => File::with_name(CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            // Start with default values
            .set_default("decoder.networks", networks)?
            .set_default("decoder.verify_checksum", decoder.verify_checksum)?
            .set_default("decoder.max_message_size", decoder.max_message_size as i64)?
            .set_default("output.format", "text")?
            .set_default("output.show_offsets", output.show_offsets)?
            .set_default("output.log_level", output.log_level)?
            .add_source(file)
            // DASH_WIRE_DECODER__VERIFY_CHECKSUM=true etc.
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("decoder.networks")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;

        if app_config.decoder.networks.is_empty() {
            return Err(ConfigError::Message(
                "decoder.networks must name at least one network".to_string(),
            ));
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Self {
        // Try to load config for defaults, but don't fail if not found
        Self::load().unwrap_or_else(|_| Self {
            decoder: DecoderConfig::default(),
            output: OutputConfig::default(),
        })
    }
}

/// Serialised (serde) name of a network
fn network_key(network: Network) -> &'static str {
    match network {
        Network::Mainnet => "mainnet",
        Network::Testnet => "testnet",
        Network::Regtest => "regtest",
        Network::Devnet => "devnet",
    }
}
