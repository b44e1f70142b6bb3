//! Configuration layering and the CLI commands run against real inputs

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use dash_wire::cli::commands::decode::DecodeCommand;
use dash_wire::cli::commands::payload::PayloadCommand;
use dash_wire::cli::commands::stream::StreamCommand;
use dash_wire::cli::commands::{render, InputArgs, OutputArgs};
use dash_wire::cli::{Cli, Commands};
use dash_wire::config::{AppConfig, OutputFormat};
use dash_wire::decoder::{DecoderRegistry, FrameDecoder, TreeSink};
use dash_wire::errors::AppError;
use dash_wire::types::Network;
use serial_test::serial;

use crate::common::{inv_payload, mainnet_frame, ping_payload};

fn hex_input(bytes: &[u8]) -> InputArgs {
    InputArgs {
        hex: Some(hex::encode(bytes)),
        file: None,
    }
}

#[test]
#[serial]
fn test_config_file_drives_frame_decoder() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        "[decoder]\nnetworks = [\"mainnet\", \"regtest\"]\nverify_checksum = true\nmax_message_size = 1024"
    )?;

    let config = AppConfig::load_from(Some(file.path()))?;
    assert_eq!(config.decoder.networks, vec![Network::Mainnet, Network::Regtest]);
    assert_eq!(config.decoder.max_message_size, 1024);

    let decoder = FrameDecoder::from_config(DecoderRegistry::dash(), &config.decoder);
    let mut sink = TreeSink::new("message");
    let report = decoder.decode_message(&mainnet_frame("ping", &ping_payload(1)), &mut sink)?;
    assert_eq!(report.checksum_valid, Some(true));
    assert_eq!(decoder.max_message_size(), 1024);
    Ok(())
}

#[test]
#[serial]
fn test_environment_overrides_file() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "[output]\nformat = \"text\"\nshow_offsets = true")?;

    std::env::set_var("DASH_WIRE_OUTPUT__FORMAT", "json");
    let config = AppConfig::load_from(Some(file.path()));
    std::env::remove_var("DASH_WIRE_OUTPUT__FORMAT");

    let config = config?;
    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(config.output.show_offsets);
    Ok(())
}

#[test]
#[serial]
fn test_empty_network_list_is_rejected() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "[decoder]\nnetworks = []")?;
    assert!(AppConfig::load_from(Some(file.path())).is_err());
    Ok(())
}

#[test]
#[serial]
fn test_cli_overrides_configuration() -> Result<()> {
    let output = OutputArgs {
        format: Some(OutputFormat::Json),
        config: None,
        verify_checksum: true,
        no_offsets: true,
    };
    let config = output.load_config()?;
    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(config.decoder.verify_checksum);
    assert!(!config.output.show_offsets);

    let mut sink = TreeSink::new("message");
    FrameDecoder::default().decode_message(&mainnet_frame("ping", &ping_payload(1)), &mut sink)?;
    let json = render(&sink.finish(), &config)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["children"][1]["label"], "ping");
    Ok(())
}

#[test]
fn test_parse_subcommands() {
    let cli = Cli::try_parse_from(["dash-wire", "decode", "--file", "capture.bin", "--verify-checksum"])
        .expect("decode parses");
    match cli.command {
        Commands::Decode(cmd) => {
            assert_eq!(cmd.input.file.as_deref(), Some(std::path::Path::new("capture.bin")));
            assert!(cmd.output.verify_checksum);
        }
        _ => panic!("expected decode"),
    }

    let cli = Cli::try_parse_from(["dash-wire", "stream", "--file", "c.bin", "--limit", "3"])
        .expect("stream parses");
    assert!(matches!(cli.command, Commands::Stream(ref s) if s.limit == Some(3)));

    assert!(Cli::try_parse_from(["dash-wire", "commands"]).is_ok());
    assert!(Cli::try_parse_from(["dash-wire", "decode", "--format", "xml", "00"]).is_err());
}

#[test]
#[serial]
fn test_decode_command_results() {
    let ok = DecodeCommand {
        input: hex_input(&mainnet_frame("inv", &inv_payload(&[(1, 0x01)]))),
        output: OutputArgs::default(),
    };
    assert!(ok.run().is_ok());

    // Unknown commands and malformed payloads are reports, not failures
    let unknown = DecodeCommand {
        input: hex_input(&mainnet_frame("xyz123", &[1, 2])),
        output: OutputArgs::default(),
    };
    assert!(unknown.run().is_ok());

    let bytes = mainnet_frame("ping", &ping_payload(1));
    let truncated = DecodeCommand {
        input: hex_input(&bytes[..23]),
        output: OutputArgs::default(),
    };
    assert!(matches!(truncated.run(), Err(AppError::Decode(_))));

    let bad_hex = DecodeCommand {
        input: InputArgs {
            hex: Some("0xzz".to_string()),
            file: None,
        },
        output: OutputArgs::default(),
    };
    assert!(matches!(bad_hex.run(), Err(AppError::Hex(_))));
}

#[test]
#[serial]
fn test_payload_command() {
    let ping = PayloadCommand {
        command: "ping".to_string(),
        input: hex_input(&ping_payload(0x1122_3344_5566_7788)),
        output: OutputArgs::default(),
    };
    assert!(ping.run().is_ok());

    let unknown = PayloadCommand {
        command: "xyz123".to_string(),
        input: hex_input(&[0x00]),
        output: OutputArgs::default(),
    };
    assert!(matches!(unknown.run(), Err(AppError::UnknownCommand(name)) if name == "xyz123"));
}

#[test]
#[serial]
fn test_stream_command_reads_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(&mainnet_frame("ping", &ping_payload(1)))?;
    file.write_all(&mainnet_frame("verack", &[]))?;
    // half a message at the end is left buffered
    file.write_all(&mainnet_frame("pong", &ping_payload(1))[..12])?;
    file.flush()?;

    let command = StreamCommand {
        file: file.path().to_path_buf(),
        limit: None,
        output: OutputArgs {
            format: Some(OutputFormat::Json),
            ..OutputArgs::default()
        },
    };
    command.run()?;

    let missing = StreamCommand {
        file: "/nonexistent/capture.bin".into(),
        limit: None,
        output: OutputArgs::default(),
    };
    assert!(matches!(missing.run(), Err(AppError::Io(_))));
    Ok(())
}
