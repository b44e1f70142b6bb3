//! Frame-level outcomes: unknown commands, networks, checksums and limits

use anyhow::Result;
use dash_wire::decoder::{DecodeError, DecoderRegistry, FieldNode, FrameDecoder, FrameOutcome};
use dash_wire::types::Network;

use crate::common::{
    decode_frame, decode_frame_with, frame, mainnet_frame, ping_payload, value_of,
};

fn count_labels(node: &FieldNode) -> usize {
    1 + node.children.iter().map(count_labels).sum::<usize>()
}

#[test]
fn test_unknown_command_is_reported_once() -> Result<()> {
    let payloads: [Vec<u8>; 4] = [
        vec![],
        vec![0x00],
        ping_payload(7),
        (0u8..=255).collect(),
    ];

    for payload in payloads {
        let bytes = mainnet_frame("xyz123", &payload);
        let (result, tree) = decode_frame(&bytes);
        let report = result?;

        assert_eq!(
            report.outcome,
            FrameOutcome::UnknownCommand {
                command: "xyz123".to_string(),
                length: payload.len() as u32,
            }
        );
        assert_eq!(report.unparsed_payload, payload.len());

        let notes = tree.find_all("unknown command");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].offset, 24);
        assert_eq!(notes[0].length, payload.len());
        assert!(tree.find("xyz123").is_none());

        // root, header record, four header fields and the note
        assert_eq!(count_labels(&tree), 7);
    }
    Ok(())
}

#[test]
fn test_custom_registry_decodes_extra_command() -> Result<()> {
    let mut registry = DecoderRegistry::dash();
    registry.register("xyz123", dash_wire::decoder::messages::network::ping);
    let decoder = FrameDecoder::new(registry);

    let (result, tree) = decode_frame_with(&decoder, &mainnet_frame("xyz123", &ping_payload(9)));
    assert!(result?.is_decoded());
    assert_eq!(value_of(tree.find("nonce").expect("nonce")), "0x0000000000000009");
    Ok(())
}

#[test]
fn test_malformed_payload_keeps_partial_fields() -> Result<()> {
    // inv announcing two vectors but carrying one
    let mut payload = vec![0x02];
    payload.extend_from_slice(&1u32.to_le_bytes());
    payload.extend_from_slice(&[0x11; 32]);
    let (result, tree) = decode_frame(&mainnet_frame("inv", &payload));
    let report = result?;

    match &report.outcome {
        FrameOutcome::Malformed { command, error } => {
            assert_eq!(command, "inv");
            assert_eq!(error.kind(), "TruncatedInput");
            assert_eq!(error.offset(), 24 + 37);
        }
        other => panic!("expected Malformed, got {:?}", other),
    }
    assert_eq!(tree.find_all("inventory vector").len(), 2);
    Ok(())
}

#[test]
fn test_unaccepted_network() -> Result<()> {
    let decoder = FrameDecoder::default().with_networks(vec![Network::Mainnet]);
    let bytes = frame(Network::Testnet, "ping", &ping_payload(1));
    let (result, tree) = decode_frame_with(&decoder, &bytes);
    let report = result?;

    assert_eq!(
        report.outcome,
        FrameOutcome::UnknownMagic {
            magic: Network::Testnet.magic()
        }
    );
    assert_eq!(report.network, Some(Network::Testnet));
    assert!(tree.find("ping").is_none());

    let mut foreign = bytes.clone();
    foreign[..4].copy_from_slice(&0xf9be_b4d9u32.to_be_bytes());
    let (result, tree) = decode_frame(&foreign);
    assert_eq!(result?.network, None);
    assert!(value_of(tree.find("magic").expect("magic")).contains("unknown network"));
    Ok(())
}

#[test]
fn test_checksum_verification() -> Result<()> {
    let decoder = FrameDecoder::default().with_checksum_verification(true);
    let mut bytes = mainnet_frame("ping", &ping_payload(5));

    let (result, tree) = decode_frame_with(&decoder, &bytes);
    let report = result?;
    assert_eq!(report.checksum_valid, Some(true));
    assert_eq!(value_of(tree.find("checksum status").expect("status")), "valid");

    bytes[20] ^= 0xff;
    let (result, tree) = decode_frame_with(&decoder, &bytes);
    let report = result?;
    // A mismatch is reported but the payload is still decoded
    assert!(report.checksum_mismatch());
    assert!(report.is_decoded());
    assert!(value_of(tree.find("checksum status").expect("status")).starts_with("mismatch"));
    assert!(tree.find("nonce").is_some());

    let (result, _) = decode_frame(&bytes);
    assert_eq!(result?.checksum_valid, None);
    Ok(())
}

#[test]
fn test_length_limits() {
    let bytes = mainnet_frame("ping", &ping_payload(5));

    let decoder = FrameDecoder::default().with_max_message_size(4);
    let (result, _) = decode_frame_with(&decoder, &bytes);
    assert!(matches!(
        result,
        Err(DecodeError::OffsetOverflow {
            field: "payload",
            declared: 8,
            ..
        })
    ));

    let (result, tree) = decode_frame(&bytes[..28]);
    assert!(matches!(
        result,
        Err(DecodeError::TruncatedInput {
            field: "payload",
            offset: 24,
            needed: 8,
            available: 4,
        })
    ));
    assert!(tree.find("nonce").is_none());
}

#[test]
fn test_trailing_bytes_are_counted() -> Result<()> {
    let mut bytes = mainnet_frame("verack", &[]);
    bytes.extend_from_slice(&[0x00; 5]);
    let (result, _) = decode_frame(&bytes);
    let report = result?;
    assert!(report.is_decoded());
    assert_eq!(report.trailing, 5);
    Ok(())
}

#[test]
fn test_payload_longer_than_layout() -> Result<()> {
    let mut payload = ping_payload(5);
    payload.extend_from_slice(&[0xee; 3]);
    let (result, tree) = decode_frame(&mainnet_frame("pong", &payload));
    let report = result?;
    assert!(report.is_decoded());
    assert_eq!(report.unparsed_payload, 3);
    let note = tree.find("unparsed trailing bytes").expect("note");
    assert_eq!((note.offset, note.length), (32, 3));
    Ok(())
}
