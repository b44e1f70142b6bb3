//! Splitting a captured byte stream into messages

use anyhow::Result;
use dash_wire::decoder::{DecodeError, FrameDecoder, FrameOutcome, FrameState, Framer};

use crate::common::{cbtx_tx, decode_frame_with, inv_payload, mainnet_frame, ping_payload};

fn capture() -> Vec<Vec<u8>> {
    vec![
        mainnet_frame("version", &[]),
        mainnet_frame("verack", &[]),
        mainnet_frame("ping", &ping_payload(1)),
        mainnet_frame("inv", &inv_payload(&[(2, 0x10)])),
        mainnet_frame("tx", &cbtx_tx(7)),
    ]
}

#[test]
fn test_chunked_stream_yields_each_message() -> Result<()> {
    let frames = capture();
    let stream: Vec<u8> = frames.concat();

    for chunk_size in [1usize, 7, 24, 100, stream.len()] {
        let mut framer = Framer::default();
        let mut out = Vec::new();
        for chunk in stream.chunks(chunk_size) {
            framer.push(chunk);
            while let Some(frame) = framer.next_frame()? {
                out.push(frame);
            }
        }
        assert_eq!(out, frames, "chunk size {}", chunk_size);
        assert_eq!(framer.buffered(), 0);
        assert_eq!(framer.state(), &FrameState::AwaitingHeader);
    }
    Ok(())
}

#[test]
fn test_decode_each_frame() -> Result<()> {
    let decoder = FrameDecoder::default();
    let mut framer = Framer::default();
    framer.push(&capture().concat());

    let mut outcomes = Vec::new();
    while let Some(frame) = framer.next_frame()? {
        let (result, _) = decode_frame_with(&decoder, &frame);
        let report = result?;
        outcomes.push((report.header.command.clone(), report.outcome));
    }

    assert_eq!(outcomes.len(), 5);
    // An empty version payload is malformed, the stream carries on regardless
    assert!(matches!(outcomes[0].1, FrameOutcome::Malformed { .. }));
    assert!(outcomes[1..]
        .iter()
        .all(|(_, outcome)| *outcome == FrameOutcome::Decoded));
    assert_eq!(outcomes[4].0, "tx");
    Ok(())
}

#[test]
fn test_partial_message_waits() -> Result<()> {
    let bytes = mainnet_frame("ping", &ping_payload(3));
    let mut framer = Framer::default();

    framer.push(&bytes[..10]);
    assert_eq!(framer.next_frame()?, None);
    assert_eq!(framer.state(), &FrameState::AwaitingHeader);

    framer.push(&bytes[10..28]);
    assert_eq!(framer.next_frame()?, None);
    assert!(matches!(framer.state(), FrameState::AwaitingPayload { header } if header.length == 8));
    assert_eq!(framer.buffered(), 28);

    framer.push(&bytes[28..]);
    assert_eq!(framer.next_frame()?, Some(bytes));
    Ok(())
}

#[test]
fn test_oversized_declaration_stops_the_stream() {
    let mut framer = Framer::new(16);
    framer.push(&mainnet_frame("ping", &[0u8; 32]));
    assert!(matches!(
        framer.next_frame(),
        Err(DecodeError::OffsetOverflow {
            field: "payload",
            declared: 32,
            ..
        })
    ));
    assert!(framer.next_frame().is_err());
}
