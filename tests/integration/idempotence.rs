//! Decoding is a pure function of the input bytes

use anyhow::Result;
use dash_wire::decoder::render::{render_json, render_text};
use dash_wire::decoder::FrameDecoder;

use crate::common::{
    bare_tx, cbtx_tx, decode_frame_with, final_commitment_bytes, inv_payload, mainnet_frame,
    ping_payload, pro_reg_tx_body, sized,
};

fn sample_messages() -> Vec<Vec<u8>> {
    vec![
        mainnet_frame("ping", &ping_payload(0xfeed)),
        mainnet_frame("inv", &inv_payload(&[(1, 1), (2, 2), (3, 3)])),
        mainnet_frame("tx", &cbtx_tx(99)),
        mainnet_frame("tx", &bare_tx(3, 1, &sized(&pro_reg_tx_body()))),
        mainnet_frame("qfcommit", &final_commitment_bytes(1, 50)),
        mainnet_frame("xyz123", &[1, 2, 3]),
        mainnet_frame("inv", &[0x05]),
    ]
}

#[test]
fn test_same_buffer_same_output() -> Result<()> {
    let decoder = FrameDecoder::default();
    for bytes in sample_messages() {
        let (first_result, first_tree) = decode_frame_with(&decoder, &bytes);
        let (second_result, second_tree) = decode_frame_with(&decoder, &bytes);

        assert_eq!(first_result, second_result);
        assert_eq!(first_tree, second_tree);
        assert_eq!(render_json(&first_tree)?, render_json(&second_tree)?);
        assert_eq!(
            render_text(&first_tree, true),
            render_text(&second_tree, true)
        );
    }
    Ok(())
}

#[test]
fn test_interleaved_messages_do_not_interfere() {
    let decoder = FrameDecoder::default();
    let messages = sample_messages();

    let isolated: Vec<_> = messages
        .iter()
        .map(|bytes| decode_frame_with(&FrameDecoder::default(), bytes))
        .collect();

    // Decode everything twice through one shared decoder, in reverse the second time
    for (bytes, expected) in messages.iter().zip(&isolated) {
        assert_eq!(&decode_frame_with(&decoder, bytes), expected);
    }
    for (bytes, expected) in messages.iter().zip(&isolated).rev() {
        assert_eq!(&decode_frame_with(&decoder, bytes), expected);
    }
}

#[test]
fn test_concurrent_decoding() {
    let decoder = FrameDecoder::default();
    let messages = sample_messages();
    let expected: Vec<_> = messages
        .iter()
        .map(|bytes| decode_frame_with(&decoder, bytes))
        .collect();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for (bytes, want) in messages.iter().zip(&expected) {
                    assert_eq!(&decode_frame_with(&decoder, bytes), want);
                }
            });
        }
    });
}
