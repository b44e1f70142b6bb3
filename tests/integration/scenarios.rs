//! Reference messages decoded end to end

use anyhow::Result;
use dash_wire::decoder::{DecodeError, FrameOutcome};

use crate::common::{
    bare_tx, cbtx_body, decode_frame, inv_payload, mainnet_frame, ping_payload, sized, value_of,
};

#[test]
fn test_ping() -> Result<()> {
    let bytes = mainnet_frame("ping", &ping_payload(0x1122_3344_5566_7788));
    let (result, tree) = decode_frame(&bytes);
    let report = result?;

    assert_eq!(report.outcome, FrameOutcome::Decoded);
    assert_eq!(report.unparsed_payload, 0);
    assert_eq!(report.trailing, 0);

    let ping = tree.find("ping").expect("ping record");
    assert_eq!(ping.offset, 24);
    assert_eq!(ping.length, 8);
    assert_eq!(ping.children.len(), 1);
    let nonce = &ping.children[0];
    assert_eq!(nonce.label, "nonce");
    assert_eq!(value_of(nonce), "0x1122334455667788");
    assert_eq!((nonce.offset, nonce.length), (24, 8));
    Ok(())
}

#[test]
fn test_inv_with_two_vectors() -> Result<()> {
    let payload = inv_payload(&[(1, 0xaa), (2, 0xbb)]);
    assert_eq!(payload.len(), 73);
    let (result, tree) = decode_frame(&mainnet_frame("inv", &payload));
    assert!(result?.is_decoded());

    let inv = tree.find("inv").expect("inv record");
    assert_eq!(inv.length, 73);

    let count = inv.find("count").expect("count field");
    assert_eq!(value_of(count), "2");
    assert_eq!((count.offset, count.length), (24, 1));

    let vectors = inv.find_all("inventory vector");
    assert_eq!(vectors.len(), 2);
    assert_eq!((vectors[0].offset, vectors[0].length), (25, 36));
    assert_eq!((vectors[1].offset, vectors[1].length), (61, 36));
    assert_eq!(
        value_of(vectors[1].find("hash").expect("hash")),
        "bb".repeat(32)
    );
    Ok(())
}

#[test]
fn test_tx_with_coinbase_payload() -> Result<()> {
    let payload = bare_tx(2, 5, &sized(&cbtx_body(2, 123_456)));
    let (result, tree) = decode_frame(&mainnet_frame("tx", &payload));
    let report = result?;
    assert!(report.is_decoded());
    assert_eq!(report.unparsed_payload, 0);

    let size = tree.find("extra payload size").expect("payload size");
    assert_eq!(value_of(size), "70");
    // header 24, version 2, type 2, two empty counts, lock time 4
    assert_eq!(size.offset, 34);

    let cbtx = tree.find("CbTx").expect("CbTx record");
    assert_eq!((cbtx.offset, cbtx.length), (35, 70));
    assert_eq!(value_of(cbtx.find("height").expect("height")), "123456");
    assert_eq!(
        value_of(cbtx.find("quorum merkle root").expect("root")),
        "22".repeat(32)
    );
    Ok(())
}

#[test]
fn test_tx_ending_at_lock_time() -> Result<()> {
    let payload = bare_tx(2, 5, &[]);
    let (result, tree) = decode_frame(&mainnet_frame("tx", &payload));
    let report = result?;
    assert!(report.is_decoded());
    assert!(tree.find("extra payload size").is_none());
    assert!(tree.find("CbTx").is_none());
    Ok(())
}

#[test]
fn test_truncated_header() {
    let bytes = mainnet_frame("ping", &ping_payload(1));
    let (result, tree) = decode_frame(&bytes[..23]);

    match result {
        Err(DecodeError::TruncatedInput {
            field,
            offset,
            needed,
            available,
        }) => {
            assert_eq!(field, "checksum");
            assert_eq!(offset, 20);
            assert_eq!((needed, available), (4, 3));
        }
        other => panic!("expected TruncatedInput, got {:?}", other),
    }

    // Header fields before the checksum are reported; the payload never is
    let header = tree.find("header").expect("header record");
    assert_eq!(header.length, 20);
    assert!(header.find("checksum").is_none());
    assert!(tree.find("ping").is_none());
    assert!(tree.find("nonce").is_none());
}
