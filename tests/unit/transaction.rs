use dash_wire::decoder::special_tx::SpecialTxPayload;
use dash_wire::decoder::transaction::{self, ExtraPayload, Transaction};
use dash_wire::decoder::{Cursor, DecodeError, DecodeResult, FieldNode, TreeSink};

use crate::common::{bare_tx, cbtx_body, pro_reg_tx_body, simple_tx, sized, value_of};

fn decode(data: &[u8]) -> (DecodeResult<Transaction<'_>>, FieldNode, usize) {
    let mut cursor = Cursor::new(data);
    let mut sink = TreeSink::new("tx");
    let result = transaction::transaction(&mut cursor, &mut sink, "transaction");
    let remaining = cursor.remaining();
    (result, sink.finish(), remaining)
}

#[test]
fn test_version_one_never_reads_extra_payload() {
    for tx_type in [0u16, 1, 5, 6, 0xffff] {
        let data = bare_tx(1, tx_type, &sized(&pro_reg_tx_body()));
        let (result, tree, remaining) = decode(&data);
        let tx = result.unwrap();
        assert!(tx.extra_payload.is_none(), "type {}", tx_type);
        assert!(tree.find("extra payload size").is_none());
        assert_eq!(remaining, data.len() - 10);
    }
}

#[test]
fn test_type_zero_never_reads_extra_payload() {
    let data = bare_tx(2, 0, &[0x05, 1, 2, 3, 4, 5]);
    let (result, tree, remaining) = decode(&data);
    assert!(result.unwrap().extra_payload.is_none());
    assert!(tree.find("extra payload size").is_none());
    assert_eq!(remaining, 6);
}

#[test]
fn test_version_two_type_one_attempts_pro_reg_tx() {
    // One trailing byte is enough to open the gate
    let data = bare_tx(2, 1, &[0x00]);
    let (result, tree, _) = decode(&data);
    let err = result.unwrap_err();
    assert!(matches!(
        err,
        DecodeError::TruncatedInput {
            field: "version",
            ..
        }
    ));
    assert!(tree.find("ProRegTx").is_some());

    let data = bare_tx(2, 1, &sized(&pro_reg_tx_body()));
    let (result, tree, remaining) = decode(&data);
    let tx = result.unwrap();
    assert_eq!(remaining, 0);
    match tx.extra_payload {
        Some(ExtraPayload::Decoded(SpecialTxPayload::ProRegTx(p))) => {
            assert_eq!(p.port, 9999);
            assert_eq!(p.operator_reward, 500);
            assert_eq!(p.payout_script.len(), 25);
        }
        other => panic!("expected ProRegTx, got {:?}", other),
    }
    let pro_reg = tree.find("ProRegTx").unwrap();
    assert_eq!(value_of(pro_reg.find("address").unwrap()), "1.2.3.4");
}

#[test]
fn test_special_type_ending_at_lock_time() {
    let data = bare_tx(3, 5, &[]);
    let (result, tree, remaining) = decode(&data);
    let tx = result.unwrap();
    assert!(tx.is_special());
    assert!(tx.extra_payload.is_none());
    assert!(tree.find("CbTx").is_none());
    assert_eq!(remaining, 0);
}

#[test]
fn test_unknown_type_is_skipped_by_declared_size() {
    let mut extra = sized(&[0xde, 0xad, 0xbe, 0xef]);
    extra.push(0x99);
    let data = bare_tx(3, 42, &extra);
    let (result, tree, remaining) = decode(&data);
    match result.unwrap().extra_payload {
        Some(ExtraPayload::Undecoded { tx_type, bytes }) => {
            assert_eq!(tx_type, 42);
            assert_eq!(bytes, &[0xde, 0xad, 0xbe, 0xef]);
        }
        other => panic!("expected undecoded payload, got {:?}", other),
    }
    let note = value_of(tree.find("extra payload").unwrap());
    assert!(note.starts_with("extra payload present but undecoded"));
    // Only the declared size is consumed
    assert_eq!(remaining, 1);
}

#[test]
fn test_payload_shorter_than_declared_size() {
    let mut body = cbtx_body(2, 7);
    body.extend_from_slice(&[0x00, 0x00, 0x00]);
    let data = bare_tx(3, 5, &sized(&body));
    let (result, tree, remaining) = decode(&data);
    assert!(matches!(
        result.unwrap().extra_payload,
        Some(ExtraPayload::Decoded(SpecialTxPayload::CbTx(_)))
    ));
    let note = tree.find("trailing extra payload bytes").unwrap();
    assert_eq!(note.length, 3);
    assert_eq!(remaining, 0);
}

#[test]
fn test_payload_longer_than_declared_size() {
    // Declared size cuts the CbTx body short: the layout must not read past it
    let body = cbtx_body(2, 7);
    let mut extra = vec![10u8];
    extra.extend_from_slice(&body);
    let data = bare_tx(3, 5, &extra);
    let (result, _, _) = decode(&data);
    assert!(matches!(
        result.unwrap_err(),
        DecodeError::TruncatedInput {
            field: "masternode list merkle root",
            ..
        }
    ));
}

#[test]
fn test_inputs_and_outputs() {
    let data = simple_tx(150_000_000);
    let (result, tree, remaining) = decode(&data);
    let tx = result.unwrap();
    assert_eq!(remaining, 0);
    assert_eq!(tx.inputs.len(), 1);
    assert_eq!(tx.inputs[0].sequence, u32::MAX);
    assert_eq!(tx.inputs[0].signature_script, &[0x51, 0x52]);
    assert_eq!(tx.total_output_value(), 150_000_000);
    assert!(!tx.is_special());

    let output = tree.find("output").unwrap();
    assert_eq!(
        value_of(output.find("value").unwrap()),
        "1.50000000 DASH (150000000 duffs)"
    );
    assert_eq!(output.length, 8 + 1 + 1);
}
