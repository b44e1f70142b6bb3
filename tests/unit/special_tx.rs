use dash_wire::decoder::special_tx::{decode_payload, SpecialTxPayload};
use dash_wire::decoder::{Cursor, DecodeError, NullSink, TreeSink};
use dash_wire::types::SpecialTxType;

use crate::common::{
    cbtx_body, pro_reg_tx_body, pro_up_reg_tx_body, pro_up_rev_tx_body, pro_up_serv_tx_body,
    qc_tx_body, value_of,
};

#[test]
fn test_dispatch_by_type() {
    let cases: [(SpecialTxType, Vec<u8>); 6] = [
        (SpecialTxType::ProviderRegister, pro_reg_tx_body()),
        (SpecialTxType::ProviderUpdateService, pro_up_serv_tx_body()),
        (SpecialTxType::ProviderUpdateRegistrar, pro_up_reg_tx_body()),
        (SpecialTxType::ProviderUpdateRevoke, pro_up_rev_tx_body(3)),
        (SpecialTxType::Coinbase, cbtx_body(2, 1_234_567)),
        (SpecialTxType::QuorumCommitment, qc_tx_body(1_000)),
    ];

    for (kind, body) in cases {
        let mut cursor = Cursor::new(&body);
        let payload = decode_payload(kind, &mut cursor, &mut NullSink)
            .unwrap_or_else(|e| panic!("{:?}: {}", kind, e));
        assert_eq!(payload.tx_type(), kind);
        assert_eq!(cursor.remaining(), 0, "{:?} left bytes", kind);
    }
}

#[test]
fn test_cbtx_fields() {
    let body = cbtx_body(2, 1_234_567);
    let mut cursor = Cursor::new(&body);
    let mut sink = TreeSink::new("CbTx");
    let payload = decode_payload(SpecialTxType::Coinbase, &mut cursor, &mut sink).unwrap();
    let SpecialTxPayload::CbTx(cbtx) = payload else {
        panic!("expected CbTx");
    };
    assert_eq!(cbtx.version, 2);
    assert_eq!(cbtx.height, 1_234_567);
    assert_eq!(cbtx.merkle_root_mn_list, &[0x11; 32]);
    assert_eq!(cbtx.merkle_root_quorums, &[0x22; 32]);

    let tree = sink.finish();
    let labels: Vec<&str> = tree.children.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(
        labels,
        ["version", "height", "masternode list merkle root", "quorum merkle root"]
    );
    assert_eq!(tree.children[3].offset, 38);
}

#[test]
fn test_revocation_reason_name() {
    let body = pro_up_rev_tx_body(1);
    let mut cursor = Cursor::new(&body);
    let mut sink = TreeSink::new("ProUpRevTx");
    decode_payload(SpecialTxType::ProviderUpdateRevoke, &mut cursor, &mut sink).unwrap();
    let tree = sink.finish();
    assert!(value_of(tree.find("reason").unwrap()).contains("(1)"));
}

#[test]
fn test_service_update_signature_offset() {
    let body = pro_up_serv_tx_body();
    let mut cursor = Cursor::with_base(&body, 100);
    let mut sink = TreeSink::new("ProUpServTx");
    let payload = decode_payload(SpecialTxType::ProviderUpdateService, &mut cursor, &mut sink)
        .unwrap();
    let SpecialTxPayload::ProUpServTx(p) = payload else {
        panic!("expected ProUpServTx");
    };
    assert_eq!(p.port, 19999);
    assert!(p.operator_payout_script.is_empty());

    let tree = sink.finish();
    let sig = tree.find("payload signature").unwrap();
    // 2 + 32 + 16 + 2 + 1 + 32 bytes precede the signature
    assert_eq!(sig.offset, 100 + 85);
    assert_eq!(sig.length, 96);
}

#[test]
fn test_quorum_commitment_payload() {
    let body = qc_tx_body(4_000);
    let mut cursor = Cursor::new(&body);
    let payload = decode_payload(SpecialTxType::QuorumCommitment, &mut cursor, &mut NullSink)
        .unwrap();
    let SpecialTxPayload::QcTx(qc) = payload else {
        panic!("expected QcTx");
    };
    assert_eq!(qc.height, 4_000);
    assert_eq!(qc.commitment.llmq_type, 1);
    assert_eq!(qc.commitment.signers.count_ones(), 50);
    assert_eq!(qc.commitment.valid_members.bit_count, Some(50));
}

#[test]
fn test_short_payload_reports_field() {
    let body = pro_reg_tx_body();
    let short = &body[..50];
    let mut cursor = Cursor::new(short);
    let err = decode_payload(SpecialTxType::ProviderRegister, &mut cursor, &mut NullSink)
        .unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedInput { field: "address", offset: 42, .. }));
}
