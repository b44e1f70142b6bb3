use dash_wire::decoder::compact_size::read_compact_size;
use dash_wire::decoder::{decode_compact_size, encode_compact_size, Cursor, DecodeError};

const BOUNDARIES: [(u64, usize); 8] = [
    (0, 1),
    (0xfc, 1),
    (0xfd, 3),
    (0xffff, 3),
    (0x1_0000, 5),
    (0xffff_ffff, 5),
    (0x1_0000_0000, 9),
    (u64::MAX, 9),
];

#[test]
fn test_boundary_widths() {
    for (n, width) in BOUNDARIES {
        let encoded = encode_compact_size(n);
        assert_eq!(encoded.len(), width, "encoded width of {:#x}", n);
        assert_eq!(decode_compact_size(&encoded).unwrap(), (n, width));
    }
}

#[test]
fn test_trailing_garbage_is_ignored() {
    let garbage = [0xff, 0xfe, 0xfd, 0x00, 0x42];
    for (n, width) in BOUNDARIES {
        let mut encoded = encode_compact_size(n);
        encoded.extend_from_slice(&garbage);
        assert_eq!(decode_compact_size(&encoded).unwrap(), (n, width));
    }
}

#[test]
fn test_non_minimal_encoding_is_accepted() {
    // 0xfd prefix carrying a value that would fit in one byte
    assert_eq!(decode_compact_size(&[0xfd, 0x05, 0x00]).unwrap(), (5, 3));
}

#[test]
fn test_truncated_prefixes() {
    for prefix in [0xfdu8, 0xfe, 0xff] {
        let encoded = match prefix {
            0xfd => encode_compact_size(0xffff),
            0xfe => encode_compact_size(0xffff_ffff),
            _ => encode_compact_size(u64::MAX),
        };
        for cut in 0..encoded.len() {
            let err = decode_compact_size(&encoded[..cut]).unwrap_err();
            assert!(
                matches!(err, DecodeError::TruncatedInput { .. }),
                "prefix {:#x} cut at {}: {:?}",
                prefix,
                cut,
                err
            );
        }
    }
}

#[test]
fn test_cursor_position_after_read() {
    let data = [0xfe, 0x00, 0x00, 0x01, 0x00, 0xaa];
    let mut cursor = Cursor::with_base(&data, 24);
    let cs = read_compact_size(&mut cursor, "count").unwrap();
    assert_eq!(cs.value, 0x1_0000);
    assert_eq!(cs.encoded_len, 5);
    assert_eq!(cursor.position(), 29);
    assert_eq!(cursor.remaining(), 1);
}
