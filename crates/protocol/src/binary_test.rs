//! Tests for the binary codec
//!
//! Round-trips cover the boundary values of every scalar kind, and the
//! byte-order tests pin the exact big-endian wire bytes so a host-order
//! shortcut can never pass.

use std::net::Ipv4Addr;

use uuid::Uuid;

use crate::{
    BinaryCodec, CodecError, MemoryBuffer, MessageKind, SandeshCodec, SliceReader, WireType,
    VERSION_1,
};

fn codec() -> BinaryCodec<MemoryBuffer> {
    BinaryCodec::new(MemoryBuffer::new())
}

fn codec_over(bytes: &[u8]) -> BinaryCodec<SliceReader<'_>> {
    BinaryCodec::new(SliceReader::new(bytes))
}

// =============================================================================
// Scalar round-trips
// =============================================================================

#[test]
fn test_bool_round_trip() {
    let mut c = codec();
    assert_eq!(c.write_bool(true).unwrap(), 1);
    assert_eq!(c.write_bool(false).unwrap(), 1);
    assert_eq!(c.read_bool().unwrap(), (true, 1));
    assert_eq!(c.read_bool().unwrap(), (false, 1));
}

#[test]
fn test_byte_round_trip() {
    let mut c = codec();
    for v in [i8::MIN, -1, 0, 1, i8::MAX] {
        c.write_byte(v).unwrap();
        assert_eq!(c.read_byte().unwrap(), (v, 1));
    }
}

#[test]
fn test_i16_round_trip() {
    let mut c = codec();
    for v in [i16::MIN, -1, 0, 1, i16::MAX] {
        c.write_i16(v).unwrap();
        assert_eq!(c.read_i16().unwrap(), (v, 2));
    }
}

#[test]
fn test_u16_round_trip() {
    let mut c = codec();
    for v in [0, 1, u16::MAX] {
        c.write_u16(v).unwrap();
        assert_eq!(c.read_u16().unwrap(), (v, 2));
    }
}

#[test]
fn test_i32_round_trip() {
    let mut c = codec();
    for v in [i32::MIN, -1, 0, 1, i32::MAX] {
        c.write_i32(v).unwrap();
        assert_eq!(c.read_i32().unwrap(), (v, 4));
    }
}

#[test]
fn test_u32_round_trip() {
    let mut c = codec();
    for v in [0, 1, u32::MAX] {
        c.write_u32(v).unwrap();
        assert_eq!(c.read_u32().unwrap(), (v, 4));
    }
}

#[test]
fn test_i64_round_trip() {
    let mut c = codec();
    for v in [i64::MIN, -1, 0, 1, i64::MAX] {
        c.write_i64(v).unwrap();
        assert_eq!(c.read_i64().unwrap(), (v, 8));
    }
}

#[test]
fn test_u64_round_trip_including_max() {
    let mut c = codec();
    for v in [0, 1, 18_446_744_073_709_551_615u64] {
        c.write_u64(v).unwrap();
        assert_eq!(c.read_u64().unwrap(), (v, 8));
    }
}

#[test]
fn test_double_round_trip_is_bit_exact() {
    let mut c = codec();
    for v in [0.0, -0.0, 1.5, -2.75, 1.0e300, f64::MIN_POSITIVE, f64::INFINITY] {
        c.write_double(v).unwrap();
        let (back, n) = c.read_double().unwrap();
        assert_eq!(n, 8);
        assert_eq!(back.to_bits(), v.to_bits());
    }
}

#[test]
fn test_double_nan_bit_pattern_preserved() {
    // No NaN canonicalization: the exact payload bits survive
    let nan = f64::from_bits(0x7ff8_dead_beef_0001);
    let mut c = codec();
    c.write_double(nan).unwrap();
    let (back, _) = c.read_double().unwrap();
    assert_eq!(back.to_bits(), 0x7ff8_dead_beef_0001);
}

#[test]
fn test_ipv4_round_trip() {
    let mut c = codec();
    let addr = Ipv4Addr::new(192, 168, 12, 34);
    assert_eq!(c.write_ipv4(addr).unwrap(), 4);
    assert_eq!(c.read_ipv4().unwrap(), (addr, 4));
}

#[test]
fn test_uuid_round_trip_verbatim() {
    let raw = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    let id = Uuid::from_bytes(raw);
    let mut c = codec();
    assert_eq!(c.write_uuid(id).unwrap(), 16);
    // The wire bytes are the blob itself, no swapping
    assert_eq!(c.transport().written(), &raw);
    assert_eq!(c.read_uuid().unwrap(), (id, 16));
}

#[test]
fn test_string_round_trip() {
    let mut c = codec();
    let n = c.write_string("sandesh").unwrap();
    assert_eq!(n, 4 + 7);
    assert_eq!(c.read_string().unwrap(), ("sandesh".to_string(), 11));
}

#[test]
fn test_empty_string_writes_no_payload() {
    let mut c = codec();
    assert_eq!(c.write_string("").unwrap(), 4);
    assert_eq!(c.transport().written(), &[0, 0, 0, 0]);
    assert_eq!(c.read_string().unwrap(), (String::new(), 4));
}

#[test]
fn test_binary_round_trip_with_embedded_nul() {
    let payload = b"ab\0cd\0";
    let mut c = codec();
    assert_eq!(c.write_binary(payload).unwrap(), 4 + 6);
    assert_eq!(c.read_binary().unwrap(), (payload.to_vec(), 10));
}

#[test]
fn test_xml_uses_string_framing() {
    let doc = "<node><name>a0</name></node>";
    let mut c = codec();
    let n = c.write_xml(doc).unwrap();
    assert_eq!(n, 4 + doc.len());
    assert_eq!(c.read_xml().unwrap(), (doc.to_string(), n));
}

#[test]
fn test_string_rejects_invalid_utf8() {
    let mut c = codec_over(&[0, 0, 0, 2, 0xff, 0xfe]);
    assert!(matches!(
        c.read_string().unwrap_err(),
        CodecError::InvalidUtf8
    ));
}

// =============================================================================
// Byte-order pinning
// =============================================================================

#[test]
fn test_i16_wire_bytes_are_big_endian() {
    let mut c = codec();
    c.write_i16(0x1234).unwrap();
    assert_eq!(c.transport().written(), &[0x12, 0x34]);
}

#[test]
fn test_i32_wire_bytes_are_big_endian() {
    let mut c = codec();
    c.write_i32(0x1234_5678).unwrap();
    assert_eq!(c.transport().written(), &[0x12, 0x34, 0x56, 0x78]);
}

#[test]
fn test_i64_wire_bytes_are_big_endian() {
    let mut c = codec();
    c.write_i64(0x0102_0304_0506_0708).unwrap();
    assert_eq!(
        c.transport().written(),
        &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
    );
}

#[test]
fn test_double_wire_bytes_are_big_endian_bit_pattern() {
    let mut c = codec();
    c.write_double(1.0).unwrap();
    // 1.0 == 0x3ff0000000000000
    assert_eq!(
        c.transport().written(),
        &[0x3f, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
}

#[test]
fn test_ipv4_wire_bytes_are_network_order() {
    let mut c = codec();
    c.write_ipv4(Ipv4Addr::new(10, 1, 2, 3)).unwrap();
    assert_eq!(c.transport().written(), &[10, 1, 2, 3]);
}

#[test]
fn test_big_endian_bytes_decode_to_expected_values() {
    let mut c = codec_over(&[0x12, 0x34, 0x56, 0x78]);
    assert_eq!(c.read_i32().unwrap().0, 0x1234_5678);

    let mut c = codec_over(&[0xff, 0xff, 0xff, 0xff]);
    assert_eq!(c.read_i32().unwrap().0, -1);

    let mut c = codec_over(&[0xff, 0xfe]);
    assert_eq!(c.read_i16().unwrap().0, -2);
}

// =============================================================================
// Framing
// =============================================================================

#[test]
fn test_field_header_round_trip() {
    let mut c = codec();
    assert_eq!(c.write_field_begin("f", WireType::I32, 7).unwrap(), 3);
    let (header, n) = c.read_field_begin().unwrap();
    assert_eq!(n, 3);
    assert_eq!(header.field_type, WireType::I32);
    assert_eq!(header.field_id, 7);
}

#[test]
fn test_field_stop_carries_no_id() {
    let mut c = codec();
    assert_eq!(c.write_field_stop().unwrap(), 1);
    assert_eq!(c.transport().written(), &[0]);
    let (header, n) = c.read_field_begin().unwrap();
    assert_eq!(n, 1);
    assert_eq!(header.field_type, WireType::Stop);
    assert_eq!(header.field_id, 0);
}

#[test]
fn test_struct_framing_is_empty() {
    let mut c = codec();
    assert_eq!(c.write_struct_begin("Inner").unwrap(), 0);
    assert_eq!(c.write_struct_end().unwrap(), 0);
    assert!(c.transport().is_empty());
}

#[test]
fn test_sandesh_begin_writes_record_name() {
    let mut c = codec();
    let n = c.write_sandesh_begin("NodeStatusUVE").unwrap();
    assert_eq!(n, 4 + 13);
    assert_eq!(c.write_sandesh_end().unwrap(), 0);
    let (name, consumed) = c.read_sandesh_begin().unwrap();
    assert_eq!(name, "NodeStatusUVE");
    assert_eq!(consumed, n);
}

#[test]
fn test_map_header_round_trip() {
    let mut c = codec();
    let n = c
        .write_map_begin(WireType::String, WireType::I64, 42)
        .unwrap();
    assert_eq!(n, 6);
    let (header, consumed) = c.read_map_begin().unwrap();
    assert_eq!(consumed, 6);
    assert_eq!(header.key_type, WireType::String);
    assert_eq!(header.value_type, WireType::I64);
    assert_eq!(header.size, 42);
}

#[test]
fn test_list_header_wire_bytes() {
    let mut c = codec();
    c.write_list_begin(WireType::I32, 3).unwrap();
    assert_eq!(c.transport().written(), &[8, 0, 0, 0, 3]);
}

#[test]
fn test_set_header_round_trip() {
    let mut c = codec();
    assert_eq!(c.write_set_begin(WireType::Uuid, 0).unwrap(), 5);
    let (header, n) = c.read_set_begin().unwrap();
    assert_eq!(n, 5);
    assert_eq!(header.elem_type, WireType::Uuid);
    assert_eq!(header.size, 0);
}

#[test]
fn test_unknown_field_tag_is_rejected() {
    let mut c = codec_over(&[99, 0, 1]);
    assert!(matches!(
        c.read_field_begin().unwrap_err(),
        CodecError::InvalidWireType(99)
    ));
}

// =============================================================================
// Negative sizes
// =============================================================================

#[test]
fn test_string_negative_length_rejected() {
    // Length 0xFFFFFFFF reads as -1
    let mut c = codec_over(&[0xff, 0xff, 0xff, 0xff]);
    assert!(matches!(
        c.read_string().unwrap_err(),
        CodecError::NegativeSize(-1)
    ));
}

#[test]
fn test_binary_negative_length_rejected() {
    let mut c = codec_over(&[0x80, 0x00, 0x00, 0x00]);
    assert!(matches!(
        c.read_binary().unwrap_err(),
        CodecError::NegativeSize(i32::MIN)
    ));
}

#[test]
fn test_list_negative_size_rejected() {
    let mut c = codec_over(&[8, 0xff, 0xff, 0xff, 0xff]);
    assert!(c.read_list_begin().unwrap_err().is_negative_size());
}

#[test]
fn test_set_negative_size_rejected() {
    let mut c = codec_over(&[8, 0xff, 0xff, 0xff, 0xfe]);
    assert!(c.read_set_begin().unwrap_err().is_negative_size());
}

#[test]
fn test_map_negative_size_rejected() {
    let mut c = codec_over(&[11, 8, 0xff, 0xff, 0xff, 0xff]);
    assert!(c.read_map_begin().unwrap_err().is_negative_size());
}

#[test]
fn test_truncation_is_not_negative_size() {
    // Two bytes of a four-byte length: underflow, distinct kind
    let mut c = codec_over(&[0x00, 0x01]);
    let err = c.read_string().unwrap_err();
    assert!(err.is_underflow());
    assert!(!err.is_negative_size());
}

// =============================================================================
// Legacy message envelope
// =============================================================================

#[test]
fn test_message_envelope_round_trip() {
    let mut c = codec();
    let n = c
        .write_message_begin("UVETrace", MessageKind::Oneway, 9)
        .unwrap();
    assert_eq!(n, 4 + (4 + 8) + 4);
    c.write_message_end().unwrap();

    let (header, consumed) = c.read_message_begin().unwrap();
    assert_eq!(consumed, n);
    assert_eq!(header.name, "UVETrace");
    assert_eq!(header.kind, MessageKind::Oneway);
    assert_eq!(header.seqid, 9);
    assert_eq!(c.read_message_end().unwrap(), 0);
}

#[test]
fn test_message_version_word_layout() {
    let mut c = codec();
    c.write_message_begin("x", MessageKind::Call, 0).unwrap();
    let bytes = c.transport().written();
    assert_eq!(&bytes[..4], &[0x80, 0x01, 0x00, 0x01]);
}

#[test]
fn test_unversioned_message_rejected() {
    // Sign bit clear: an old non-versioned message
    let mut c = codec_over(&[0x00, 0x00, 0x00, 0x08]);
    assert!(matches!(
        c.read_message_begin().unwrap_err(),
        CodecError::UnversionedMessage(8)
    ));
}

#[test]
fn test_bad_version_magic_rejected() {
    let mut c = codec_over(&[0x80, 0x02, 0x00, 0x01]);
    let err = c.read_message_begin().unwrap_err();
    assert!(matches!(
        err,
        CodecError::BadVersion {
            expected: VERSION_1,
            ..
        }
    ));
}

#[test]
fn test_bad_message_kind_rejected() {
    let mut c = codec_over(&[0x80, 0x01, 0x00, 0x07]);
    assert!(matches!(
        c.read_message_begin().unwrap_err(),
        CodecError::InvalidMessageKind(7)
    ));
}

// =============================================================================
// Truncated scalars
// =============================================================================

#[test]
fn test_truncated_scalars_underflow() {
    assert!(codec_over(&[1]).read_i16().unwrap_err().is_underflow());
    assert!(codec_over(&[1, 2, 3]).read_i32().unwrap_err().is_underflow());
    assert!(codec_over(&[0; 7]).read_i64().unwrap_err().is_underflow());
    assert!(codec_over(&[0; 7]).read_double().unwrap_err().is_underflow());
    assert!(codec_over(&[0; 15]).read_uuid().unwrap_err().is_underflow());
    assert!(codec_over(&[]).read_bool().unwrap_err().is_underflow());
}

#[test]
fn test_string_payload_shorter_than_claimed() {
    let mut c = codec_over(&[0, 0, 0, 10, b'a', b'b']);
    assert!(c.read_string().unwrap_err().is_underflow());
}
