// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Wire layout vectors: exact byte sequences for known values.
//
// Each test pins the layout produced by the encoder and checks that decoding
// the same bytes gives the value back.

#![allow(clippy::float_cmp)]
#![allow(clippy::unreadable_literal)]

use flatbin::{Binary, ByteOrder, Complex128, Error};

#[derive(Binary, Debug, Default, Clone, PartialEq)]
pub struct Reading {
    pub a: i32,
    pub _gap: [u8; 4],
    pub b: f64,
}

#[derive(Binary, Debug, Default, Clone, PartialEq)]
pub struct Window {
    pub first: i32,
    pub _pad: u32,
    pub third: i32,
}

#[derive(Binary, Debug, Default, Clone, PartialEq)]
pub struct Batch {
    pub count: u16,
    pub values: Vec<u32>,
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_skip_window_big_endian_vector() {
    let value = Reading {
        a: 1,
        b: 2.5,
        ..Default::default()
    };
    let bytes = flatbin::encode(&value, ByteOrder::BigEndian).expect("encode");
    assert_eq!(
        hex(&bytes),
        "00 00 00 01 00 00 00 00 40 04 00 00 00 00 00 00"
    );

    let back = flatbin::decode(&bytes, Reading::default(), ByteOrder::BigEndian).expect("decode");
    assert_eq!(back.a, 1);
    assert_eq!(back.b, 2.5);
}

#[test]
fn test_skip_window_little_endian_vector() {
    let value = Reading {
        a: 1,
        b: 2.5,
        ..Default::default()
    };
    let bytes = flatbin::encode(&value, ByteOrder::LittleEndian).expect("encode");
    assert_eq!(
        hex(&bytes),
        "01 00 00 00 00 00 00 00 00 00 00 00 00 00 04 40"
    );
}

#[test]
fn test_skip_bytes_ignored_on_decode() {
    let bytes = [
        0x00, 0x00, 0x00, 0x07, // first
        0xde, 0xad, 0xbe, 0xef, // skipped
        0xff, 0xff, 0xff, 0xfe, // third
    ];
    let back = flatbin::decode(&bytes, Window::default(), ByteOrder::BigEndian).expect("decode");
    assert_eq!(back.first, 7);
    assert_eq!(back._pad, 0);
    assert_eq!(back.third, -2);
}

#[test]
fn test_skip_bytes_zeroed_on_encode() {
    let value = Window {
        first: 7,
        _pad: 0xdead_beef,
        third: -2,
    };
    let bytes = flatbin::encode(&value, ByteOrder::BigEndian).expect("encode");
    assert_eq!(hex(&bytes), "00 00 00 07 00 00 00 00 ff ff ff fe");
}

#[test]
fn test_sequence_length_comes_from_container() {
    let value = Batch {
        count: 3,
        values: vec![1, 2, 3],
    };
    let bytes = flatbin::encode(&value, ByteOrder::LittleEndian).expect("encode");
    assert_eq!(bytes.len(), 2 + 3 * 4);

    // Decode with a container sized from the count field.
    let mut header = Batch::default();
    flatbin::read(&bytes[..2], ByteOrder::LittleEndian, &mut header.count).expect("count");
    assert_eq!(header.count, 3);
    header.values = vec![0; usize::from(header.count)];
    let back = flatbin::decode(&bytes, header, ByteOrder::LittleEndian).expect("decode");
    assert_eq!(back, value);
}

#[test]
fn test_short_container_reads_prefix_only() {
    let value = Batch {
        count: 3,
        values: vec![1, 2, 3],
    };
    let bytes = flatbin::encode(&value, ByteOrder::LittleEndian).expect("encode");

    let mut dest = Batch {
        count: 0,
        values: vec![0; 2],
    };
    let consumed = flatbin::read(&bytes[..], ByteOrder::LittleEndian, &mut dest).expect("decode");
    assert_eq!(consumed, 2 + 2 * 4);
    assert_eq!(dest.values, [1, 2]);
}

#[test]
fn test_oversized_container_is_short_read() {
    let bytes = flatbin::encode(&vec![1u32, 2], ByteOrder::BigEndian).expect("encode");
    let err = flatbin::decode(&bytes, vec![0u32; 3], ByteOrder::BigEndian).unwrap_err();
    assert!(matches!(err, Error::ShortRead { wanted: 4, got: 0 }));
    assert!(err.is_io());
}

#[test]
fn test_short_read_inside_skip_window() {
    let err = flatbin::decode(&[0, 0, 0, 1, 0, 0], Reading::default(), ByteOrder::BigEndian)
        .unwrap_err();
    assert!(matches!(err, Error::ShortRead { wanted: 4, got: 2 }));
}

#[test]
fn test_complex128_layout() {
    let value = [Complex128::new(-0.0, f64::INFINITY)];
    let bytes = flatbin::encode(&value, ByteOrder::BigEndian).expect("encode");
    assert_eq!(
        hex(&bytes),
        "80 00 00 00 00 00 00 00 7f f0 00 00 00 00 00 00"
    );
}

#[test]
fn test_wire_size() {
    assert_eq!(flatbin::wire_size::<Reading>().expect("compile"), Some(16));
    assert_eq!(flatbin::wire_size::<[Window; 3]>().expect("compile"), Some(36));
    assert_eq!(flatbin::wire_size::<Batch>().expect("compile"), None);
}
