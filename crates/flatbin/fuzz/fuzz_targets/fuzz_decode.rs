// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use flatbin::{Binary, ByteOrder, Complex128, Complex64};
use libfuzzer_sys::fuzz_target;

#[derive(Binary, Default)]
pub struct Mixed {
    pub a: i8,
    pub _gap: [u8; 3],
    pub b: u32,
    pub c: [f64; 2],
    pub d: Complex64,
    pub e: Complex128,
    pub tail: Vec<i16>,
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, body)) = data.split_first() else {
        return;
    };
    let order = if selector & 1 == 0 {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    };

    // Container length taken from the input, as a caller would after
    // decoding a count field.
    let template = Mixed {
        tail: vec![0; usize::from(selector >> 1)],
        ..Default::default()
    };
    let _ = flatbin::decode(body, template, order);

    let _ = flatbin::decode(body, vec![0u64; body.len() / 8], order);
});
