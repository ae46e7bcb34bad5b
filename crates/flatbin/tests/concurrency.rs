// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Concurrent first use of the plan registry and concurrent encoding.

use flatbin::{Binary, ByteOrder, Codec, Registry};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;

#[derive(Binary, Debug, Default, Clone, PartialEq)]
pub struct Cell {
    pub id: u32,
    pub _flags: u8,
    pub level: f32,
}

#[derive(Binary, Debug, Default, Clone, PartialEq)]
pub struct Sheet {
    pub rows: [[Cell; 4]; 2],
    pub notes: Vec<i64>,
}

fn sheet(seed: u32) -> Sheet {
    let mut value = Sheet::default();
    for (r, row) in value.rows.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            cell.id = seed * 100 + (r * 10 + c) as u32;
            cell.level = seed as f32 / 4.0;
        }
    }
    value.notes = (0..seed as i64 % 5).collect();
    value
}

#[test]
fn test_concurrent_first_use_yields_one_plan() {
    let registry = Arc::new(Registry::new());
    let barrier = Barrier::new(THREADS);

    let plans: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    registry.plan::<Sheet>().expect("compile")
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect()
    });

    for plan in &plans[1..] {
        assert!(Arc::ptr_eq(plan, &plans[0]));
    }
    assert!(Arc::ptr_eq(
        &plans[0],
        &registry.plan::<Sheet>().expect("cached")
    ));
}

#[test]
fn test_concurrent_encoding_is_deterministic() {
    let codec = Codec::builder()
        .byte_order(ByteOrder::BigEndian)
        .registry(Arc::new(Registry::new()))
        .build();
    let expected: Vec<Vec<u8>> = (0..THREADS as u32)
        .map(|seed| {
            let serial = Codec::builder()
                .byte_order(ByteOrder::BigEndian)
                .registry(Arc::new(Registry::new()))
                .build();
            serial.encode(&sheet(seed)).expect("encode")
        })
        .collect();
    let barrier = Barrier::new(THREADS);

    thread::scope(|s| {
        for (seed, want) in expected.iter().enumerate() {
            let codec = codec.clone();
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                let value = sheet(seed as u32);
                for _ in 0..50 {
                    let bytes = codec.encode(&value).expect("encode");
                    assert_eq!(&bytes, want);

                    let template = Sheet {
                        notes: vec![0; value.notes.len()],
                        ..Default::default()
                    };
                    assert_eq!(codec.decode(&bytes, template).expect("decode"), value);
                }
            });
        }
    });

    let stats = codec.registry().stats();
    assert_eq!(stats.failures, 0);
    assert!(stats.hits > 0);
}
