// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # flatbin - flat binary codec driven by compiled shape plans
//!
//! Encodes and decodes composite values (fixed-width integers, floats,
//! complex numbers, fixed arrays, sequences, nested structs) to and from a
//! flat byte stream in a caller-selected byte order. There is no framing, no
//! length prefix, no alignment padding: the bytes on the wire are the leaves
//! of the value, in declaration order.
//!
//! ## Quick Start
//!
//! ```rust
//! use flatbin::{Binary, ByteOrder};
//!
//! #[derive(Binary, Debug, Default, PartialEq)]
//! pub struct Sample {
//!     pub a: i32,
//!     pub _reserved: [u8; 4],
//!     pub b: f64,
//! }
//!
//! let value = Sample { a: 1, b: 2.5, ..Default::default() };
//! let bytes = flatbin::encode(&value, ByteOrder::BigEndian).unwrap();
//! assert_eq!(
//!     bytes,
//!     [0, 0, 0, 1, 0, 0, 0, 0, 0x40, 0x04, 0, 0, 0, 0, 0, 0]
//! );
//!
//! let back = flatbin::decode(&bytes, Sample::default(), ByteOrder::BigEndian).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |  encode / decode / Codec            (caller entry points)     |
//! +---------------------------------------------------------------+
//! |  Encoder / Decoder     walk a plan, one I/O per primitive     |
//! +---------------------------------------------------------------+
//! |  Registry              TypeId -> Arc<CodecPlan>, compile once |
//! +---------------------------------------------------------------+
//! |  Compiler              Shape -> Steps, cycle detection        |
//! +---------------------------------------------------------------+
//! |  Binary / Access       #[derive(Binary)] or hand-written      |
//! +---------------------------------------------------------------+
//! ```
//!
//! ## Sequences
//!
//! The codec never decides how many elements a sequence holds. On encode a
//! `Vec` is written with its current length; on decode the destination `Vec`
//! must already hold the number of elements to read. Agree on lengths out of
//! band (for instance a count field decoded first).
//!
//! ## Skip fields
//!
//! A struct field whose name starts with `_` reserves wire space: zeros on
//! encode, discarded on decode. Other private fields are not encoded at all.

// Allow the derive macro to work inside this crate's tests
extern crate self as flatbin;

/// Codec constants and the configured [`Codec`] handle.
pub mod config;
/// Decoder and encoder engines, byte order.
pub mod engine;
/// Error types.
pub mod error;
/// Compiled codec plans and the plan registry.
pub mod plan;
/// Shape descriptors and the value binding traits.
pub mod shape;

pub use config::{Codec, CodecBuilder};
pub use engine::{ByteOrder, Decoder, Encoder};
pub use error::{Error, Result, ShapeError};
pub use plan::{CodecPlan, LookupStats, Registry};
pub use shape::{Access, Complex, Complex128, Complex64, Primitive, PrimitiveKind};

// Trait and derive macro share the name, as with serde.
pub use flatbin_derive::Binary;
pub use shape::Binary;

use std::io::{Read, Write};

/// Encode `value` with the process-wide registry.
pub fn encode<T: Binary>(value: &T, order: ByteOrder) -> Result<Vec<u8>> {
    Codec::new(order).encode(value)
}

/// Decode `bytes` on top of `template`.
///
/// `template` supplies sequence lengths and the values of fields that are not
/// part of the shape.
pub fn decode<T: Binary>(bytes: &[u8], template: T, order: ByteOrder) -> Result<T> {
    Codec::new(order).decode(bytes, template)
}

/// Encode `value` into `writer`; returns the number of bytes written.
pub fn write<W: Write, T: Binary>(writer: W, order: ByteOrder, value: &T) -> Result<u64> {
    Codec::new(order).write(writer, value)
}

/// Decode into `dest` from `reader`; returns the number of bytes consumed.
pub fn read<R: Read, T: Binary>(reader: R, order: ByteOrder, dest: &mut T) -> Result<u64> {
    Codec::new(order).read(reader, dest)
}

/// Static wire width of `T`, or `None` if `T` contains a sequence.
pub fn wire_size<T: Binary>() -> Result<Option<usize>> {
    Ok(Registry::global().wire_size::<T>()?)
}

/// flatbin version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
