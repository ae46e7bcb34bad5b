// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec constants and the `Codec` configuration handle.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: compile-time constants (scratch size, default order)
//! - **Level 2 (Per handle)**: [`Codec`] fixes the byte order and the plan
//!   registry once; every encoder/decoder it hands out inherits both.
//!
//! # Example
//!
//! ```
//! use flatbin::{ByteOrder, Codec, Registry};
//! use std::sync::Arc;
//!
//! let codec = Codec::builder()
//!     .byte_order(ByteOrder::BigEndian)
//!     .registry(Arc::new(Registry::new()))
//!     .build();
//!
//! let bytes = codec.encode(&[1u16, 2u16]).unwrap();
//! assert_eq!(bytes, [0, 1, 0, 2]);
//! ```

use crate::engine::{ByteOrder, Decoder, Encoder};
use crate::error::Result;
use crate::plan::Registry;
use crate::shape::Binary;
use std::io::{Read, Write};
use std::sync::Arc;

/// Scratch buffer length: the widest single read or write (8 bytes).
///
/// `complex128` is transferred as two 8-byte halves.
pub const SCRATCH_LEN: usize = 8;

/// Chunk size used when discarding or zero-filling skip windows.
pub const SKIP_CHUNK_LEN: usize = 64;

/// Byte order used when none is configured.
pub const DEFAULT_BYTE_ORDER: ByteOrder = ByteOrder::LittleEndian;

/// Configured entry point: one byte order, one plan registry.
#[derive(Debug, Clone)]
pub struct Codec {
    order: ByteOrder,
    registry: Arc<Registry>,
}

impl Default for Codec {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Codec {
    /// Codec with `order`, backed by the process-wide registry.
    pub fn new(order: ByteOrder) -> Self {
        Self::builder().byte_order(order).build()
    }

    pub fn builder() -> CodecBuilder {
        CodecBuilder::default()
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Decoder reading from `reader` with this codec's settings.
    pub fn decoder<R: Read>(&self, reader: R) -> Decoder<R> {
        Decoder::with_registry(reader, self.order, Arc::clone(&self.registry))
    }

    /// Encoder writing to `writer` with this codec's settings.
    pub fn encoder<W: Write>(&self, writer: W) -> Encoder<W> {
        Encoder::with_registry(writer, self.order, Arc::clone(&self.registry))
    }

    /// Encode `value` into a freshly allocated, exactly sized buffer.
    pub fn encode<T: Binary>(&self, value: &T) -> Result<Vec<u8>> {
        let plan = self.registry.plan::<T>()?;
        let mut out = Vec::with_capacity(plan.encoded_len(value));
        self.encoder(&mut out).encode(value)?;
        Ok(out)
    }

    /// Decode `bytes` on top of `template` and return the filled value.
    ///
    /// Sequences in `template` must already hold the number of elements to
    /// decode; fields outside the shape keep their template values. Bytes
    /// past the end of the plan are ignored.
    pub fn decode<T: Binary>(&self, bytes: &[u8], mut template: T) -> Result<T> {
        self.decoder(bytes).decode(&mut template)?;
        Ok(template)
    }

    /// Stream form of [`Codec::encode`]; returns the number of bytes written.
    pub fn write<W: Write, T: Binary>(&self, writer: W, value: &T) -> Result<u64> {
        let mut encoder = self.encoder(writer);
        encoder.encode(value)?;
        Ok(encoder.written())
    }

    /// Stream form of [`Codec::decode`]; returns the number of bytes consumed.
    pub fn read<R: Read, T: Binary>(&self, reader: R, dest: &mut T) -> Result<u64> {
        let mut decoder = self.decoder(reader);
        decoder.decode(dest)?;
        Ok(decoder.consumed())
    }
}

/// Builder for [`Codec`].
#[derive(Debug, Default)]
pub struct CodecBuilder {
    order: Option<ByteOrder>,
    registry: Option<Arc<Registry>>,
}

impl CodecBuilder {
    /// Byte order applied to every multi-byte primitive (default little-endian).
    #[must_use]
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Use an isolated registry instead of the process-wide one.
    #[must_use]
    pub fn registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Codec {
        Codec {
            order: self.order.unwrap_or(DEFAULT_BYTE_ORDER),
            registry: self.registry.unwrap_or_else(Registry::global),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let codec = Codec::builder().build();
        assert_eq!(codec.byte_order(), DEFAULT_BYTE_ORDER);
        assert!(Arc::ptr_eq(codec.registry(), &Registry::global()));
    }

    #[test]
    fn test_isolated_registry() {
        let registry = Arc::new(Registry::new());
        let codec = Codec::builder()
            .byte_order(ByteOrder::BigEndian)
            .registry(Arc::clone(&registry))
            .build();

        let bytes = codec.encode(&0x0102_0304u32).expect("encode");
        assert_eq!(bytes, [1, 2, 3, 4]);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains::<u32>());
    }

    #[test]
    fn test_stream_helpers_count_bytes() {
        let codec = Codec::new(ByteOrder::LittleEndian);
        let mut sink = Vec::new();
        let written = codec.write(&mut sink, &[7i16; 3]).expect("write");
        assert_eq!(written, 6);

        let mut dest = [0i16; 3];
        let consumed = codec.read(sink.as_slice(), &mut dest).expect("read");
        assert_eq!(consumed, 6);
        assert_eq!(dest, [7, 7, 7]);
    }
}
