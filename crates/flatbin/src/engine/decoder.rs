// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoder engine: stream -> value.

use super::{missing_child, ByteOrder, Scratch};
use crate::config::{SCRATCH_LEN, SKIP_CHUNK_LEN};
use crate::error::{Error, Result, ShapeError};
use crate::plan::{CodecPlan, Registry, Repeat, Step};
use crate::shape::{Access, Binary, Complex, Primitive, PrimitiveKind};
use std::io::{ErrorKind, Read};
use std::sync::Arc;

/// Decodes values from a byte source.
///
/// Decoding writes into an existing value: sequences keep their length and
/// receive exactly that many elements, fields outside the shape are left
/// untouched. On error the destination may be partially written.
///
/// # Example
///
/// ```
/// use flatbin::{ByteOrder, Decoder};
///
/// let bytes = [0x00, 0x01, 0x00, 0x02, 0xff];
/// let mut decoder = Decoder::new(&bytes[..], ByteOrder::BigEndian);
///
/// let mut pair = vec![0u16; 2];
/// decoder.decode(&mut pair).unwrap();
/// assert_eq!(pair, [1, 2]);
/// assert_eq!(decoder.consumed(), 4);
/// ```
pub struct Decoder<R> {
    reader: R,
    order: ByteOrder,
    registry: Arc<Registry>,
    scratch: Scratch,
    consumed: u64,
}

impl<R: Read> Decoder<R> {
    /// Decoder backed by the process-wide registry.
    pub fn new(reader: R, order: ByteOrder) -> Self {
        Self::with_registry(reader, order, Registry::global())
    }

    pub fn with_registry(reader: R, order: ByteOrder, registry: Arc<Registry>) -> Self {
        Self {
            reader,
            order,
            registry,
            scratch: [0; SCRATCH_LEN],
            consumed: 0,
        }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Bytes consumed from the reader so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decode one `T` into `dest`.
    pub fn decode<T: Binary>(&mut self, dest: &mut T) -> Result<()> {
        let plan = self.registry.plan::<T>()?;
        self.decode_plan(&plan, dest)
    }

    /// Run an already compiled plan against `dest`.
    pub fn decode_plan(&mut self, plan: &CodecPlan, dest: &mut dyn Access) -> Result<()> {
        for step in plan.steps() {
            match step {
                Step::Primitive(kind) => {
                    let value = self.read_primitive(*kind)?;
                    if !dest.store(value) {
                        return Err(ShapeError::Mismatch {
                            type_name: plan.type_name(),
                            detail: format!("cannot store {}", kind.name()),
                        }
                        .into());
                    }
                }
                Step::Skip(n) => self.skip(*n)?,
                Step::Field { index, plan: sub } => {
                    let child = dest
                        .child_mut(*index)
                        .ok_or_else(|| missing_child(plan, *index))?;
                    self.decode_plan(sub, child)?;
                }
                Step::Repeat { count, plan: sub } => {
                    let n = match count {
                        Repeat::Fixed(n) => *n,
                        Repeat::Container => dest.len(),
                    };
                    for i in 0..n {
                        let child = dest.child_mut(i).ok_or_else(|| missing_child(plan, i))?;
                        self.decode_plan(sub, child)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn read_primitive(&mut self, kind: PrimitiveKind) -> Result<Primitive> {
        let order = self.order;
        let value = match kind {
            PrimitiveKind::I8 => {
                self.fill(1)?;
                Primitive::I8(self.scratch[0] as i8)
            }
            PrimitiveKind::U8 => {
                self.fill(1)?;
                Primitive::U8(self.scratch[0])
            }
            PrimitiveKind::I16 => {
                self.fill(2)?;
                Primitive::I16(order.read_u16(&self.scratch) as i16)
            }
            PrimitiveKind::U16 => {
                self.fill(2)?;
                Primitive::U16(order.read_u16(&self.scratch))
            }
            PrimitiveKind::I32 => {
                self.fill(4)?;
                Primitive::I32(order.read_u32(&self.scratch) as i32)
            }
            PrimitiveKind::U32 => {
                self.fill(4)?;
                Primitive::U32(order.read_u32(&self.scratch))
            }
            PrimitiveKind::I64 => {
                self.fill(8)?;
                Primitive::I64(order.read_u64(&self.scratch) as i64)
            }
            PrimitiveKind::U64 => {
                self.fill(8)?;
                Primitive::U64(order.read_u64(&self.scratch))
            }
            PrimitiveKind::F32 => {
                self.fill(4)?;
                Primitive::F32(f32::from_bits(order.read_u32(&self.scratch)))
            }
            PrimitiveKind::F64 => {
                self.fill(8)?;
                Primitive::F64(f64::from_bits(order.read_u64(&self.scratch)))
            }
            PrimitiveKind::C64 => {
                self.fill(8)?;
                Primitive::C64(Complex::new(
                    f32::from_bits(order.read_u32(&self.scratch[..4])),
                    f32::from_bits(order.read_u32(&self.scratch[4..])),
                ))
            }
            PrimitiveKind::C128 => {
                self.fill(8)?;
                let re = f64::from_bits(order.read_u64(&self.scratch));
                self.fill(8)?;
                let im = f64::from_bits(order.read_u64(&self.scratch));
                Primitive::C128(Complex::new(re, im))
            }
        };
        Ok(value)
    }

    /// Read exactly `len` bytes into the scratch buffer.
    fn fill(&mut self, len: usize) -> Result<()> {
        let mut got = 0;
        while got < len {
            match self.reader.read(&mut self.scratch[got..len]) {
                Ok(0) => return Err(Error::ShortRead { wanted: len, got }),
                Ok(n) => got += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.consumed += len as u64;
        Ok(())
    }

    /// Discard exactly `len` bytes.
    fn skip(&mut self, len: usize) -> Result<()> {
        let mut sink = [0u8; SKIP_CHUNK_LEN];
        let mut got = 0;
        while got < len {
            let want = (len - got).min(SKIP_CHUNK_LEN);
            match self.reader.read(&mut sink[..want]) {
                Ok(0) => return Err(Error::ShortRead { wanted: len, got }),
                Ok(n) => got += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.consumed += len as u64;
        Ok(())
    }
}
