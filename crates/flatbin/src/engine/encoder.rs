// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encoder engine: value -> stream.

use super::{missing_child, ByteOrder, Scratch};
use crate::config::{SCRATCH_LEN, SKIP_CHUNK_LEN};
use crate::error::{Result, ShapeError};
use crate::plan::{CodecPlan, Registry, Repeat, Step};
use crate::shape::{Access, Binary, Primitive, PrimitiveKind};
use std::io::Write;
use std::sync::Arc;

const ZEROS: [u8; SKIP_CHUNK_LEN] = [0; SKIP_CHUNK_LEN];

/// Encodes values into a byte sink.
///
/// Sequences are written with exactly their current length; skip fields are
/// written as zero bytes. On error the sink may already hold part of the value.
pub struct Encoder<W> {
    writer: W,
    order: ByteOrder,
    registry: Arc<Registry>,
    scratch: Scratch,
    written: u64,
}

impl<W: Write> Encoder<W> {
    /// Encoder backed by the process-wide registry.
    pub fn new(writer: W, order: ByteOrder) -> Self {
        Self::with_registry(writer, order, Registry::global())
    }

    pub fn with_registry(writer: W, order: ByteOrder, registry: Arc<Registry>) -> Self {
        Self {
            writer,
            order,
            registry,
            scratch: [0; SCRATCH_LEN],
            written: 0,
        }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Bytes handed to the writer so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Encode one `T`.
    pub fn encode<T: Binary>(&mut self, value: &T) -> Result<()> {
        let plan = self.registry.plan::<T>()?;
        self.encode_plan(&plan, value)
    }

    /// Run an already compiled plan against `value`.
    pub fn encode_plan(&mut self, plan: &CodecPlan, value: &dyn Access) -> Result<()> {
        for step in plan.steps() {
            match step {
                Step::Primitive(kind) => match value.load() {
                    Some(v) if v.kind() == *kind => self.write_primitive(v)?,
                    _ => {
                        return Err(ShapeError::Mismatch {
                            type_name: plan.type_name(),
                            detail: format!("cannot load {}", kind.name()),
                        }
                        .into())
                    }
                },
                Step::Skip(n) => self.zero_fill(*n)?,
                Step::Field { index, plan: sub } => {
                    let child = value
                        .child(*index)
                        .ok_or_else(|| missing_child(plan, *index))?;
                    self.encode_plan(sub, child)?;
                }
                Step::Repeat { count, plan: sub } => {
                    let n = match count {
                        Repeat::Fixed(n) => *n,
                        Repeat::Container => value.len(),
                    };
                    for i in 0..n {
                        let child = value.child(i).ok_or_else(|| missing_child(plan, i))?;
                        self.encode_plan(sub, child)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn write_primitive(&mut self, value: Primitive) -> Result<()> {
        let order = self.order;
        match value {
            Primitive::I8(v) => {
                self.scratch[0] = v as u8;
                self.emit(PrimitiveKind::I8.width())
            }
            Primitive::U8(v) => {
                self.scratch[0] = v;
                self.emit(PrimitiveKind::U8.width())
            }
            Primitive::I16(v) => {
                order.write_u16(&mut self.scratch, v as u16);
                self.emit(2)
            }
            Primitive::U16(v) => {
                order.write_u16(&mut self.scratch, v);
                self.emit(2)
            }
            Primitive::I32(v) => {
                order.write_u32(&mut self.scratch, v as u32);
                self.emit(4)
            }
            Primitive::U32(v) => {
                order.write_u32(&mut self.scratch, v);
                self.emit(4)
            }
            Primitive::I64(v) => {
                order.write_u64(&mut self.scratch, v as u64);
                self.emit(8)
            }
            Primitive::U64(v) => {
                order.write_u64(&mut self.scratch, v);
                self.emit(8)
            }
            Primitive::F32(v) => {
                order.write_u32(&mut self.scratch, v.to_bits());
                self.emit(4)
            }
            Primitive::F64(v) => {
                order.write_u64(&mut self.scratch, v.to_bits());
                self.emit(8)
            }
            Primitive::C64(c) => {
                order.write_u32(&mut self.scratch[..4], c.re.to_bits());
                order.write_u32(&mut self.scratch[4..], c.im.to_bits());
                self.emit(8)
            }
            Primitive::C128(c) => {
                order.write_u64(&mut self.scratch, c.re.to_bits());
                self.emit(8)?;
                order.write_u64(&mut self.scratch, c.im.to_bits());
                self.emit(8)
            }
        }
    }

    /// Write the first `len` scratch bytes.
    fn emit(&mut self, len: usize) -> Result<()> {
        self.writer.write_all(&self.scratch[..len])?;
        self.written += len as u64;
        Ok(())
    }

    fn zero_fill(&mut self, len: usize) -> Result<()> {
        let mut left = len;
        while left > 0 {
            let chunk = left.min(SKIP_CHUNK_LEN);
            self.writer.write_all(&ZEROS[..chunk])?;
            self.written += chunk as u64;
            left -= chunk;
        }
        Ok(())
    }
}
