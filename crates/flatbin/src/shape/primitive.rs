// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive kinds, primitive values and complex numbers.

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// Two `f32` halves (real, imaginary).
    C64,
    /// Two `f64` halves (real, imaginary).
    C128,
}

impl PrimitiveKind {
    /// On-wire width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 | Self::C64 => 8,
            Self::C128 => 16,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::C64 => "complex64",
            Self::C128 => "complex128",
        }
    }
}

/// A complex number stored as (real, imaginary).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

/// 8-byte complex number.
pub type Complex64 = Complex<f32>;
/// 16-byte complex number.
pub type Complex128 = Complex<f64>;

/// A primitive value in transit between a stream and a bound field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    C64(Complex64),
    C128(Complex128),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::I8(_) => PrimitiveKind::I8,
            Self::I16(_) => PrimitiveKind::I16,
            Self::I32(_) => PrimitiveKind::I32,
            Self::I64(_) => PrimitiveKind::I64,
            Self::U8(_) => PrimitiveKind::U8,
            Self::U16(_) => PrimitiveKind::U16,
            Self::U32(_) => PrimitiveKind::U32,
            Self::U64(_) => PrimitiveKind::U64,
            Self::F32(_) => PrimitiveKind::F32,
            Self::F64(_) => PrimitiveKind::F64,
            Self::C64(_) => PrimitiveKind::C64,
            Self::C128(_) => PrimitiveKind::C128,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_width() {
        assert_eq!(PrimitiveKind::I8.width(), 1);
        assert_eq!(PrimitiveKind::U16.width(), 2);
        assert_eq!(PrimitiveKind::F32.width(), 4);
        assert_eq!(PrimitiveKind::C64.width(), 8);
        assert_eq!(PrimitiveKind::U64.width(), 8);
        assert_eq!(PrimitiveKind::C128.width(), 16);
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(Primitive::U8(1).kind(), PrimitiveKind::U8);
        assert_eq!(
            Primitive::C128(Complex::new(1.0, -1.0)).kind(),
            PrimitiveKind::C128
        );
        assert_eq!(PrimitiveKind::C64.name(), "complex64");
    }
}
