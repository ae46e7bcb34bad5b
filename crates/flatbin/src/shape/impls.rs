// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `Binary` and `Access` for standard types.

use super::{Access, Binary, Complex128, Complex64, Primitive, PrimitiveKind, Shape, TypeRef};
use std::any::type_name;

/// Generate `Binary` + `Access` for a primitive leaf type.
macro_rules! impl_primitive {
    ($type:ty, $variant:ident) => {
        impl Binary for $type {
            fn shape() -> Shape {
                Shape::primitive(type_name::<Self>(), PrimitiveKind::$variant)
            }
        }

        impl Access for $type {
            fn load(&self) -> Option<Primitive> {
                Some(Primitive::$variant(*self))
            }

            fn store(&mut self, value: Primitive) -> bool {
                match value {
                    Primitive::$variant(v) => {
                        *self = v;
                        true
                    }
                    _ => false,
                }
            }
        }
    };
}

impl_primitive!(i8, I8);
impl_primitive!(i16, I16);
impl_primitive!(i32, I32);
impl_primitive!(i64, I64);
impl_primitive!(u8, U8);
impl_primitive!(u16, U16);
impl_primitive!(u32, U32);
impl_primitive!(u64, U64);
impl_primitive!(f32, F32);
impl_primitive!(f64, F64);
impl_primitive!(Complex64, C64);
impl_primitive!(Complex128, C128);

/// Types that exist in Rust but have no fixed-width wire form.
///
/// They describe themselves as opaque so that a struct using one fails at
/// plan-compile time with an error naming the type.
macro_rules! impl_opaque {
    ($type:ty, $reason:expr) => {
        impl Binary for $type {
            fn shape() -> Shape {
                Shape::opaque(type_name::<Self>(), $reason)
            }
        }

        impl Access for $type {}
    };
}

impl_opaque!(bool, "no fixed-width wire representation");
impl_opaque!(char, "no fixed-width wire representation");
impl_opaque!(usize, "platform-dependent width");
impl_opaque!(isize, "platform-dependent width");
impl_opaque!(String, "variable-length text");

impl<T: Binary, const N: usize> Binary for [T; N] {
    fn shape() -> Shape {
        Shape::array(type_name::<Self>(), N, TypeRef::of::<T>())
    }
}

impl<T: Access, const N: usize> Access for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn child(&self, index: usize) -> Option<&dyn Access> {
        self.get(index).map(|v| v as &dyn Access)
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut dyn Access> {
        self.get_mut(index).map(|v| v as &mut dyn Access)
    }
}

impl<T: Binary> Binary for Vec<T> {
    fn shape() -> Shape {
        Shape::sequence(type_name::<Self>(), TypeRef::of::<T>())
    }
}

impl<T: Access> Access for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn child(&self, index: usize) -> Option<&dyn Access> {
        self.get(index).map(|v| v as &dyn Access)
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut dyn Access> {
        self.get_mut(index).map(|v| v as &mut dyn Access)
    }
}
