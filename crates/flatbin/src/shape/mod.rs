// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shape descriptors: the static layout of a type as seen by the codec.
//!
//! A type takes part in the codec by implementing [`Binary`] (usually through
//! `#[derive(Binary)]`). `Binary::shape()` describes the layout; the
//! object-safe [`Access`] trait lets the engines reach primitive leaves,
//! sequence/array elements and bound struct fields of a live value.
//!
//! Nested types are referenced through [`TypeRef`], which resolves lazily, so
//! describing a self-referential type terminates. Recursion is rejected later,
//! when the plan is compiled.
//!
//! # Example
//!
//! ```
//! use flatbin::shape::{Access, Binary, Field, Shape, TypeRef};
//!
//! // Hand-written registration, equivalent to #[derive(Binary)].
//! struct Stamp {
//!     secs: u32,
//!     nanos: u32,
//! }
//!
//! impl Binary for Stamp {
//!     fn shape() -> Shape {
//!         Shape::structure(
//!             "Stamp",
//!             vec![
//!                 Field::new("secs", true, TypeRef::of::<u32>()),
//!                 Field::new("nanos", true, TypeRef::of::<u32>()),
//!             ],
//!         )
//!     }
//! }
//!
//! impl Access for Stamp {
//!     fn len(&self) -> usize {
//!         2
//!     }
//!     fn child(&self, index: usize) -> Option<&dyn Access> {
//!         match index {
//!             0 => Some(&self.secs),
//!             1 => Some(&self.nanos),
//!             _ => None,
//!         }
//!     }
//!     fn child_mut(&mut self, index: usize) -> Option<&mut dyn Access> {
//!         match index {
//!             0 => Some(&mut self.secs),
//!             1 => Some(&mut self.nanos),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! assert_eq!(Stamp::shape().fields().map(<[_]>::len), Some(2));
//! ```

mod impls;
mod primitive;

pub use primitive::{Complex, Complex128, Complex64, Primitive, PrimitiveKind};

use std::any::{type_name, TypeId};
use std::fmt;

/// A type with a codec shape.
///
/// Implementations must describe the same layout every time `shape()` is
/// called, and their [`Access`] implementation must expose exactly the
/// children the shape declares.
pub trait Binary: Access + 'static {
    fn shape() -> Shape;
}

/// Runtime access to the parts of a value that a codec plan touches.
///
/// - primitive leaves implement `load`/`store`;
/// - arrays and sequences expose their elements as children `0..len()`;
/// - structs expose their bound fields as children, in declaration order.
///
/// Every method has a "nothing here" default.
pub trait Access {
    /// Current value of a primitive leaf.
    fn load(&self) -> Option<Primitive> {
        None
    }

    /// Overwrite a primitive leaf. Returns `false` if `value` has the wrong kind.
    fn store(&mut self, value: Primitive) -> bool {
        let _ = value;
        false
    }

    /// Number of children.
    fn len(&self) -> usize {
        0
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn child(&self, index: usize) -> Option<&dyn Access> {
        let _ = index;
        None
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut dyn Access> {
        let _ = index;
        None
    }
}

/// Lazy reference to a [`Binary`] type.
#[derive(Clone, Copy)]
pub struct TypeRef {
    id: fn() -> TypeId,
    name: fn() -> &'static str,
    shape: fn() -> Shape,
}

impl TypeRef {
    pub fn of<T: Binary>() -> Self {
        Self {
            id: TypeId::of::<T>,
            name: type_name::<T>,
            shape: T::shape,
        }
    }

    pub fn id(&self) -> TypeId {
        (self.id)()
    }

    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    /// Describe the referenced type.
    pub fn shape(&self) -> Shape {
        (self.shape)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.name()).finish()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for TypeRef {}

/// How a struct field takes part in the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Encoded and decoded; bound to a child of the value.
    Bound,
    /// Occupies wire space but is never bound: zeros on encode, discarded on decode.
    Skip,
    /// Not part of the shape at all.
    Hidden,
}

impl FieldRole {
    /// Classify a field from its name and visibility.
    ///
    /// Names starting with `_` mark skip fields whatever their visibility;
    /// remaining non-exported fields are hidden.
    pub fn classify(name: &str, exported: bool) -> Self {
        if name.starts_with('_') {
            Self::Skip
        } else if exported {
            Self::Bound
        } else {
            Self::Hidden
        }
    }
}

/// Struct field descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name (tuple fields use their index).
    pub name: &'static str,
    /// Field type.
    pub ty: TypeRef,
    /// Bound or skip (hidden fields never reach a [`Shape`]).
    pub role: FieldRole,
}

impl Field {
    /// Field descriptor; the role follows [`FieldRole::classify`].
    pub fn new(name: &'static str, exported: bool, ty: TypeRef) -> Self {
        Self {
            name,
            ty,
            role: FieldRole::classify(name, exported),
        }
    }

    pub fn is_skip(&self) -> bool {
        self.role == FieldRole::Skip
    }
}

/// Layout variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeKind {
    /// Fixed-width scalar.
    Primitive(PrimitiveKind),
    /// `len` contiguous elements.
    Array { len: usize, element: TypeRef },
    /// Elements whose count is the runtime length of the container.
    Sequence { element: TypeRef },
    /// Bound and skip fields in declaration order.
    Struct(Vec<Field>),
    /// A Rust type with no fixed-width wire representation.
    Opaque { reason: &'static str },
}

/// A complete shape descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    /// Type name, used in error messages.
    pub name: &'static str,
    pub kind: ShapeKind,
}

impl Shape {
    pub fn new(name: &'static str, kind: ShapeKind) -> Self {
        Self { name, kind }
    }

    pub fn primitive(name: &'static str, kind: PrimitiveKind) -> Self {
        Self::new(name, ShapeKind::Primitive(kind))
    }

    pub fn array(name: &'static str, len: usize, element: TypeRef) -> Self {
        Self::new(name, ShapeKind::Array { len, element })
    }

    pub fn sequence(name: &'static str, element: TypeRef) -> Self {
        Self::new(name, ShapeKind::Sequence { element })
    }

    /// Struct shape. Hidden fields are dropped here, leaving the flattened
    /// wire field list.
    pub fn structure(name: &'static str, fields: Vec<Field>) -> Self {
        let fields = fields
            .into_iter()
            .filter(|f| f.role != FieldRole::Hidden)
            .collect();
        Self::new(name, ShapeKind::Struct(fields))
    }

    pub fn opaque(name: &'static str, reason: &'static str) -> Self {
        Self::new(name, ShapeKind::Opaque { reason })
    }

    /// Get fields if this is a struct.
    pub fn fields(&self) -> Option<&[Field]> {
        match &self.kind {
            ShapeKind::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Bound fields with their child index.
    pub fn bound_fields(&self) -> impl Iterator<Item = (usize, &Field)> {
        self.fields()
            .unwrap_or_default()
            .iter()
            .filter(|f| f.role == FieldRole::Bound)
            .enumerate()
    }
}
