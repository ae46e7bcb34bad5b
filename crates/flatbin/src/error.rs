// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for shape compilation and stream I/O.

use thiserror::Error;

/// A type whose shape cannot be turned into a codec plan.
///
/// Raised at plan-compile time, before any byte is read or written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The type (or one of its fields) has no fixed-width wire representation.
    #[error("unsupported type {type_name}: {reason}")]
    Unsupported {
        type_name: &'static str,
        reason: &'static str,
    },
    /// The type contains itself, directly or through its fields.
    #[error("unsupported recursive type {type_name}")]
    Recursive { type_name: &'static str },
    /// A value's `Access` implementation disagrees with the shape it declared.
    #[error("value of type {type_name} does not match its shape: {detail}")]
    Mismatch {
        type_name: &'static str,
        detail: String,
    },
}

/// Errors returned by encode/decode operations.
///
/// Any error means the operation did not complete. A failed decode may leave
/// the destination partially written, and a failed encode may leave partial
/// bytes in the sink.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    /// The stream ended before a primitive or skip window was complete.
    #[error("short read: wanted {wanted} bytes, got {got}")]
    ShortRead { wanted: usize, got: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for shape (plan-compile or binding) failures.
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    /// True for stream failures, short reads included.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::ShortRead { .. } | Self::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
