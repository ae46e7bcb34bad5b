// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec plans: compiled, ordered field-level operations for one type.
//!
//! A plan is built once per type from its [`Shape`](crate::shape::Shape) and
//! cached in a [`Registry`]. Both engines walk the same plan, so the byte
//! layout is identical in both directions:
//!
//! ```text
//! struct { a: i32, _pad: [u8; 4], b: f64 }
//!
//!   Field { 0, [Primitive(I32)] }     bytes 0..4
//!   Skip(4)                           bytes 4..8
//!   Field { 1, [Primitive(F64)] }     bytes 8..16
//! ```

mod compiler;
mod registry;

pub use registry::{LookupStats, Registry};

use crate::shape::{Access, PrimitiveKind};
use std::sync::Arc;

/// Where a repeated sub-plan takes its iteration count from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Statically known (arrays).
    Fixed(usize),
    /// The current length of the container being encoded or decoded into.
    Container,
}

/// One plan operation.
#[derive(Debug, Clone)]
pub enum Step {
    /// Transfer one primitive to/from the current value.
    Primitive(PrimitiveKind),
    /// Consume (decode) or zero-fill (encode) a window of bytes.
    Skip(usize),
    /// Run `plan` once against bound field `index` of the current value.
    Field { index: usize, plan: Arc<CodecPlan> },
    /// Run `plan` against each element of the current value.
    Repeat { count: Repeat, plan: Arc<CodecPlan> },
}

impl Step {
    /// Static width of this step, `None` if it depends on a container length.
    fn width(&self) -> Option<usize> {
        match self {
            Step::Primitive(kind) => Some(kind.width()),
            Step::Skip(n) => Some(*n),
            Step::Field { plan, .. } => plan.width(),
            Step::Repeat {
                count: Repeat::Fixed(n),
                plan,
            } => plan.width().and_then(|w| w.checked_mul(*n)),
            Step::Repeat {
                count: Repeat::Container,
                ..
            } => None,
        }
    }
}

/// Compiled plan for one type.
#[derive(Debug)]
pub struct CodecPlan {
    type_name: &'static str,
    steps: Vec<Step>,
    width: Option<usize>,
}

impl CodecPlan {
    pub(crate) fn new(type_name: &'static str, steps: Vec<Step>) -> Self {
        let width = steps
            .iter()
            .try_fold(0usize, |acc, step| acc.checked_add(step.width()?));
        Self {
            type_name,
            steps,
            width,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Static wire width, or `None` when the shape contains a sequence.
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Exact number of bytes `value` encodes to under this plan.
    ///
    /// Children missing from `value` count as zero bytes; the encoder reports
    /// them as mismatches.
    pub fn encoded_len(&self, value: &dyn Access) -> usize {
        if let Some(width) = self.width {
            return width;
        }
        self.steps
            .iter()
            .map(|step| match step {
                Step::Primitive(kind) => kind.width(),
                Step::Skip(n) => *n,
                Step::Field { index, plan } => value
                    .child(*index)
                    .map_or(0, |child| plan.encoded_len(child)),
                Step::Repeat { count, plan } => {
                    let n = match count {
                        Repeat::Fixed(n) => *n,
                        Repeat::Container => value.len(),
                    };
                    match plan.width() {
                        Some(w) => w * n,
                        None => (0..n)
                            .filter_map(|i| value.child(i))
                            .map(|child| plan.encoded_len(child))
                            .sum(),
                    }
                }
            })
            .sum()
    }
}
