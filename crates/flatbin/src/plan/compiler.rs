// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shape -> plan compilation.
//!
//! Nested types are resolved through the registry so every sub-plan is the
//! canonical cached one. Types currently being compiled sit on a stack; meeting
//! one of them again means the shape contains itself.

use super::{CodecPlan, Registry, Repeat, Step};
use crate::error::ShapeError;
use crate::shape::{FieldRole, ShapeKind, TypeRef};
use std::any::TypeId;
use std::sync::Arc;

pub(crate) struct Compiler<'r> {
    registry: &'r Registry,
    stack: Vec<TypeId>,
}

impl<'r> Compiler<'r> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            stack: Vec::new(),
        }
    }

    /// Cached plan for `ty`, compiling (and caching) it and its nested types on a miss.
    pub(crate) fn resolve(&mut self, ty: TypeRef) -> Result<Arc<CodecPlan>, ShapeError> {
        let id = ty.id();
        if let Some(plan) = self.registry.lookup(id) {
            return Ok(plan);
        }
        if self.stack.contains(&id) {
            return Err(ShapeError::Recursive {
                type_name: ty.shape().name,
            });
        }

        self.stack.push(id);
        let built = self.build(ty);
        self.stack.pop();

        Ok(self.registry.insert(id, built?))
    }

    fn build(&mut self, ty: TypeRef) -> Result<CodecPlan, ShapeError> {
        let shape = ty.shape();
        let steps = match shape.kind {
            ShapeKind::Primitive(kind) => vec![Step::Primitive(kind)],
            ShapeKind::Array { len, element } => vec![Step::Repeat {
                count: Repeat::Fixed(len),
                plan: self.resolve(element)?,
            }],
            ShapeKind::Sequence { element } => vec![Step::Repeat {
                count: Repeat::Container,
                plan: self.resolve(element)?,
            }],
            ShapeKind::Struct(fields) => {
                let mut steps = Vec::with_capacity(fields.len());
                let mut index = 0;
                for field in fields {
                    match field.role {
                        FieldRole::Bound => {
                            steps.push(Step::Field {
                                index,
                                plan: self.resolve(field.ty)?,
                            });
                            index += 1;
                        }
                        FieldRole::Skip => {
                            let plan = self.resolve(field.ty)?;
                            let width = plan.width().ok_or(ShapeError::Unsupported {
                                type_name: shape.name,
                                reason: "skip field has no static width",
                            })?;
                            steps.push(Step::Skip(width));
                        }
                        FieldRole::Hidden => {}
                    }
                }
                steps
            }
            ShapeKind::Opaque { reason } => {
                return Err(ShapeError::Unsupported {
                    type_name: shape.name,
                    reason,
                })
            }
        };

        Ok(CodecPlan::new(shape.name, steps))
    }
}
