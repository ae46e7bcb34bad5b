// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent plan cache keyed by type identity.
//!
//! Lookups take a shared read lock only. Compilation runs outside any lock, so
//! a reader never waits for another type's plan to be built. Insertion takes
//! the write lock and keeps whichever plan landed first: concurrent first use
//! of one type may compile it twice, but every caller gets the same `Arc`.
//!
//! Entries are never evicted. Shape errors are not cached; a failing type is
//! recompiled (and fails fast) on every request.

use super::compiler::Compiler;
use super::CodecPlan;
use crate::error::ShapeError;
use crate::shape::{Binary, TypeRef};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

static GLOBAL_REGISTRY: OnceLock<Arc<Registry>> = OnceLock::new();

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    /// Requests served from the cache.
    pub hits: u64,
    /// Requests that compiled a plan.
    pub misses: u64,
    /// Requests whose compilation failed.
    pub failures: u64,
}

/// Plan registry.
#[derive(Default)]
pub struct Registry {
    plans: RwLock<HashMap<TypeId, Arc<CodecPlan>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    failures: AtomicU64,
}

impl Registry {
    /// Empty registry, independent from every other one.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, created on first use.
    pub fn global() -> Arc<Registry> {
        Arc::clone(GLOBAL_REGISTRY.get_or_init(|| Arc::new(Registry::new())))
    }

    /// Plan for `T`, compiled on first request.
    pub fn plan<T: Binary>(&self) -> Result<Arc<CodecPlan>, ShapeError> {
        self.plan_for(TypeRef::of::<T>())
    }

    /// Plan for the type behind `ty`.
    pub fn plan_for(&self, ty: TypeRef) -> Result<Arc<CodecPlan>, ShapeError> {
        if let Some(plan) = self.lookup(ty.id()) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::trace!("[flatbin] plan cache hit for {}", plan.type_name());
            return Ok(plan);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        match Compiler::new(self).resolve(ty) {
            Ok(plan) => {
                log::debug!(
                    "[flatbin] compiled plan for {} ({} steps, width {:?})",
                    plan.type_name(),
                    plan.steps().len(),
                    plan.width()
                );
                Ok(plan)
            }
            Err(err) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                log::debug!("[flatbin] rejected {}: {}", ty.name(), err);
                Err(err)
            }
        }
    }

    /// Static wire width of `T`, `None` if it contains a sequence.
    pub fn wire_size<T: Binary>(&self) -> Result<Option<usize>, ShapeError> {
        Ok(self.plan::<T>()?.width())
    }

    pub fn contains<T: Binary>(&self) -> bool {
        self.plans.read().contains_key(&TypeId::of::<T>())
    }

    /// Number of cached plans (nested types included).
    pub fn len(&self) -> usize {
        self.plans.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.read().is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> LookupStats {
        LookupStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn lookup(&self, id: TypeId) -> Option<Arc<CodecPlan>> {
        self.plans.read().get(&id).map(Arc::clone)
    }

    /// Insert `plan` unless another caller got there first; returns the cached plan.
    pub(crate) fn insert(&self, id: TypeId, plan: CodecPlan) -> Arc<CodecPlan> {
        let mut plans = self.plans.write();
        Arc::clone(plans.entry(id).or_insert_with(|| Arc::new(plan)))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("plans", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}
