// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoder and encoder engines.
//!
//! Both walk a [`CodecPlan`](crate::plan::CodecPlan) against a value:
//! one stream read or write per primitive leaf, through a scratch buffer
//! sized to the widest single transfer. An engine instance owns its stream,
//! scratch buffer and byte order and is not meant to be shared between
//! threads; the plan registry it points to is.

mod decoder;
mod encoder;
mod order;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use order::ByteOrder;

use crate::config::SCRATCH_LEN;
use crate::error::ShapeError;
use crate::plan::CodecPlan;

type Scratch = [u8; SCRATCH_LEN];

fn missing_child(plan: &CodecPlan, index: usize) -> ShapeError {
    ShapeError::Mismatch {
        type_name: plan.type_name(),
        detail: format!("no child at index {}", index),
    }
}
