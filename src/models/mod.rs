// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Domain models.

pub mod context;
pub mod tokens;

pub use context::{ContextSnapshot, EventSummary};
pub use tokens::TokenPair;
