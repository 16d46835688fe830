// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! External provider clients and orchestration services.

pub mod agent;
pub mod context;
pub mod google;
pub mod openai;

pub use agent::{AgentService, CompletionOutcome};
pub use google::GoogleClient;
pub use openai::OpenAiClient;
