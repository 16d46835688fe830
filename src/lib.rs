// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gagent: AI assistant backend with Google account context
//!
//! This crate provides the backend API for answering user prompts through
//! an OpenAI completion call, optionally enriched with the user's Google
//! profile and upcoming calendar events fetched via OAuth2 tokens.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{AgentService, GoogleClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub google: GoogleClient,
    pub agent: AgentService,
}
