// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use gagent::config::Config;
use gagent::routes::create_router;
use gagent::services::{AgentService, GoogleClient, OpenAiClient};
use gagent::AppState;
use std::sync::Arc;

/// Base URL nothing listens on; connections are refused immediately.
#[allow(dead_code)]
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Create a test app in echo mode (no OpenAI key configured).
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let google = test_google_client(&config);
    let openai = OpenAiClient::new(config.openai_api_key.clone()).unwrap();
    build_app(config, google, openai)
}

/// Create a test app with explicit provider clients.
#[allow(dead_code)]
pub fn build_app(
    config: Config,
    google: GoogleClient,
    openai: OpenAiClient,
) -> (axum::Router, Arc<AppState>) {
    let agent = AgentService::new(openai, google.clone());
    let state = Arc::new(AppState {
        config,
        google,
        agent,
    });

    (create_router(state.clone()), state)
}

/// Google client built from the test config.
#[allow(dead_code)]
pub fn test_google_client(config: &Config) -> GoogleClient {
    GoogleClient::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.google_redirect_uri.clone(),
    )
    .unwrap()
}
