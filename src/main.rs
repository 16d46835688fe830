// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gagent API Server
//!
//! Answers user prompts through an OpenAI completion call, optionally
//! enriched with Google account context fetched via OAuth2 tokens.

use gagent::{
    config::Config,
    services::{AgentService, GoogleClient, OpenAiClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Gagent API");

    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set - AI endpoints run in echo mode");
    }

    // Initialize provider clients
    let google = GoogleClient::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.google_redirect_uri.clone(),
    )
    .expect("Failed to initialize Google client");

    let openai = OpenAiClient::new(config.openai_api_key.clone())
        .expect("Failed to initialize OpenAI client");

    let agent = AgentService::new(openai, google.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        google,
        agent,
    });

    // Build router
    let app = gagent::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gagent=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
