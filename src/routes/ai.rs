// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! AI answering routes.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::TokenPair;
use crate::services::CompletionOutcome;
use crate::time_utils::now_iso8601;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ai", post(ai))
        .route("/api/ai-agent", post(ai_agent))
}

/// Plain prompt request.
#[derive(Deserialize)]
pub struct AiRequest {
    #[serde(default)]
    prompt: Option<String>,
}

/// Prompt request with optional Google tokens.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAgentRequest {
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// AI answer response.
///
/// `result` and `response` carry the same text; both fields are part of
/// the wire contract the frontend was built against.
#[derive(Serialize)]
pub struct AiResponse {
    pub result: String,
    pub response: String,
    pub timestamp: String,
    pub status: &'static str,
}

impl From<CompletionOutcome> for AiResponse {
    fn from(outcome: CompletionOutcome) -> Self {
        let status = outcome.status();
        let text = outcome.text().to_string();
        Self {
            result: text.clone(),
            response: text,
            timestamp: now_iso8601(),
            status,
        }
    }
}

/// Reject absent or whitespace-only prompts before orchestration.
fn require_prompt(prompt: Option<String>) -> Result<String> {
    match prompt {
        Some(p) if !p.trim().is_empty() => Ok(p),
        _ => Err(AppError::BadRequest("Prompt is required".to_string())),
    }
}

/// Answer a prompt without Google context.
async fn ai(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AiRequest>,
) -> Result<Json<AiResponse>> {
    let prompt = require_prompt(request.prompt)?;

    let outcome = state.agent.answer_plain(&prompt).await;
    Ok(Json(outcome.into()))
}

/// Answer a prompt, enriched with Google context when tokens are given.
async fn ai_agent(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AiAgentRequest>,
) -> Result<Json<AiResponse>> {
    let prompt = require_prompt(request.prompt)?;

    let tokens = request
        .access_token
        .filter(|t| !t.is_empty())
        .map(|access_token| TokenPair::from_request(access_token, request.refresh_token));

    let outcome = state.agent.answer_with_google(&prompt, tokens.as_ref()).await;
    Ok(Json(outcome.into()))
}
