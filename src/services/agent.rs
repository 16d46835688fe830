// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Prompt orchestration: context enrichment, completion, echo fallback.
//!
//! The AI-answering path never returns an error for provider failures.
//! It degrades to an echo of the prompt, trading correctness for
//! availability of *some* response.

use crate::models::{ContextSnapshot, TokenPair};
use crate::services::context::fetch_context;
use crate::services::google::GoogleClient;
use crate::services::openai::OpenAiClient;

/// Echo prefix for the plain endpoint.
const ECHO_PREFIX: &str = "AI Echo";
/// Echo prefix for the Google-enriched endpoint.
const AGENT_ECHO_PREFIX: &str = "AI Agent Echo";

/// Outcome of answering a prompt.
///
/// `Fallback` signals that the provider call failed and an echo was
/// substituted; callers must treat it as a degraded, not absent, answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Completed(String),
    Fallback { text: String, cause: String },
}

impl CompletionOutcome {
    pub fn text(&self) -> &str {
        match self {
            CompletionOutcome::Completed(text) => text,
            CompletionOutcome::Fallback { text, .. } => text,
        }
    }

    /// Wire status string for the response body.
    pub fn status(&self) -> &'static str {
        match self {
            CompletionOutcome::Completed(_) => "success",
            CompletionOutcome::Fallback { .. } => "fallback",
        }
    }
}

/// Orchestrates prompt answering across the Google and OpenAI clients.
#[derive(Clone)]
pub struct AgentService {
    openai: OpenAiClient,
    google: GoogleClient,
}

impl AgentService {
    pub fn new(openai: OpenAiClient, google: GoogleClient) -> Self {
        Self { openai, google }
    }

    /// Answer a prompt with no Google context.
    pub async fn answer_plain(&self, prompt: &str) -> CompletionOutcome {
        if !self.openai.is_configured() {
            // Deliberate offline/demo mode, not an error path
            return CompletionOutcome::Completed(format!("{}: {}", ECHO_PREFIX, prompt));
        }

        match self.openai.complete(None, prompt).await {
            Ok(text) => CompletionOutcome::Completed(text),
            Err(e) => {
                tracing::error!(error = %e, "AI error");
                CompletionOutcome::Fallback {
                    text: format!("{}: {}", ECHO_PREFIX, prompt),
                    cause: e.to_string(),
                }
            }
        }
    }

    /// Answer a prompt, enriched with the user's Google context when a
    /// token pair is supplied.
    ///
    /// Context fetching is best-effort: any failure there leaves the
    /// snapshot empty and the answer proceeds. Only the completion call
    /// itself can trigger the fallback.
    pub async fn answer_with_google(
        &self,
        prompt: &str,
        tokens: Option<&TokenPair>,
    ) -> CompletionOutcome {
        let snapshot = match tokens {
            Some(tokens) => fetch_context(&self.google, tokens).await,
            None => ContextSnapshot::default(),
        };

        if !self.openai.is_configured() {
            let mut text = format!("{}: {}", AGENT_ECHO_PREFIX, prompt);
            if !snapshot.is_empty() {
                text.push_str("\n\nWith Google Context:\n");
                text.push_str(&snapshot.render());
            }
            return CompletionOutcome::Completed(text);
        }

        let system = (!snapshot.is_empty()).then(|| system_instruction(&snapshot));

        match self.openai.complete(system.as_deref(), prompt).await {
            Ok(text) => CompletionOutcome::Completed(text),
            Err(e) => {
                tracing::error!(error = %e, "AI Agent error");
                CompletionOutcome::Fallback {
                    text: format!("{}: {}", AGENT_ECHO_PREFIX, prompt),
                    cause: e.to_string(),
                }
            }
        }
    }
}

/// System instruction embedding the rendered context snapshot.
fn system_instruction(snapshot: &ContextSnapshot) -> String {
    format!(
        "You are a helpful AI assistant with access to the user's Google services.\n\
         Here's the user's current context:\n{}\n\
         You can help with calendar management, email insights, and personal productivity. \
         Always be helpful and accurate.",
        snapshot.render()
    )
}
