// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! OpenAI chat completion client.

use crate::error::AppError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_BASE: &str = "https://api.openai.com/v1";
const MODEL: &str = "gpt-3.5-turbo";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Placeholder returned when the provider reply has no content.
const NO_RESPONSE: &str = "No response";

/// OpenAI API client.
///
/// Constructed without a key, the client is unconfigured and the agent
/// service answers in echo mode instead of calling out.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed building OpenAI HTTP client")?;

        Ok(Self {
            http,
            base_url: API_BASE.to_string(),
            api_key,
        })
    }

    /// Override the API base URL (tests point this at an unreachable or
    /// mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// True when an API key is configured and real completions can run.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run a chat completion: optional system instruction plus one user
    /// turn. Returns the first choice's text.
    pub async fn complete(
        &self,
        system: Option<&str>,
        prompt: &str,
    ) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Completion("No API key configured".to_string()))?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system",
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt.to_string(),
        });

        let request = ChatCompletionRequest {
            model: MODEL,
            messages,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Completion(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Completion(format!("HTTP {}: {}", status, body)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Completion(format!("JSON parse error: {}", e)))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_else(|| NO_RESPONSE.to_string()))
    }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
