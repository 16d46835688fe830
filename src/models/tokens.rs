// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! OAuth2 token pair owned by the client.
//!
//! Tokens are never persisted server-side: they arrive with each request
//! and are used atomically as one in/out parameter.

use serde::{Deserialize, Serialize};

/// Access/refresh token pair produced by the OAuth2 code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Access token expiry as Unix seconds, when the provider reported one.
    /// Expired tokens are passed through as-is; downstream calls fail and
    /// are surfaced via the fallback path or data-endpoint errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
}

impl TokenPair {
    /// Build a pair from request parameters (no expiry information).
    pub fn from_request(access_token: String, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token,
            expiry: None,
        }
    }
}
