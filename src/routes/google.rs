// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Google OAuth and account data routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::TokenPair;
use crate::services::google::{CalendarEvent, GmailMessageRef, GoogleUserInfo};
use crate::AppState;

/// Caps on the data endpoints (the AI context path uses its own, lower cap).
const MAX_CALENDAR_RESULTS: u32 = 10;
const MAX_GMAIL_RESULTS: u32 = 10;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/google/auth", get(auth_url))
        .route("/api/google/callback", get(callback))
        .route("/api/google/userinfo", get(userinfo))
        .route("/api/google/calendar", get(calendar))
        .route("/api/google/gmail", get(gmail))
}

// ─── OAuth flow ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AuthUrlResponse {
    pub url: String,
}

/// Authorization URL for the frontend's connect button.
async fn auth_url(State(state): State<Arc<AppState>>) -> Json<AuthUrlResponse> {
    Json(AuthUrlResponse {
        url: state.google.authorization_url(),
    })
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange the code and redirect to the frontend.
///
/// Every outcome is a redirect; the browser never sees a raw error
/// status from this endpoint. The access token rides back in a query
/// parameter, which exposes it to browser history - preserved behavior,
/// flagged in DESIGN.md.
async fn callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    let frontend = format!("{}/google", state.config.frontend_url);

    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Google");
        return Redirect::temporary(&format!("{}?error={}", frontend, urlencoding::encode(&error)));
    }

    let Some(code) = params.code else {
        tracing::warn!("No authorization code received");
        return Redirect::temporary(&format!("{}?error=no_code", frontend));
    };

    match state.google.exchange_code(&code).await {
        Ok(tokens) => {
            tracing::info!(
                has_refresh_token = tokens.refresh_token.is_some(),
                "OAuth tokens received"
            );
            Redirect::temporary(&format!(
                "{}?success=true&access_token={}",
                frontend,
                urlencoding::encode(&tokens.access_token)
            ))
        }
        Err(e) => {
            tracing::error!(error = %e, "Error exchanging code for tokens");
            Redirect::temporary(&format!("{}?error=token_exchange_failed", frontend))
        }
    }
}

// ─── Data endpoints ──────────────────────────────────────────────────────────

/// Token pair passed as query parameters on the data endpoints.
#[derive(Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl TokenQuery {
    /// 400 when the access token is absent, for any combination of other
    /// parameters.
    fn into_tokens(self) -> Result<TokenPair> {
        match self.access_token {
            Some(access_token) if !access_token.is_empty() => {
                Ok(TokenPair::from_request(access_token, self.refresh_token))
            }
            _ => Err(AppError::BadRequest("Missing access_token".to_string())),
        }
    }
}

#[derive(Serialize)]
pub struct UserInfoResponse {
    pub user: GoogleUserInfo,
}

/// Get the user's Google profile.
async fn userinfo(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<UserInfoResponse>> {
    let tokens = query.into_tokens()?;
    let user = state.google.fetch_userinfo(&tokens).await?;
    Ok(Json(UserInfoResponse { user }))
}

#[derive(Serialize)]
pub struct CalendarResponse {
    pub events: Vec<CalendarEvent>,
}

/// List upcoming events from the user's primary calendar.
async fn calendar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<CalendarResponse>> {
    let tokens = query.into_tokens()?;
    let events = state.google.list_events(&tokens, MAX_CALENDAR_RESULTS).await?;
    Ok(Json(CalendarResponse { events }))
}

#[derive(Serialize)]
pub struct GmailResponse {
    pub messages: Vec<GmailMessageRef>,
}

/// List the user's unread Gmail messages.
async fn gmail(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<GmailResponse>> {
    let tokens = query.into_tokens()?;
    let messages = state
        .google
        .list_unread_messages(&tokens, MAX_GMAIL_RESULTS)
        .await?;
    Ok(Json(GmailResponse { messages }))
}
