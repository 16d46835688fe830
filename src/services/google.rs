// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Google API client for OAuth2 and account data reads.
//!
//! Handles:
//! - Authorization URL construction (offline access, forced consent)
//! - Authorization code exchange
//! - Userinfo, calendar, and Gmail reads with per-call credentials
//!
//! Tokens are injected per call via `bearer_auth` on a fresh request, so
//! concurrent requests can never observe each other's credentials.

use crate::error::AppError;
use crate::models::TokenPair;
use crate::time_utils::format_utc_rfc3339;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const API_BASE: &str = "https://www.googleapis.com";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Scopes requested at authorization time.
///
/// Drive is requested but not consumed by any endpoint; narrowing this
/// list is tracked in DESIGN.md.
const SCOPES: [&str; 6] = [
    "https://www.googleapis.com/auth/calendar.readonly",
    "https://www.googleapis.com/auth/calendar.events",
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/userinfo.profile",
    "https://www.googleapis.com/auth/gmail.readonly",
    "https://www.googleapis.com/auth/drive.readonly",
];

/// Google API client.
#[derive(Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    api_base: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleClient {
    /// Create a new Google client with OAuth credentials.
    pub fn new(
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed building Google HTTP client")?;

        Ok(Self {
            http,
            api_base: API_BASE.to_string(),
            token_url: TOKEN_URL.to_string(),
            client_id,
            client_secret,
            redirect_uri,
        })
    }

    /// Override the API base URL (tests point this at an unreachable or
    /// mock server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the token endpoint URL.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    // ─── OAuth2 ──────────────────────────────────────────────────────────────

    /// Build the authorization URL the frontend sends the user to.
    ///
    /// `access_type=offline` plus `prompt=consent` forces Google to return
    /// a refresh token even on repeat authorization.
    pub fn authorization_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
            AUTH_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&SCOPES.join(" ")),
        )
    }

    /// Exchange an authorization code for a token pair.
    ///
    /// The result is returned to the caller for client-side storage and
    /// never persisted here.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenPair, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::AuthExchange(format!("Token exchange request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Google token exchange failed");
            return Err(AppError::AuthExchange(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        let token_response: TokenExchangeResponse = response
            .json()
            .await
            .map_err(|e| AppError::AuthExchange(format!("Failed to parse token response: {}", e)))?;

        let expiry = token_response
            .expires_in
            .map(|secs| chrono::Utc::now().timestamp() + secs);

        Ok(TokenPair {
            access_token: token_response.access_token,
            refresh_token: token_response.refresh_token,
            expiry,
        })
    }

    // ─── Authenticated reads ─────────────────────────────────────────────────

    /// Get the authenticated user's profile.
    pub async fn fetch_userinfo(&self, tokens: &TokenPair) -> Result<GoogleUserInfo, AppError> {
        let url = format!("{}/oauth2/v2/userinfo", self.api_base);
        self.get_json(&url, tokens, &[]).await
    }

    /// List upcoming events from the primary calendar.
    ///
    /// Events start at or after the current instant and come back ordered
    /// by start time ascending, at most `max_results` of them. Ordering
    /// and the cap are enforced locally as well, in case the provider
    /// ever returns them loose.
    pub async fn list_events(
        &self,
        tokens: &TokenPair,
        max_results: u32,
    ) -> Result<Vec<CalendarEvent>, AppError> {
        let url = format!("{}/calendar/v3/calendars/primary/events", self.api_base);
        let time_min = format_utc_rfc3339(chrono::Utc::now());

        let response: EventListResponse = self
            .get_json(
                &url,
                tokens,
                &[
                    ("maxResults", max_results.to_string()),
                    ("singleEvents", "true".to_string()),
                    ("orderBy", "startTime".to_string()),
                    ("timeMin", time_min),
                ],
            )
            .await?;

        let mut events = response.items.unwrap_or_default();
        sort_and_truncate_events(&mut events, max_results as usize);
        Ok(events)
    }

    /// List the user's unread Gmail messages (id/threadId references).
    pub async fn list_unread_messages(
        &self,
        tokens: &TokenPair,
        max_results: u32,
    ) -> Result<Vec<GmailMessageRef>, AppError> {
        let url = format!("{}/gmail/v1/users/me/messages", self.api_base);

        let response: MessageListResponse = self
            .get_json(
                &url,
                tokens,
                &[
                    ("maxResults", max_results.to_string()),
                    ("q", "is:unread".to_string()),
                ],
            )
            .await?;

        Ok(response.messages.unwrap_or_default())
    }

    /// Generic authenticated GET with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        tokens: &TokenPair,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&tokens.access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::GoogleApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GoogleApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GoogleApi(format!("JSON parse error: {}", e)))
    }
}

/// Order events by start ascending and keep the first `max`.
fn sort_and_truncate_events(events: &mut Vec<CalendarEvent>, max: usize) {
    // RFC3339 timestamps and YYYY-MM-DD dates sort correctly as strings
    events.sort_by(|a, b| a.start_key().cmp(&b.start_key()));
    events.truncate(max);
}

// ─── Wire types ──────────────────────────────────────────────────────────────

/// Token exchange response from the Google OAuth token endpoint.
#[derive(Debug, Clone, Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

/// Userinfo response (v2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleUserInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Calendar event as returned by the events list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub summary: Option<String>,
    pub start: Option<EventTime>,
}

impl CalendarEvent {
    /// Start timestamp used for ordering; precise time preferred over a
    /// date-only value.
    pub fn start_key(&self) -> Option<&str> {
        self.start
            .as_ref()
            .and_then(|s| s.date_time.as_deref().or(s.date.as_deref()))
    }
}

/// Event start/end time: either a precise timestamp or an all-day date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTime {
    #[serde(rename = "dateTime", skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Events list envelope.
#[derive(Debug, Clone, Deserialize)]
struct EventListResponse {
    items: Option<Vec<CalendarEvent>>,
}

/// Gmail message reference from the messages list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GmailMessageRef {
    pub id: String,
    #[serde(rename = "threadId")]
    pub thread_id: String,
}

/// Gmail messages list envelope.
#[derive(Debug, Clone, Deserialize)]
struct MessageListResponse {
    messages: Option<Vec<GmailMessageRef>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GoogleClient {
        GoogleClient::new(
            "client-123".to_string(),
            "secret".to_string(),
            "http://localhost:5001/api/google/callback".to_string(),
        )
        .unwrap()
    }

    fn timed_event(id: &str, date_time: &str) -> CalendarEvent {
        CalendarEvent {
            id: Some(id.to_string()),
            summary: Some(id.to_string()),
            start: Some(EventTime {
                date_time: Some(date_time.to_string()),
                date: None,
            }),
        }
    }

    #[test]
    fn test_authorization_url_requests_offline_consent() {
        let url = test_client().authorization_url();

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        assert!(url.contains("response_type=code"));
        // Scopes are space-joined then percent-encoded
        assert!(url.contains("calendar.readonly%20"));
        assert!(url.contains("gmail.readonly"));
    }

    #[test]
    fn test_authorization_url_is_deterministic() {
        let client = test_client();
        assert_eq!(client.authorization_url(), client.authorization_url());
    }

    #[test]
    fn test_events_sorted_ascending_and_truncated() {
        let mut events = vec![
            timed_event("c", "2026-08-09T10:00:00Z"),
            timed_event("a", "2026-08-07T10:00:00Z"),
            timed_event("b", "2026-08-08T10:00:00Z"),
        ];

        sort_and_truncate_events(&mut events, 2);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id.as_deref(), Some("a"));
        assert_eq!(events[1].id.as_deref(), Some("b"));
    }

    #[test]
    fn test_start_key_prefers_date_time_over_date() {
        let event = CalendarEvent {
            id: None,
            summary: None,
            start: Some(EventTime {
                date_time: Some("2026-08-07T10:00:00Z".to_string()),
                date: Some("2026-08-07".to_string()),
            }),
        };
        assert_eq!(event.start_key(), Some("2026-08-07T10:00:00Z"));

        let all_day = CalendarEvent {
            id: None,
            summary: None,
            start: Some(EventTime {
                date_time: None,
                date: Some("2026-08-07".to_string()),
            }),
        };
        assert_eq!(all_day.start_key(), Some("2026-08-07"));
    }

    #[test]
    fn test_event_deserialization_from_api_shape() {
        let json = r#"{
            "id": "evt1",
            "summary": "Standup",
            "start": { "dateTime": "2026-08-07T09:00:00Z" }
        }"#;

        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.summary.as_deref(), Some("Standup"));
        assert_eq!(event.start_key(), Some("2026-08-07T09:00:00Z"));
    }
}
