// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Best-effort context assembly against a mock Google API.
//!
//! One read failing must leave the other's fields populated, and the
//! enriched AI endpoint must keep answering either way.

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use gagent::config::Config;
use gagent::models::TokenPair;
use gagent::services::context::fetch_context;
use gagent::services::GoogleClient;
use serde_json::json;

mod common;

/// Serve a fake Google API on an ephemeral port. Each flag selects
/// whether that read succeeds or returns a 500.
async fn mock_google(userinfo_ok: bool, calendar_ok: bool) -> String {
    let userinfo = move || async move {
        if userinfo_ok {
            Ok(Json(json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com"
            })))
        } else {
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    };

    let calendar = move || async move {
        if calendar_ok {
            Ok(Json(json!({
                "items": [
                    { "id": "e2", "summary": "Review", "start": { "dateTime": "2099-01-02T10:00:00Z" } },
                    { "id": "e1", "start": { "date": "2099-01-01" } }
                ]
            })))
        } else {
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    };

    let app = Router::new()
        .route("/oauth2/v2/userinfo", get(userinfo))
        .route("/calendar/v3/calendars/primary/events", get(calendar));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client_for(base: &str) -> GoogleClient {
    common::test_google_client(&Config::default()).with_api_base(base)
}

fn tokens() -> TokenPair {
    TokenPair::from_request("test-token".to_string(), None)
}

#[tokio::test]
async fn test_profile_survives_calendar_failure() {
    let base = mock_google(true, false).await;
    let snapshot = fetch_context(&client_for(&base), &tokens()).await;

    assert_eq!(snapshot.user_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(snapshot.user_email.as_deref(), Some("ada@example.com"));
    assert!(snapshot.upcoming_events.is_empty());
    assert!(!snapshot.is_empty());
}

#[tokio::test]
async fn test_calendar_survives_profile_failure() {
    let base = mock_google(false, true).await;
    let snapshot = fetch_context(&client_for(&base), &tokens()).await;

    assert!(snapshot.user_name.is_none());
    assert!(snapshot.user_email.is_none());
    assert_eq!(snapshot.upcoming_events.len(), 2);
    // Ordered by start ascending; date-only start sorts by its day
    assert_eq!(snapshot.upcoming_events[0].when, "2099-01-01");
    // Missing summary gets the placeholder title
    assert_eq!(snapshot.upcoming_events[0].title, "(no title)");
    assert_eq!(snapshot.upcoming_events[1].title, "Review");
}

/// Full success path through the HTTP surface: the echo answer embeds
/// the fetched context.
#[tokio::test]
async fn test_ai_agent_echo_includes_fetched_context() {
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    let base = mock_google(true, true).await;
    let config = Config::default();
    let google = common::test_google_client(&config).with_api_base(base.as_str());
    let openai = gagent::services::OpenAiClient::new(None).unwrap();
    let (app, _state) = common::build_app(config, google, openai);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ai-agent")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"prompt":"what's next?","accessToken":"test-token"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "success");
    let result = json["result"].as_str().unwrap();
    assert!(result.starts_with("AI Agent Echo: what's next?"));
    assert!(result.contains("With Google Context:"));
    assert!(result.contains("User: Ada Lovelace (ada@example.com)"));
    assert!(result.contains("- Review (2099-01-02T10:00:00Z)"));
}
