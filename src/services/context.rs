// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Best-effort assembly of the user's context snapshot.
//!
//! The profile and calendar reads are independent; either may fail
//! without failing the other. A Google hiccup must never block the
//! primary AI response, so failures log a warning and contribute absence.

use crate::models::{ContextSnapshot, EventSummary, TokenPair};
use crate::services::google::GoogleClient;

/// Upper bound on events embedded as prompt context.
pub const MAX_CONTEXT_EVENTS: u32 = 5;

/// Fetch a snapshot of the user's profile and upcoming events.
///
/// Returns whatever subset of the reads succeeded; never an error.
pub async fn fetch_context(google: &GoogleClient, tokens: &TokenPair) -> ContextSnapshot {
    let (userinfo, events) = tokio::join!(
        google.fetch_userinfo(tokens),
        google.list_events(tokens, MAX_CONTEXT_EVENTS),
    );

    let mut snapshot = ContextSnapshot::default();

    match userinfo {
        Ok(user) => {
            snapshot.user_name = user.name;
            snapshot.user_email = user.email;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch Google profile for context");
        }
    }

    match events {
        Ok(events) => {
            snapshot.upcoming_events = events
                .into_iter()
                .map(|event| EventSummary {
                    when: event.start_key().unwrap_or_default().to_string(),
                    title: event
                        .summary
                        .unwrap_or_else(|| EventSummary::UNTITLED.to_string()),
                })
                .collect();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch calendar events for context");
        }
    }

    snapshot
}
