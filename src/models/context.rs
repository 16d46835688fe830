// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-request snapshot of the user's Google account data.

/// Display-ready projection of a calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub title: String,
    pub when: String,
}

impl EventSummary {
    /// Placeholder used when the provider omits an event title.
    pub const UNTITLED: &'static str = "(no title)";
}

/// Ephemeral summary of the user's account, recomputed per request and
/// never cached. Any field may be absent when the corresponding fetch
/// failed; absence is not an error.
#[derive(Debug, Clone, Default)]
pub struct ContextSnapshot {
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub upcoming_events: Vec<EventSummary>,
}

impl ContextSnapshot {
    /// True when no fetch produced anything usable. An empty snapshot
    /// means the prompt is answered without a system instruction.
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none() && self.user_email.is_none() && self.upcoming_events.is_empty()
    }

    /// Render the snapshot as a prompt context block.
    ///
    /// Profile line (when known) followed by bulleted upcoming events,
    /// with an explicit marker when the calendar came back empty.
    pub fn render(&self) -> String {
        let mut out = String::new();

        match (&self.user_name, &self.user_email) {
            (Some(name), Some(email)) => out.push_str(&format!("User: {} ({})\n", name, email)),
            (Some(name), None) => out.push_str(&format!("User: {}\n", name)),
            (None, Some(email)) => out.push_str(&format!("User: {}\n", email)),
            (None, None) => {}
        }

        out.push_str("Upcoming Calendar Events:\n");
        if self.upcoming_events.is_empty() {
            out.push_str("No upcoming events\n");
        } else {
            for event in &self.upcoming_events {
                out.push_str(&format!("- {} ({})\n", event.title, event.when));
            }
        }

        out
    }
}
