//! One-shot session messages.
//!
//! Handlers push messages before redirecting; `PageContext::build` drains the
//! queue, so each message is shown on exactly one rendered page.

use actix_session::Session;
use serde::{Deserialize, Serialize};

const SESSION_KEY: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Error, message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == FlashKind::Error
    }

    /// CSS class used by the layout template.
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "flash-success",
            FlashKind::Error => "flash-error",
        }
    }
}

/// Append a message to the session's queue.
pub fn push(session: &Session, flash: Flash) {
    let mut queue = peek(session);
    queue.push(flash);
    if let Err(e) = session.insert(SESSION_KEY, &queue) {
        log::warn!("Failed to store flash message: {e}");
    }
}

/// Messages currently queued, without clearing them.
pub fn peek(session: &Session) -> Vec<Flash> {
    session
        .get::<Vec<Flash>>(SESSION_KEY)
        .unwrap_or(None)
        .unwrap_or_default()
}

/// Remove and return every queued message.
pub fn take(session: &Session) -> Vec<Flash> {
    let queue = peek(session);
    if !queue.is_empty() {
        session.remove(SESSION_KEY);
    }
    queue
}
