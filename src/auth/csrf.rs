//! Per-session CSRF tokens for POST forms.
//!
//! `PageContext::build` puts the token into every rendered page; each form
//! echoes it back in a `csrf_token` field.

use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const SESSION_KEY: &str = "csrf_token";

fn stored_token(session: &Session) -> Option<String> {
    session
        .get::<String>(SESSION_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

/// The session's token, minting and storing one on first use.
pub fn get_or_create_token(session: &Session) -> String {
    if let Some(token) = stored_token(session) {
        return token;
    }
    let token = hex::encode(rand::rng().random::<[u8; 32]>());
    if let Err(e) = session.insert(SESSION_KEY, &token) {
        log::warn!("Failed to store CSRF token: {e}");
    }
    token
}

/// Whether `submitted` matches the session's token. A session without a token
/// matches nothing.
pub fn token_matches(session: &Session, submitted: &str) -> bool {
    stored_token(session).is_some_and(|token| same_bytes(token.as_bytes(), submitted.as_bytes()))
}

/// Reject a form whose token doesn't match the session's.
pub fn validate_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    if token_matches(session, submitted) {
        Ok(())
    } else {
        log::warn!("Rejected form submission with bad CSRF token");
        Err(AppError::Csrf)
    }
}

// Compares every byte regardless of where the first difference is.
fn same_bytes(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
