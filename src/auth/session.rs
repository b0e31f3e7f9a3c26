use actix_session::Session;

use crate::auth::flash::{self, Flash};
use crate::errors::AppError;

const USER_KEY: &str = "user";

pub const NOT_SIGNED_IN: &str = "You must be signed in to do that.";

pub fn get_username(session: &Session) -> Option<String> {
    session.get::<String>(USER_KEY).unwrap_or(None)
}

pub fn is_signed_in(session: &Session) -> bool {
    get_username(session).is_some()
}

/// Guard for mutating routes. Queues an error flash and yields
/// `AppError::Unauthorized` (a redirect to `/`) when nobody is signed in.
pub fn require_signed_in(session: &Session) -> Result<String, AppError> {
    match get_username(session) {
        Some(username) => Ok(username),
        None => {
            flash::push(session, Flash::error(NOT_SIGNED_IN));
            Err(AppError::Unauthorized)
        }
    }
}

pub fn sign_in(session: &Session, username: &str) -> Result<(), AppError> {
    session
        .insert(USER_KEY, username)
        .map_err(|e| AppError::Session(e.to_string()))
}

/// Forget the signed-in user. The CSRF token and flash queue are kept.
pub fn sign_out(session: &Session) -> Option<String> {
    let username = get_username(session);
    session.remove(USER_KEY);
    username
}
