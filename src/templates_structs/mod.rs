// Template context structures for Askama templates, organized by page family.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::flash::{self, Flash};
use crate::auth::session::get_username;
use crate::config::AppConfig;

mod common;
mod document;

pub use self::common::{NotFoundTemplate, SigninTemplate};
pub use self::document::{DocumentEditTemplate, DocumentListTemplate, DocumentNewTemplate};

/// Common context shared by all rendered pages.
/// Templates access these as `ctx.username`, `ctx.flashes`, etc.
pub struct PageContext {
    pub app_name: String,
    pub signed_in: bool,
    /// Empty when nobody is signed in.
    pub username: String,
    pub flashes: Vec<Flash>,
    pub csrf_token: String,
}

impl PageContext {
    /// Builds the context and drains the session's flash queue.
    pub fn build(session: &Session, config: &AppConfig) -> Self {
        let username = get_username(session);
        Self {
            app_name: config.app_name.clone(),
            signed_in: username.is_some(),
            username: username.unwrap_or_default(),
            flashes: flash::take(session),
            csrf_token: csrf::get_or_create_token(session),
        }
    }
}
