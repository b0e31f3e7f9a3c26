use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::document::DocumentStore;
use crate::templates_structs::{PageContext, DocumentListTemplate};

/// GET /
/// Lists every document in the store.
pub async fn list(
    store: web::Data<DocumentStore>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let documents = store.list()?;
    let ctx = PageContext::build(&session, &config);
    render(DocumentListTemplate { ctx, documents })
}
