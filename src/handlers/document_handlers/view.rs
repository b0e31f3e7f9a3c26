use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::flash::{self, Flash};
use crate::errors::AppError;
use crate::handlers::redirect_to_index;
use crate::models::document::{DocumentStore, StoreError};

/// GET /{filename}
/// Serves the document with its filetype's content type; Markdown is rendered
/// to HTML. Missing or unsupported documents redirect to the list.
pub async fn show(
    store: web::Data<DocumentStore>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let filename = path.into_inner();

    match store.read(&filename) {
        Ok(doc) => Ok(HttpResponse::Ok()
            .content_type(doc.content_type())
            .body(doc.render())),
        Err(e @ StoreError::NotFound(_)) => {
            flash::push(&session, Flash::error(e.to_string()));
            Ok(redirect_to_index())
        }
        Err(e) => Err(e.into()),
    }
}
