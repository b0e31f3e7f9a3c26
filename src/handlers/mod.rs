pub mod auth_handlers;
pub mod document_handlers;

use actix_web::HttpResponse;

/// 302 back to the document list, where queued flash messages are shown.
pub(crate) fn redirect_to_index() -> HttpResponse {
    HttpResponse::Found()
        .insert_header(("Location", "/"))
        .finish()
}

/// Fallback for unmatched routes.
pub async fn not_found(
    config: actix_web::web::Data<crate::config::AppConfig>,
) -> Result<HttpResponse, crate::errors::AppError> {
    let tmpl = crate::templates_structs::NotFoundTemplate { app_name: config.app_name.clone() };
    crate::errors::render_with_status(tmpl, actix_web::http::StatusCode::NOT_FOUND)
}
