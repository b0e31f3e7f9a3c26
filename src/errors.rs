use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

use crate::models::document::StoreError;

#[derive(Debug)]
pub enum AppError {
    /// No signed-in user; the guard has already queued a flash message.
    Unauthorized,
    Csrf,
    Store(StoreError),
    Template(askama::Error),
    Session(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized => write!(f, "Not signed in"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::Store(e) => write!(f, "Store error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    /// Handlers answer expected store errors themselves (flash or 422 form),
    /// so a `Store` error reaching this point is an I/O failure.
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized => HttpResponse::Found()
                .insert_header(("Location", "/"))
                .finish(),
            AppError::Csrf => HttpResponse::Forbidden().body("Invalid or missing CSRF token"),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Store(StoreError::Io(e))
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render a template as a 200 HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    render_with_status(tmpl, StatusCode::OK)
}

/// Render a template with an explicit status, e.g. 422 for a rejected form.
pub fn render_with_status(tmpl: impl Template, status: StatusCode) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;

    #[test]
    fn unauthorized_redirects_to_the_list() {
        let resp = AppError::Unauthorized.error_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    }

    #[test]
    fn csrf_failure_is_forbidden() {
        assert_eq!(AppError::Csrf.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn io_failures_are_internal_errors() {
        let err = AppError::from(std::io::Error::other("disk on fire"));
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
