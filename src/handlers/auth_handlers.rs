use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::flash::{self, Flash};
use crate::auth::session::{is_signed_in, sign_in, sign_out};
use crate::auth::{csrf, Credentials};
use crate::config::AppConfig;
use crate::errors::{AppError, render, render_with_status};
use crate::handlers::redirect_to_index;
use crate::templates_structs::{PageContext, SigninTemplate};

#[derive(Deserialize)]
pub struct SigninForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    #[serde(default)]
    pub csrf_token: String,
}

/// GET /{section}/signin
pub async fn signin_page(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    if is_signed_in(&session) {
        return Ok(redirect_to_index());
    }

    let ctx = PageContext::build(&session, &config);
    render(SigninTemplate { ctx, error: None, username: String::new() })
}

fn signin_failed(
    session: &Session,
    config: &AppConfig,
    username: &str,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, config);
    let tmpl = SigninTemplate {
        ctx,
        error: Some("Invalid Credentials.".to_string()),
        username: username.to_string(),
    };
    render_with_status(tmpl, StatusCode::UNPROCESSABLE_ENTITY)
}

/// POST /users/signin
/// A stale or missing CSRF token is treated like bad credentials: the form
/// comes back with a fresh token instead of a bare 403.
pub async fn signin(
    credentials: web::Data<Credentials>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<SigninForm>,
) -> Result<HttpResponse, AppError> {
    let username = form.username.trim();
    if !csrf::token_matches(&session, &form.csrf_token) {
        log::warn!("Sign-in for '{username}' without a valid CSRF token");
        return signin_failed(&session, &config, username);
    }

    if is_signed_in(&session) {
        return Ok(redirect_to_index());
    }

    if credentials.check(username, &form.password) {
        sign_in(&session, username)?;
        log::info!("{username} signed in");
        flash::push(&session, Flash::success("Welcome!"));
        return Ok(redirect_to_index());
    }

    log::warn!("Failed sign-in attempt for '{username}'");
    signin_failed(&session, &config, username)
}

/// POST /users/signout
pub async fn signout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    if let Some(username) = sign_out(&session) {
        log::info!("{username} signed out");
    }
    flash::push(&session, Flash::success("You are signed out."));
    Ok(redirect_to_index())
}
