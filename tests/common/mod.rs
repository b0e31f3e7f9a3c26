//! Shared test infrastructure.
//!
//! - `setup_store()` - a document store in a fresh temporary directory
//! - `init_app()` - the full route table behind a cookie session, for
//!   driving with a [`Browser`]

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::OnceLock;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use regex::Regex;
use tempfile::TempDir;

use inkwell::auth::{Credentials, password};
use inkwell::config::AppConfig;
use inkwell::models::document::DocumentStore;
use inkwell::routes;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "admin123";

// ============================================================================
// STORE SETUP
// ============================================================================

/// Returns a tuple of (TempDir, DocumentStore) where TempDir must be kept
/// alive for the store's directory to remain valid.
pub fn setup_store() -> (TempDir, DocumentStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = DocumentStore::open(dir.path().join("files")).expect("Failed to open store");
    (dir, store)
}

/// Write a file straight into the store directory, bypassing validation.
pub fn create_document(store: &DocumentStore, name: &str, content: &str) {
    std::fs::write(store.root().join(name), content).expect("Failed to write document");
}

pub fn file_names(store: &DocumentStore) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(store.root())
        .expect("Failed to read store dir")
        .map(|e| e.expect("bad dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Credentials with a single admin account. The argon2 hash is computed once
/// per test binary.
pub fn admin_credentials() -> Credentials {
    static HASH: OnceLock<String> = OnceLock::new();
    let hash = HASH.get_or_init(|| password::hash_password(ADMIN_PASS).expect("Failed to hash"));
    let mut users = BTreeMap::new();
    users.insert(ADMIN_USER.to_string(), hash.clone());
    Credentials::new(users)
}

// ============================================================================
// APP SETUP
// ============================================================================

pub async fn init_app(
    dir: &TempDir,
    store: DocumentStore,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let config = AppConfig::in_dir(dir.path());
    let session_mw = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_secure(false)
        .build();

    test::init_service(
        App::new()
            .wrap(session_mw)
            .app_data(web::Data::new(store))
            .app_data(web::Data::new(admin_credentials()))
            .app_data(web::Data::new(config))
            .configure(routes::configure),
    )
    .await
}

/// A response with its body already read.
#[derive(Debug)]
pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Carries the session cookie and CSRF token across requests.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
    pub csrf_token: String,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get<S, B>(&mut self, app: &S, uri: &str) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        self.send(app, test::TestRequest::get().uri(uri)).await
    }

    /// POST a form. The current CSRF token is added unless the form has one.
    pub async fn post<S, B>(&mut self, app: &S, uri: &str, form: &[(&str, &str)]) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let mut fields: Vec<(&str, &str)> = form.to_vec();
        if !fields.iter().any(|(k, _)| *k == "csrf_token") {
            fields.push(("csrf_token", self.csrf_token.as_str()));
        }
        let req = test::TestRequest::post().uri(uri).set_form(&fields);
        self.send(app, req).await
    }

    async fn send<S, B>(&mut self, app: &S, req: test::TestRequest) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let req = match &self.cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        };
        let resp = test::call_service(app, req.to_request()).await;

        if let Some(cookie) = resp.response().cookies().find(|c| c.name() == "id") {
            self.cookie = Some(cookie.into_owned());
        }
        let status = resp.status();
        let header_str = |name: header::HeaderName| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        let location = header_str(header::LOCATION);
        let content_type = header_str(header::CONTENT_TYPE);
        let body = test::read_body(resp).await;

        let page = Page {
            status,
            location,
            content_type,
            body: String::from_utf8_lossy(&body).into_owned(),
        };
        if let Some(token) = extract_csrf(&page.body) {
            self.csrf_token = token;
        }
        page
    }

    /// Sign in as the admin account through the real form.
    pub async fn sign_in<S, B>(&mut self, app: &S) -> Page
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let form = self.get(app, "/users/signin").await;
        assert_eq!(form.status, StatusCode::OK);
        let page = self
            .post(app, "/users/signin", &[("username", ADMIN_USER), ("password", ADMIN_PASS)])
            .await;
        assert_eq!(page.status, StatusCode::FOUND, "sign-in failed: {}", page.body);
        page
    }
}

pub fn extract_csrf(body: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).expect("bad regex")
    });
    re.captures(body).map(|c| c[1].to_string())
}
