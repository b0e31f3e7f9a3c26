use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use inkwell::auth::Credentials;
use inkwell::config::AppConfig;
use inkwell::models::document::DocumentStore;
use inkwell::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();

    let store = DocumentStore::open(&config.data_dir)?;
    log::info!("Serving documents from {}", store.root().display());

    let credentials = Credentials::load_or_seed(
        &config.users_file,
        &config.seed_user,
        &config.seed_password,
    )
    .map_err(std::io::Error::other)?;
    log::info!("Loaded {} account(s) from {}", credentials.len(), config.users_file.display());

    let secret_key = config.session_key();
    let bind_addr = config.bind_addr.clone();

    let store = web::Data::new(store);
    let credentials = web::Data::new(credentials);
    let config = web::Data::new(config);

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(credentials.clone())
            .app_data(config.clone())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
