use actix_web::web;

use crate::handlers::{self, auth_handlers, document_handlers};

/// Register every route. Literal paths (`/new`, `/users/...`) are registered
/// before the `{filename}` patterns they would otherwise collide with.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Static files
        .service(actix_files::Files::new("/static", "./static"))
        .route("/", web::get().to(document_handlers::list))
        .route("/new", web::get().to(document_handlers::new_form))
        .route("/new", web::post().to(document_handlers::create))
        // Session lifecycle
        .route("/users/signin", web::post().to(auth_handlers::signin))
        .route("/users/signout", web::post().to(auth_handlers::signout))
        .route("/{section}/signin", web::get().to(auth_handlers::signin_page))
        // Documents
        .route("/{filename}/edit", web::get().to(document_handlers::edit_form))
        .route("/{filename}/duplicate", web::post().to(document_handlers::duplicate))
        .route("/{filename}/delete", web::post().to(document_handlers::delete))
        .route("/{filename}", web::get().to(document_handlers::show))
        .route("/{filename}", web::post().to(document_handlers::update))
        .default_service(web::to(handlers::not_found));
}
