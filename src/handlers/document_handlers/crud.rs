use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::flash::{self, Flash};
use crate::auth::session::require_signed_in;
use crate::config::AppConfig;
use crate::errors::{AppError, render, render_with_status};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::handlers::redirect_to_index;
use crate::models::document::{
    DocumentName, DocumentStore, DuplicateForm, EditDocumentForm, NewDocumentForm, StoreError,
};
use crate::models::filetype::FileType;
use crate::templates_structs::{PageContext, DocumentEditTemplate, DocumentNewTemplate};

/// Queue the error as a flash message and send the user back to the list.
fn flash_and_redirect(session: &Session, e: &StoreError) -> HttpResponse {
    flash::push(session, Flash::error(e.to_string()));
    redirect_to_index()
}

/// GET /new
/// Renders the document creation form.
pub async fn new_form(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_signed_in(&session)?;

    let ctx = PageContext::build(&session, &config);
    render(DocumentNewTemplate {
        ctx,
        error: None,
        filename: String::new(),
        content: String::new(),
        whitelist: FileType::whitelist(),
    })
}

/// POST /new
/// Creates a document; validation failures re-render the form with 422.
pub async fn create(
    store: web::Data<DocumentStore>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<NewDocumentForm>,
) -> Result<HttpResponse, AppError> {
    let username = require_signed_in(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    match store.create(&form.new_filename, &form.content) {
        Ok(name) => {
            log::info!("{username} created {name}");
            flash::push(&session, Flash::success(format!("{name} was created.")));
            Ok(redirect_to_index())
        }
        Err(e) if e.is_validation() => {
            let ctx = PageContext::build(&session, &config);
            let tmpl = DocumentNewTemplate {
                ctx,
                error: Some(e.to_string()),
                filename: form.new_filename.trim().to_string(),
                content: form.content.clone(),
                whitelist: FileType::whitelist(),
            };
            render_with_status(tmpl, StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /{filename}/edit
/// Renders the edit form with the document's current content.
pub async fn edit_form(
    store: web::Data<DocumentStore>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_signed_in(&session)?;

    let filename = path.into_inner();
    let doc = match store.read(&filename) {
        Ok(doc) if doc.name.is_legacy() => {
            return Ok(flash_and_redirect(&session, &StoreError::ReadOnly(doc.name.to_string())));
        }
        Ok(doc) => doc,
        Err(e @ StoreError::NotFound(_)) => return Ok(flash_and_redirect(&session, &e)),
        Err(e) => return Err(e.into()),
    };

    let ctx = PageContext::build(&session, &config);
    render(DocumentEditTemplate {
        ctx,
        filename: doc.name.to_string(),
        content: doc.content,
    })
}

/// POST /{filename}
/// Saves new content. A changed document first gets its previous content
/// snapshotted as a legacy version.
pub async fn update(
    store: web::Data<DocumentStore>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<EditDocumentForm>,
) -> Result<HttpResponse, AppError> {
    let username = require_signed_in(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let filename = path.into_inner();
    let Ok(name) = DocumentName::parse(&filename) else {
        return Ok(flash_and_redirect(&session, &StoreError::NotFound(filename.trim().to_string())));
    };
    match store.update(&name.to_string(), &form.new_content) {
        Ok(snapshot) => {
            log::info!("{username} edited {name}");
            flash::push(&session, Flash::success(format!("{name} was edited")));
            if let Some(legacy) = snapshot {
                log::info!("Saved previous content of {name} as {legacy}");
                flash::push(
                    &session,
                    Flash::success(format!("Previous version saved as {legacy}.")),
                );
            }
            Ok(redirect_to_index())
        }
        Err(
            e @ (StoreError::NotFound(_)
            | StoreError::ReadOnly(_)
            | StoreError::VersionsExhausted(_)),
        ) => Ok(flash_and_redirect(&session, &e)),
        Err(e) => Err(e.into()),
    }
}

/// POST /{filename}/duplicate
/// Copies a document under a new name that keeps its extension.
pub async fn duplicate(
    store: web::Data<DocumentStore>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<DuplicateForm>,
) -> Result<HttpResponse, AppError> {
    let username = require_signed_in(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let source = path.into_inner();
    match store.duplicate(&source, &form.new_filename) {
        Ok(name) => {
            log::info!("{username} duplicated {source} as {name}");
            flash::push(
                &session,
                Flash::success(format!("{name} was created from {source}.")),
            );
            Ok(redirect_to_index())
        }
        Err(StoreError::Io(e)) => Err(e.into()),
        Err(e) => Ok(flash_and_redirect(&session, &e)),
    }
}

/// POST /{filename}/delete
/// Deletes a document; deleting an absent document is not an error.
pub async fn delete(
    store: web::Data<DocumentStore>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let username = require_signed_in(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let filename = path.into_inner();
    if store.delete(&filename)? {
        log::info!("{username} deleted {filename}");
    }

    flash::push(&session, Flash::success(format!("{filename} was deleted")));
    Ok(redirect_to_index())
}
