use askama::Template;

use super::PageContext;
use crate::models::document::DocumentListItem;

#[derive(Template)]
#[template(path = "documents/list.html")]
pub struct DocumentListTemplate {
    pub ctx: PageContext,
    pub documents: Vec<DocumentListItem>,
}

#[derive(Template)]
#[template(path = "documents/new.html")]
pub struct DocumentNewTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
    pub filename: String,
    pub content: String,
    /// e.g. ".txt, .html or .md"
    pub whitelist: String,
}

#[derive(Template)]
#[template(path = "documents/edit.html")]
pub struct DocumentEditTemplate {
    pub ctx: PageContext,
    pub filename: String,
    pub content: String,
}
