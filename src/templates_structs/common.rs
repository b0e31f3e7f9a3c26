use askama::Template;

use super::PageContext;

#[derive(Template)]
#[template(path = "signin.html")]
pub struct SigninTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
    pub username: String,
}

#[derive(Template)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate {
    pub app_name: String,
}
