use pulldown_cmark::{Options, Parser, html};

/// Supported document types, keyed by file extension.
///
/// Each variant knows the `Content-Type` it is served with and how its raw
/// content is turned into a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Text,
    Html,
    Markdown,
}

impl FileType {
    pub const ALL: [FileType; 3] = [FileType::Text, FileType::Html, FileType::Markdown];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "txt" => Some(FileType::Text),
            "html" => Some(FileType::Html),
            "md" => Some(FileType::Markdown),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileType::Text => "txt",
            FileType::Html => "html",
            FileType::Markdown => "md",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            FileType::Text => "text/plain",
            FileType::Html | FileType::Markdown => "text/html",
        }
    }

    pub fn render(self, content: &str) -> String {
        match self {
            FileType::Text | FileType::Html => content.to_string(),
            FileType::Markdown => render_markdown(content),
        }
    }

    /// Human-readable list for validation messages, e.g. ".txt, .html or .md".
    pub fn whitelist() -> String {
        let exts: Vec<String> = Self::ALL.iter().map(|t| format!(".{}", t.extension())).collect();
        match exts.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }
}

fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
