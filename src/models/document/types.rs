use std::fmt;
use std::io;

use serde::Deserialize;

use crate::models::filetype::FileType;

use super::version;

/// A validated document filename: `<stem>.<ext>` with a whitelisted extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentName {
    stem: String,
    file_type: FileType,
}

impl DocumentName {
    /// Parse and validate a raw filename as submitted by a form or URL.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidName("A name is required.".to_string()));
        }
        if name.starts_with('.') {
            return Err(StoreError::InvalidName("Names may not start with a dot.".to_string()));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '(' | ')'))
        {
            return Err(StoreError::InvalidName(
                "Names may only contain letters, numbers, dots, dashes, underscores and parentheses."
                    .to_string(),
            ));
        }

        let (stem, ext) = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, ext),
            _ => return Err(StoreError::MissingExtension),
        };
        let file_type = FileType::from_extension(ext)
            .ok_or_else(|| StoreError::UnsupportedType(ext.to_string()))?;

        Ok(Self { stem: stem.to_string(), file_type })
    }

    pub(super) fn from_parts(stem: String, file_type: FileType) -> Self {
        Self { stem, file_type }
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn extension(&self) -> &'static str {
        self.file_type.extension()
    }

    /// Version tag if this name follows the legacy `<base>(v_N).<ext>` pattern.
    pub fn legacy_version(&self) -> Option<u32> {
        version::split_tag(&self.stem).map(|(_, n)| n)
    }

    pub fn is_legacy(&self) -> bool {
        self.legacy_version().is_some()
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.stem, self.file_type.extension())
    }
}

/// A document read from the store.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: DocumentName,
    pub content: String,
}

impl Document {
    pub fn content_type(&self) -> &'static str {
        self.name.file_type().content_type()
    }

    pub fn render(&self) -> String {
        self.name.file_type().render(&self.content)
    }
}

/// Document as shown in the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentListItem {
    pub name: String,
    pub legacy: bool,
    /// Name offered as the default when duplicating, e.g. `about_copy.txt`.
    pub copy_name: String,
}

impl From<&DocumentName> for DocumentListItem {
    fn from(name: &DocumentName) -> Self {
        Self {
            name: name.to_string(),
            legacy: name.is_legacy(),
            copy_name: format!("{}_copy.{}", name.stem(), name.extension()),
        }
    }
}

/// Form input for the new-document page.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDocumentForm {
    #[serde(default)]
    pub new_filename: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Form input for the edit page.
#[derive(Debug, Clone, Deserialize)]
pub struct EditDocumentForm {
    #[serde(default)]
    pub new_content: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Form input for duplicating a document from the list page.
#[derive(Debug, Clone, Deserialize)]
pub struct DuplicateForm {
    #[serde(default)]
    pub new_filename: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug)]
pub enum StoreError {
    InvalidName(String),
    MissingExtension,
    UnsupportedType(String),
    AlreadyExists(String),
    NotFound(String),
    ReadOnly(String),
    /// The document already has a snapshot with the highest possible tag.
    VersionsExhausted(String),
    ExtensionMismatch { expected: String, found: String },
    Io(io::Error),
}

impl StoreError {
    /// Errors caused by user input, shown back on the submitted form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidName(_)
                | StoreError::MissingExtension
                | StoreError::UnsupportedType(_)
                | StoreError::AlreadyExists(_)
                | StoreError::ExtensionMismatch { .. }
        )
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidName(msg) => write!(f, "{msg}"),
            StoreError::MissingExtension => {
                write!(f, "A file extension is required ({}).", FileType::whitelist())
            }
            StoreError::UnsupportedType(ext) => write!(
                f,
                "Unsupported file type .{ext}; use {}.",
                FileType::whitelist()
            ),
            StoreError::AlreadyExists(name) => write!(f, "{name} already exists."),
            StoreError::NotFound(name) => write!(f, "{name} doesn't exist."),
            StoreError::ReadOnly(name) => {
                write!(f, "{name} is a legacy version and can't be edited.")
            }
            StoreError::VersionsExhausted(name) => {
                write!(f, "{name} has no legacy version numbers left; duplicate it instead.")
            }
            StoreError::ExtensionMismatch { expected, found } => write!(
                f,
                "A copy must keep the .{expected} extension (got .{found})."
            ),
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}
