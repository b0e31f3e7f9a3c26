use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use super::types::*;
use super::version;

/// Flat-directory document repository.
///
/// Every call reads the directory fresh; there is no caching and no locking,
/// so concurrent writers to the same file race and the last write wins.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &DocumentName) -> PathBuf {
        self.root.join(name.to_string())
    }

    /// All documents in the directory, sorted by filename.
    /// Files whose names don't parse as documents are skipped.
    pub fn names(&self) -> Result<Vec<DocumentName>, StoreError> {
        let mut names = vec![];
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(raw) = file_name.to_str() else {
                continue;
            };
            match DocumentName::parse(raw) {
                Ok(name) if name.to_string() == raw => names.push(name),
                _ => log::debug!("Skipping non-document file {raw:?}"),
            }
        }
        names.sort_by_key(|n| n.to_string());
        Ok(names)
    }

    pub fn list(&self) -> Result<Vec<DocumentListItem>, StoreError> {
        Ok(self.names()?.iter().map(DocumentListItem::from).collect())
    }

    pub fn exists(&self, name: &DocumentName) -> bool {
        self.path_of(name).is_file()
    }

    /// Read a document. Unsupported or malformed names, and paths that are not
    /// regular files, read as not found. Bytes that aren't UTF-8 are replaced
    /// so that everything `names()` lists can be opened.
    pub fn read(&self, filename: &str) -> Result<Document, StoreError> {
        let not_found = || StoreError::NotFound(filename.trim().to_string());
        let name = DocumentName::parse(filename).map_err(|_| not_found())?;
        let path = self.path_of(&name);
        if !path.is_file() {
            return Err(not_found());
        }
        match fs::read(&path) {
            Ok(bytes) => {
                let content = match String::from_utf8(bytes) {
                    Ok(content) => content,
                    Err(e) => {
                        log::warn!("{name} is not valid UTF-8; invalid bytes replaced");
                        String::from_utf8_lossy(e.as_bytes()).into_owned()
                    }
                };
                Ok(Document { name, content })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }

    /// Create a new document. Legacy-version names are reserved for snapshots.
    pub fn create(&self, filename: &str, content: &str) -> Result<DocumentName, StoreError> {
        let name = DocumentName::parse(filename)?;
        if name.is_legacy() {
            return Err(StoreError::InvalidName(format!(
                "{name} looks like a legacy version; names ending in (v_N) are reserved."
            )));
        }
        // A directory with the same name blocks the file just as well.
        if self.path_of(&name).exists() {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        fs::write(self.path_of(&name), content)?;
        Ok(name)
    }

    /// Overwrite a document with trimmed `new_content`.
    ///
    /// When the content changed, the previous content is first saved as the
    /// next legacy version; its name is returned.
    pub fn update(&self, filename: &str, new_content: &str) -> Result<Option<DocumentName>, StoreError> {
        let current = self.read(filename)?;
        if current.name.is_legacy() {
            return Err(StoreError::ReadOnly(current.name.to_string()));
        }

        let snapshot = if version::content_changed(&current.content, new_content) {
            let existing = self.names()?;
            let legacy = version::next_legacy_name(&current.name, &existing)?;
            fs::write(self.path_of(&legacy), &current.content)?;
            Some(legacy)
        } else {
            None
        };

        fs::write(self.path_of(&current.name), new_content.trim())?;
        Ok(snapshot)
    }

    /// Copy an existing document to a new name with the same extension.
    ///
    /// A target without an extension gets the source's extension appended.
    pub fn duplicate(&self, source: &str, target: &str) -> Result<DocumentName, StoreError> {
        let original = self.read(source)?;
        let ext = original.name.extension();

        let target = target.trim();
        let target = match DocumentName::parse(target) {
            Err(StoreError::MissingExtension) if !target.ends_with('.') => format!("{target}.{ext}"),
            Err(StoreError::UnsupportedType(found)) => {
                return Err(StoreError::ExtensionMismatch { expected: ext.to_string(), found });
            }
            Err(e) => return Err(e),
            Ok(name) if name.extension() != ext => {
                return Err(StoreError::ExtensionMismatch {
                    expected: ext.to_string(),
                    found: name.extension().to_string(),
                });
            }
            Ok(name) => name.to_string(),
        };

        self.create(&target, &original.content)
    }

    /// Remove a document. Absent, unparseable or non-file names are a no-op.
    pub fn delete(&self, filename: &str) -> Result<bool, StoreError> {
        let Ok(name) = DocumentName::parse(filename) else {
            return Ok(false);
        };
        if !self.exists(&name) {
            return Ok(false);
        }
        match fs::remove_file(self.path_of(&name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
