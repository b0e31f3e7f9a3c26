use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::auth::password;
use crate::config::ConfigError;

/// Read-only username → password-hash table, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    users: BTreeMap<String, String>,
}

impl Credentials {
    pub fn new(users: BTreeMap<String, String>) -> Self {
        Self { users }
    }

    /// Parse a YAML mapping of `username: <argon2 PHC string>`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let users: BTreeMap<String, String> =
            serde_yaml::from_str(&raw).map_err(|e| ConfigError::Yaml(path.to_path_buf(), e))?;
        Ok(Self { users })
    }

    /// Load the credentials file, first writing one with a single seeded
    /// account if it does not exist.
    pub fn load_or_seed(path: &Path, username: &str, password: &str) -> Result<Self, ConfigError> {
        match fs::metadata(path) {
            Ok(_) => Self::load(path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!(
                    "No credentials file at {}, seeding account '{username}'",
                    path.display()
                );
                let hash = password::hash_password(password)
                    .map_err(|e| ConfigError::Hash(e.to_string()))?;
                let mut users = BTreeMap::new();
                users.insert(username.to_string(), hash);
                let yaml = serde_yaml::to_string(&users)
                    .map_err(|e| ConfigError::Yaml(path.to_path_buf(), e))?;
                fs::write(path, yaml).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
                Ok(Self { users })
            }
            Err(e) => Err(ConfigError::Io(path.to_path_buf(), e)),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// True only for a known user whose stored hash verifies `password`.
    /// Unknown users and malformed hashes are plain failures.
    pub fn check(&self, username: &str, password: &str) -> bool {
        let Some(hash) = self.users.get(username) else {
            return false;
        };
        match password::verify_password(password, hash) {
            Ok(ok) => ok,
            Err(e) => {
                log::warn!("Stored hash for '{username}' is unusable: {e}");
                false
            }
        }
    }
}
