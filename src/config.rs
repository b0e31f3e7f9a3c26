use actix_web::cookie::Key;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "files";
const DEFAULT_USERS_FILE: &str = "users.yml";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_APP_NAME: &str = "Inkwell";
const DEFAULT_ADMIN_USER: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "secret";

/// Process configuration, read once at startup from the environment
/// (after `dotenvy` has loaded any `.env` file).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub users_file: PathBuf,
    pub bind_addr: String,
    pub app_name: String,
    /// Raw `SESSION_KEY`; see [`AppConfig::session_key`].
    pub session_key: Option<String>,
    /// Account written to `users_file` when that file does not exist yet.
    pub seed_user: String,
    pub seed_password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: env_or("DATA_DIR", DEFAULT_DATA_DIR).into(),
            users_file: env_or("USERS_FILE", DEFAULT_USERS_FILE).into(),
            bind_addr: env_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            app_name: env_or("APP_NAME", DEFAULT_APP_NAME),
            session_key: std::env::var("SESSION_KEY").ok(),
            seed_user: env_or("ADMIN_USER", DEFAULT_ADMIN_USER),
            seed_password: env_or("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
        }
    }

    /// Configuration rooted at `dir`, with defaults for everything else.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            data_dir: dir.join(DEFAULT_DATA_DIR),
            users_file: dir.join(DEFAULT_USERS_FILE),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            session_key: None,
            seed_user: DEFAULT_ADMIN_USER.to_string(),
            seed_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }

    /// Cookie signing/encryption key. `SESSION_KEY` must be at least 64 bytes
    /// for sessions to survive a restart; otherwise a random key is generated.
    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => default.to_string(),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Yaml(PathBuf, serde_yaml::Error),
    Hash(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "{}: {e}", path.display()),
            ConfigError::Yaml(path, e) => write!(f, "{}: invalid YAML: {e}", path.display()),
            ConfigError::Hash(e) => write!(f, "Hash error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_dir_places_files_under_root() {
        let config = AppConfig::in_dir("/tmp/site");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/site/files"));
        assert_eq!(config.users_file, PathBuf::from("/tmp/site/users.yml"));
        assert_eq!(config.app_name, "Inkwell");
    }

    #[test]
    fn long_session_key_is_used() {
        let mut config = AppConfig::in_dir("/tmp/site");
        config.session_key = Some("k".repeat(64));
        let a = config.session_key();
        let b = config.session_key();
        assert_eq!(a.master(), b.master());
    }

    #[test]
    fn short_session_key_falls_back_to_random() {
        let mut config = AppConfig::in_dir("/tmp/site");
        config.session_key = Some("short".to_string());
        let a = config.session_key();
        let b = config.session_key();
        assert_ne!(a.master(), b.master());
    }
}
