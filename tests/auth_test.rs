//! Authentication tests — password hashing and the credentials file.
//!
//! - Password hashing with argon2
//! - Loading the YAML credentials table
//! - Seeding a missing credentials file
//! - Credential checks never erroring on bad input

mod common;

use std::collections::BTreeMap;

use inkwell::auth::{Credentials, password};
use inkwell::config::ConfigError;
use tempfile::TempDir;

const TEST_PASSWORD: &str = "password123";

#[test]
fn test_hash_password_randomness() {
    let hash1 = password::hash_password(TEST_PASSWORD).expect("Failed to hash first password");
    let hash2 = password::hash_password(TEST_PASSWORD).expect("Failed to hash second password");

    // Same password should produce different hashes (different salts)
    assert_ne!(hash1, hash2);
    assert!(hash1.starts_with("$argon2"));

    assert!(password::verify_password(TEST_PASSWORD, &hash1).expect("Verification 1 failed"));
    assert!(password::verify_password(TEST_PASSWORD, &hash2).expect("Verification 2 failed"));
    assert!(!password::verify_password("wrongpassword", &hash1).expect("Verification 3 failed"));
}

#[test]
fn test_verify_password_rejects_malformed_hash() {
    assert!(password::verify_password(TEST_PASSWORD, "plaintext").is_err());
}

#[test]
fn test_load_credentials_from_yaml() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("users.yml");
    let hash = password::hash_password(TEST_PASSWORD).expect("Failed to hash");
    std::fs::write(&path, format!("admin: '{hash}'\nbroken: 'not-a-hash'\n"))
        .expect("Failed to write users file");

    let creds = Credentials::load(&path).expect("Failed to load credentials");

    assert_eq!(creds.len(), 2);
    assert!(creds.contains("admin"));
    assert!(creds.check("admin", TEST_PASSWORD));
    assert!(!creds.check("admin", "nope"));
    assert!(!creds.check("broken", "not-a-hash"));
    assert!(!creds.check("stranger", TEST_PASSWORD));
}

#[test]
fn test_load_rejects_invalid_yaml() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("users.yml");
    std::fs::write(&path, "- just\n- a list\n").expect("Failed to write users file");

    assert!(matches!(Credentials::load(&path), Err(ConfigError::Yaml(..))));
}

#[test]
fn test_load_or_seed_writes_missing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("users.yml");

    let seeded = Credentials::load_or_seed(&path, "editor", TEST_PASSWORD).expect("Failed to seed");
    assert!(path.exists());
    assert!(seeded.check("editor", TEST_PASSWORD));

    // A second start reads the file written by the first.
    let loaded = Credentials::load_or_seed(&path, "someone_else", "ignored").expect("Failed to load");
    assert_eq!(loaded.len(), 1);
    assert!(loaded.check("editor", TEST_PASSWORD));
    assert!(!loaded.contains("someone_else"));
}

#[test]
fn test_empty_table_rejects_everyone() {
    let creds = Credentials::new(BTreeMap::new());
    assert!(creds.is_empty());
    assert!(!creds.check("", ""));
    assert!(!creds.check(common::ADMIN_USER, common::ADMIN_PASS));
}
