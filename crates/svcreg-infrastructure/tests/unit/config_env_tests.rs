//! Tests for `SVCREG__` environment overrides
//!
//! These tests modify environment variables and must run sequentially:
//!
//! ```bash
//! cargo test -p svcreg-infrastructure --test unit config_env -- --test-threads=1 --ignored
//! ```
//!
//! # Safety
//!
//! Rust 2024 requires `unsafe` for `env::set_var`/`env::remove_var`.
//! Tests MUST run with `--test-threads=1` to prevent data races.

use std::env;

use svcreg_infrastructure::config::ConfigLoader;

/// Helper to set env var safely
fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

/// Helper to remove env var safely
fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_nested_env_override() {
    set_env("SVCREG__SERVICES__SESSION", "inmemory://");
    set_env("SVCREG__SERVICES__RESOLVE_TIMEOUT_SECS", "7");

    let config = ConfigLoader::new().load().expect("Should load config");

    assert_eq!(config.services.session.as_deref(), Some("inmemory://"));
    assert_eq!(config.services.resolve_timeout_secs, 7);

    remove_env("SVCREG__SERVICES__SESSION");
    remove_env("SVCREG__SERVICES__RESOLVE_TIMEOUT_SECS");
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_single_underscore_prefix_not_loaded() {
    set_env("SVCREG_SERVICES_SESSION", "inmemory://");

    let config = ConfigLoader::new().load().expect("Should load config");
    assert!(config.services.session.is_none());

    remove_env("SVCREG_SERVICES_SESSION");
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_invalid_env_identifier_fails_fast() {
    set_env("SVCREG__SERVICES__MEMORY", "::bad::");

    assert!(ConfigLoader::new().load().is_err());

    remove_env("SVCREG__SERVICES__MEMORY");
}
