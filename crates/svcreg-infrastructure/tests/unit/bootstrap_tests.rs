//! Bootstrap Tests

use std::sync::Arc;
use std::time::Duration;

use svcreg_application::use_cases::{DefaultProvider, ModuleLoader, SchemeRegistry, ServiceLoader};
use svcreg_domain::entities::{Artifact, ArtifactScope};
use svcreg_domain::error::Error;
use svcreg_domain::value_objects::ServiceInstance;
use svcreg_infrastructure::config::AppConfig;
use svcreg_infrastructure::di::{bootstrap, bootstrap_with};
use tempfile::TempDir;

#[tokio::test]
async fn test_default_config_resolves_inmemory_services() {
    let services = bootstrap(&AppConfig::default()).await.unwrap();

    assert!(services.session().is_some());
    assert!(services.memory().is_some());
    assert!(services.artifact().is_some());

    let summary = services.summary();
    assert_eq!(summary.len(), 3);
    assert!(summary.iter().all(|row| row.identifier.is_none()));
    assert!(summary.iter().all(|row| row.provider == "inmemory"));
}

#[tokio::test]
async fn test_bundled_schemes_are_linked_by_the_library() {
    // This test binary does not reference svcreg-providers itself
    let services = bootstrap(&AppConfig::default()).await.unwrap();
    let kinds: Vec<&str> = services.kinds().iter().map(|k| k.as_str()).collect();
    assert_eq!(kinds, ["artifact", "memory", "session"]);
    assert!(services.loader().registry().contains(&"session".into(), "db+sqlite"));
    assert!(services.loader().modules().contains("svcreg.providers"));
}

#[tokio::test]
async fn test_well_known_kind_without_any_service_fails() {
    let loader = Arc::new(ServiceLoader::with_parts(
        SchemeRegistry::empty(),
        Arc::new(ModuleLoader::with_modules(std::iter::empty())),
        DefaultProvider::empty(),
    ));

    match bootstrap_with(loader, &AppConfig::default()).await {
        Err(Error::Configuration { message, .. }) => {
            assert!(message.contains("no session service"), "{message}");
        }
        other => panic!("Expected Configuration, got {other:?}"),
    }
}

#[tokio::test]
async fn test_configured_sqlite_session_store() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.services.session = Some(format!("db+sqlite:///{}/sessions.db", dir.path().display()));

    let services = bootstrap(&config).await.unwrap();
    let sessions = services.session().unwrap();
    assert_eq!(sessions.provider_name(), "sqlite_session");
    sessions
        .create_session("app", "u1", None, Some("s1"))
        .await
        .unwrap();
    assert!(dir.path().join("sessions.db").is_file());
}

#[tokio::test]
async fn test_configured_file_artifact_store() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.services.artifact = Some(format!("file://{}", dir.path().display()));

    let services = bootstrap(&config).await.unwrap();
    let artifacts = services.artifact().unwrap();
    assert_eq!(artifacts.provider_name(), "file_artifact");

    let scope = ArtifactScope::new("app", "u1", "s1");
    let version = artifacts
        .save_artifact(&scope, "report.txt", Artifact::text("hello"))
        .await
        .unwrap();
    assert_eq!(version, 0);
    let loaded = artifacts
        .load_artifact(&scope, "report.txt", None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.data, b"hello");
}

#[tokio::test]
async fn test_dynamic_import_identifier() {
    let mut config = AppConfig::default();
    config.services.session = Some("python:svcreg.providers:InMemorySessionService".to_string());

    let services = bootstrap(&config).await.unwrap();
    let resolved = services.get("session").unwrap();
    assert_eq!(
        resolved.identifier.as_deref(),
        Some("python:svcreg.providers:InMemorySessionService")
    );
    assert_eq!(resolved.instance.label(), "svcreg.providers:InMemorySessionService");
    assert!(services.session().is_some());
}

#[tokio::test]
async fn test_unknown_scheme_fails_fast() {
    let mut config = AppConfig::default();
    config.services.memory = Some("redis://localhost:6379".to_string());

    match bootstrap(&config).await {
        Err(Error::UnknownScheme {
            kind,
            scheme,
            available,
        }) => {
            assert_eq!(kind, "memory");
            assert_eq!(scheme, "redis");
            assert_eq!(available, vec!["inmemory"]);
        }
        other => panic!("Expected UnknownScheme, got {other:?}"),
    }
}

#[tokio::test]
async fn test_well_known_kind_must_implement_its_port() {
    let loader = Arc::new(ServiceLoader::new());
    loader.register_scheme("session", "bogus", |_, _| Ok(ServiceInstance::new(42_u8)));

    let mut config = AppConfig::default();
    config.services.session = Some("bogus://".to_string());

    match bootstrap_with(loader, &config).await {
        Err(Error::InstantiationFailure { target, message, .. }) => {
            assert_eq!(target, "bogus://");
            assert!(message.contains("SessionService"));
        }
        other => panic!("Expected InstantiationFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_extra_kinds_are_resolved() {
    let loader = Arc::new(ServiceLoader::new());
    loader.register_scheme("cache", "local", |d, _| {
        Ok(ServiceInstance::new(d.authority.clone()))
    });

    let mut config = AppConfig::default();
    config
        .services
        .extra
        .insert("Cache".to_string(), "local://warm".to_string());

    let services = bootstrap_with(loader, &config).await.unwrap();
    let cache = services.get("cache").unwrap();
    assert_eq!(
        cache.instance.downcast_ref::<String>().map(String::as_str),
        Some("warm")
    );
    assert_eq!(services.kinds().len(), 4);
}

#[tokio::test]
async fn test_plugins_are_activated_before_resolution() {
    let mut config = AppConfig::default();
    config.plugins.push("python:svcreg.providers".to_string());

    let services = bootstrap(&config).await.unwrap();
    assert_eq!(services.loader().active_plugins(), vec!["svcreg.providers"]);
}

#[tokio::test]
async fn test_missing_plugin_module_fails_fast() {
    let mut config = AppConfig::default();
    config.plugins.push("python:acme.not_installed".to_string());

    assert!(matches!(
        bootstrap(&config).await,
        Err(Error::ImportFailure { .. })
    ));
}

#[tokio::test]
async fn test_slow_constructor_times_out() {
    let loader = Arc::new(ServiceLoader::new());
    loader.register_scheme("memory", "slow", |_, _| {
        std::thread::sleep(Duration::from_secs(2));
        Ok(ServiceInstance::new(()))
    });

    let mut config = AppConfig::default();
    config.services.memory = Some("slow://".to_string());
    config.services.resolve_timeout_secs = 1;

    match bootstrap_with(loader, &config).await {
        Err(Error::InstantiationFailure { message, .. }) => {
            assert!(message.contains("timed out"));
        }
        other => panic!("Expected InstantiationFailure, got {other:?}"),
    }
}
