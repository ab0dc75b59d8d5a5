//! Tests for the `load_service` resolution entry point
//!
//! Each test builds its own `ServiceLoader` unless it is exercising the
//! process-wide free functions.

use std::sync::atomic::{AtomicUsize, Ordering};

use svcreg_application::use_cases::{ServiceLoader, load_service, register_scheme};
use svcreg_domain::Error;
use svcreg_domain::ports::{ArtifactService, SessionService};
use svcreg_domain::value_objects::ServiceInstance;

#[test]
fn test_dummy_scheme_scenario() {
    let loader = ServiceLoader::new();
    loader.register_scheme("artifact", "dummy", |d, q| {
        Ok(ServiceInstance::new((
            "ok",
            d.scheme.clone(),
            q.get("x").map(str::to_string),
        )))
    });

    let instance = loader
        .load_service(Some("dummy://host/path?x=5"), "artifact")
        .unwrap()
        .unwrap();
    let (status, scheme, x) = instance
        .downcast_ref::<(&str, String, Option<String>)>()
        .unwrap();
    assert_eq!(*status, "ok");
    assert_eq!(scheme, "dummy");
    assert_eq!(x.as_deref(), Some("5"));
}

#[test]
fn test_constructor_receives_string_query_and_result_is_unchanged() {
    let loader = ServiceLoader::new();
    let produced = ServiceInstance::new(String::from("payload"));
    let returned = produced.clone();
    loader.register_scheme("custom", "scheme", move |d, q| {
        assert_eq!(d.authority, "host");
        assert_eq!(d.path, "/path");
        assert_eq!(q.len(), 1);
        assert_eq!(q.get("x"), Some("5"));
        Ok(returned.clone())
    });

    let instance = loader
        .load_service(Some("scheme://host/path?x=5"), "custom")
        .unwrap()
        .unwrap();
    assert!(instance.ptr_eq(&produced));
}

#[test]
fn test_reregistration_uses_latest_constructor() {
    let loader = ServiceLoader::new();
    loader.register_scheme("memory", "redis", |_, _| Ok(ServiceInstance::new(1_u8)));
    loader.register_scheme("memory", "redis", |_, _| Ok(ServiceInstance::new(2_u8)));

    let instance = loader
        .load_service(Some("redis://cache:6379"), "memory")
        .unwrap()
        .unwrap();
    assert_eq!(instance.downcast_ref::<u8>(), Some(&2));
    assert_eq!(
        loader
            .registry()
            .schemes(&"memory".into())
            .iter()
            .filter(|s| s.as_str() == "redis")
            .count(),
        1
    );
}

#[test]
fn test_unknown_scheme_is_deterministic_and_side_effect_free() {
    let loader = ServiceLoader::new();
    let before = loader.registry().len();

    for _ in 0..2 {
        match loader.load_service(Some("postgres://db/app"), "session") {
            Err(Error::UnknownScheme {
                kind,
                scheme,
                available,
            }) => {
                assert_eq!(kind, "session");
                assert_eq!(scheme, "postgres");
                assert!(available.contains(&"inmemory".to_string()));
            }
            other => panic!("Expected UnknownScheme, got {other:?}"),
        }
    }
    assert_eq!(loader.registry().len(), before);
}

#[test]
fn test_scheme_registered_for_other_kind_is_unknown() {
    let loader = ServiceLoader::new();
    loader.register_scheme("memory", "only-memory", |_, _| Ok(ServiceInstance::new(())));
    assert!(matches!(
        loader.load_service(Some("only-memory://"), "session"),
        Err(Error::UnknownScheme { .. })
    ));
}

#[test]
fn test_malformed_identifier_fails_fast() {
    let loader = ServiceLoader::new();
    assert!(matches!(
        loader.load_service(Some("not a url"), "session"),
        Err(Error::MalformedIdentifier { .. })
    ));
}

#[test]
fn test_constructor_failure_is_instantiation_failure() {
    let loader = ServiceLoader::new();
    loader.register_scheme("session", "flaky", |_, _| {
        Err(Error::io("connection refused"))
    });

    match loader.load_service(Some("flaky://db"), "session") {
        Err(err @ Error::InstantiationFailure { .. }) => {
            assert!(err.to_string().contains("connection refused"));
            assert!(std::error::Error::source(&err).is_some());
        }
        other => panic!("Expected InstantiationFailure, got {other:?}"),
    }
}

#[test]
fn test_no_identifier_returns_builtin_default() {
    let loader = ServiceLoader::new();
    let first = loader.load_service(None, "session").unwrap().unwrap();
    let second = loader.load_service(Some("   "), "Session").unwrap().unwrap();

    assert!(first.ptr_eq(&second));
    let sessions = first.port::<dyn SessionService>().unwrap();
    assert_eq!(sessions.provider_name(), "inmemory_session");
}

#[test]
fn test_no_identifier_does_not_invoke_constructors() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    let loader = ServiceLoader::new();
    loader.register_scheme("artifact", "inmemory", |_, _| {
        CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(ServiceInstance::new(()))
    });

    let instance = loader.load_service(None, "artifact").unwrap().unwrap();
    assert!(instance.port::<dyn ArtifactService>().is_some());
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_identifier_for_unknown_kind_is_none() {
    let loader = ServiceLoader::new();
    assert!(loader.load_service(None, "vector").unwrap().is_none());
}

#[test]
fn test_explicit_inmemory_builds_fresh_instance() {
    let loader = ServiceLoader::new();
    let default = loader.load_service(None, "session").unwrap().unwrap();
    let explicit = loader
        .load_service(Some("inmemory://"), "session")
        .unwrap()
        .unwrap();
    assert!(!default.ptr_eq(&explicit));
    assert_eq!(explicit.label(), "inmemory");
}

#[test]
fn test_global_free_functions() {
    register_scheme("global-test", "echo", |_, q| {
        Ok(ServiceInstance::new(q.get("v").unwrap_or_default().to_string()))
    });

    let instance = load_service(Some("echo://?v=hi"), "global-test")
        .unwrap()
        .unwrap();
    assert_eq!(instance.downcast_ref::<String>().map(String::as_str), Some("hi"));
    assert!(ServiceLoader::global().registry().contains(&"global-test".into(), "echo"));
}

#[test]
fn test_scheme_colon_form_resolves_builtin() {
    let loader = ServiceLoader::new();
    for kind in ["session", "memory", "artifact"] {
        let instance = loader
            .load_service(Some("inmemory:"), kind)
            .unwrap_or_else(|e| panic!("Expected inmemory: to resolve for {kind}, got {e:?}"));
        assert!(instance.is_some());
    }

    let sessions = loader.load_service(Some("inmemory:"), "session").unwrap().unwrap();
    assert!(sessions.port::<dyn SessionService>().is_some());
}

#[test]
fn test_unvalidated_authority_reaches_constructor() {
    let loader = ServiceLoader::new();
    loader.register_scheme("memory", "redis", |d, _| {
        Ok(ServiceInstance::new((d.authority.clone(), d.path.clone())))
    });

    for (identifier, authority) in [
        ("redis://host:abc/0", "host:abc"),
        ("redis://host:99999/0", "host:99999"),
        ("redis://Cache.Internal:6379/0", "Cache.Internal:6379"),
    ] {
        let instance = loader.load_service(Some(identifier), "memory").unwrap().unwrap();
        let (seen, path) = instance.downcast_ref::<(String, String)>().unwrap();
        assert_eq!(seen, authority);
        assert_eq!(path, "/0");
    }
}

#[test]
fn test_panicking_constructor_is_instantiation_failure() {
    let loader = ServiceLoader::new();
    loader.register_scheme("session", "flaky", |_, _| panic!("driver not installed"));

    match loader.load_service(Some("flaky://"), "session") {
        Err(Error::InstantiationFailure { target, message, .. }) => {
            assert_eq!(target, "flaky");
            assert!(message.contains("driver not installed"), "{message}");
        }
        other => panic!("Expected InstantiationFailure, got {other:?}"),
    }

    // The loader stays usable afterwards
    assert!(loader.load_service(Some("inmemory://"), "session").unwrap().is_some());
}
