//! Unit tests for domain error types

use svcreg_domain::Error;

#[test]
fn test_malformed_identifier_error() {
    let error = Error::malformed_identifier("::", "relative URL without a base");
    match &error {
        Error::MalformedIdentifier { identifier, reason } => {
            assert_eq!(identifier, "::");
            assert_eq!(reason, "relative URL without a base");
        }
        _ => panic!("Expected MalformedIdentifier error"),
    }
    assert!(error.is_resolution_error());
}

#[test]
fn test_unknown_scheme_lists_available_schemes() {
    let error = Error::unknown_scheme(
        "memory",
        "redis",
        vec!["inmemory".to_string(), "sqlite".to_string()],
    );
    let message = error.to_string();
    assert!(message.contains("memory"));
    assert!(message.contains("'redis'"));
    assert!(message.contains("[inmemory, sqlite]"));
}

#[test]
fn test_unknown_scheme_with_no_available_schemes() {
    let error = Error::unknown_scheme("custom", "x", Vec::new());
    assert!(error.to_string().ends_with("Available schemes: []"));
}

#[test]
fn test_import_failure_error() {
    let error = Error::import_failure("nonexistent.module", "no such module");
    match error {
        Error::ImportFailure { module, reason } => {
            assert_eq!(module, "nonexistent.module");
            assert_eq!(reason, "no such module");
        }
        _ => panic!("Expected ImportFailure error"),
    }
}

#[test]
fn test_attribute_resolution_error() {
    let error = Error::attribute_resolution("pkg.mod", "Missing");
    assert_eq!(error.to_string(), "Module 'pkg.mod' has no attribute 'Missing'");
}

#[test]
fn test_instantiation_with_source_keeps_cause() {
    let cause = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error = Error::instantiation_with_source("python:pkg:Ctor", cause);
    match &error {
        Error::InstantiationFailure {
            target,
            message,
            source,
        } => {
            assert_eq!(target, "python:pkg:Ctor");
            assert_eq!(message, "denied");
            assert!(source.is_some());
        }
        _ => panic!("Expected InstantiationFailure error"),
    }
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_non_resolution_errors() {
    assert!(!Error::not_found("session s1").is_resolution_error());
    assert!(!Error::invalid_argument("bad").is_resolution_error());
    assert!(!Error::configuration("bad config").is_resolution_error());
    assert!(!Error::internal("boom").is_resolution_error());
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: Error = io.into();
    match error {
        Error::IoSimple { source } => assert_eq!(source.kind(), std::io::ErrorKind::NotFound),
        _ => panic!("Expected IoSimple error"),
    }
}

#[test]
fn test_configuration_error_with_source() {
    let error = Error::configuration_with_source(
        "bad file",
        std::io::Error::other("unreadable"),
    );
    match error {
        Error::Configuration { message, source } => {
            assert_eq!(message, "bad file");
            assert!(source.is_some());
        }
        _ => panic!("Expected Configuration error"),
    }
}
