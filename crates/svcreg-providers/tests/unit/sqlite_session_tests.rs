//! Tests for the SQLite session service

use serde_json::json;
use std::collections::HashMap;
use svcreg_application::use_cases::ServiceLoader;
use svcreg_domain::Error;
use svcreg_domain::entities::Event;
use svcreg_providers::{SessionService, SqliteSessionService};
use tempfile::TempDir;

#[tokio::test]
async fn test_sessions_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("sessions.db");

    let state = HashMap::from([("lang".to_string(), json!("en"))]);
    {
        let service = SqliteSessionService::open(&db).unwrap();
        let session = service
            .create_session("app", "u1", Some(state), Some("s1"))
            .await
            .unwrap();
        service
            .append_event(&session, Event::new("user", "hi").with_state_delta("mood", json!("good")))
            .await
            .unwrap();
        service
            .append_event(&session, Event::new("agent", "hello"))
            .await
            .unwrap();
    }

    let reopened = SqliteSessionService::open(&db).unwrap();
    let stored = reopened.get_session("app", "u1", "s1").await.unwrap().unwrap();
    assert_eq!(stored.state.get("lang"), Some(&json!("en")));
    assert_eq!(stored.state.get("mood"), Some(&json!("good")));
    let authors: Vec<&str> = stored.events.iter().map(|e| e.author.as_str()).collect();
    assert_eq!(authors, ["user", "agent"]);
    assert_eq!(stored.last_update_time, stored.events[1].timestamp);
}

#[tokio::test]
async fn test_duplicate_id_and_missing_session() {
    let service = SqliteSessionService::open_in_memory().unwrap();
    let session = service
        .create_session("app", "u1", None, Some("s1"))
        .await
        .unwrap();

    match service.create_session("app", "u1", None, Some("s1")).await {
        Err(Error::InvalidArgument { .. }) => {}
        other => panic!("Expected InvalidArgument, got {other:?}"),
    }

    service.delete_session("app", "u1", "s1").await.unwrap();
    service.delete_session("app", "u1", "s1").await.unwrap();
    match service.append_event(&session, Event::new("user", "late")).await {
        Err(Error::NotFound { .. }) => {}
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_sessions_scoped_to_user_without_events() {
    let service = SqliteSessionService::open_in_memory().unwrap();
    let b = service
        .create_session("app", "u1", None, Some("b"))
        .await
        .unwrap();
    service.create_session("app", "u1", None, Some("a")).await.unwrap();
    service.create_session("app", "u2", None, Some("c")).await.unwrap();
    service.append_event(&b, Event::new("user", "x")).await.unwrap();

    let listed = service.list_sessions("app", "u1").await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert!(listed.iter().all(|s| s.events.is_empty()));
}

#[tokio::test]
async fn test_resolved_by_scheme_and_module() {
    let dir = TempDir::new().unwrap();
    let loader = ServiceLoader::new();

    let identifier = format!("db+sqlite:///{}/nested/s.db", dir.path().display());
    let instance = loader.load_service(Some(&identifier), "session").unwrap().unwrap();
    let sessions = instance.port::<dyn SessionService>().unwrap();
    assert_eq!(sessions.provider_name(), "sqlite_session");
    sessions.create_session("app", "u1", None, Some("s1")).await.unwrap();
    assert!(dir.path().join("nested/s.db").is_file());

    let in_memory = loader.load_service(Some("db+sqlite://"), "session").unwrap().unwrap();
    assert!(in_memory.port::<dyn SessionService>().is_some());

    let by_module = loader
        .load_service(Some("python:svcreg.providers:SqliteSessionService"), "session")
        .unwrap()
        .unwrap();
    assert_eq!(
        by_module.port::<dyn SessionService>().unwrap().provider_name(),
        "sqlite_session"
    );
}

#[test]
fn test_rejects_host_and_unknown_params() {
    let loader = ServiceLoader::new();
    for identifier in ["db+sqlite://dbhost/s.db", "db+sqlite://?pool=4"] {
        match loader.load_service(Some(identifier), "session") {
            Err(Error::InstantiationFailure { .. } | Error::InvalidArgument { .. }) => {}
            other => panic!("Expected a construction error for {identifier:?}, got {other:?}"),
        }
    }
}
