//! Tests for the in-memory session service

use serde_json::json;
use std::collections::HashMap;
use svcreg_domain::entities::Event;
use svcreg_providers::{InMemorySessionService, SessionService};

#[tokio::test]
async fn test_create_get_delete_session() {
    let service = InMemorySessionService::new();
    let state = HashMap::from([("lang".to_string(), json!("en"))]);

    let created = service
        .create_session("app", "u1", Some(state), Some("s1"))
        .await
        .unwrap();
    assert_eq!(created.id, "s1");
    assert_eq!(created.state.get("lang"), Some(&json!("en")));

    let fetched = service.get_session("app", "u1", "s1").await.unwrap();
    assert_eq!(fetched, Some(created));

    service.delete_session("app", "u1", "s1").await.unwrap();
    assert!(service.get_session("app", "u1", "s1").await.unwrap().is_none());

    // Deleting again is not an error
    service.delete_session("app", "u1", "s1").await.unwrap();
}

#[tokio::test]
async fn test_generated_ids_are_unique() {
    let service = InMemorySessionService::new();
    let a = service.create_session("app", "u1", None, None).await.unwrap();
    let b = service.create_session("app", "u1", None, None).await.unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(service.len(), 2);
}

#[tokio::test]
async fn test_list_sessions_scoped_to_user_without_events() {
    let service = InMemorySessionService::new();
    let s1 = service
        .create_session("app", "u1", None, Some("b"))
        .await
        .unwrap();
    service
        .create_session("app", "u1", None, Some("a"))
        .await
        .unwrap();
    service
        .create_session("app", "u2", None, Some("c"))
        .await
        .unwrap();
    service
        .append_event(&s1, Event::new("user", "hello"))
        .await
        .unwrap();

    let listed = service.list_sessions("app", "u1").await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert!(listed.iter().all(|s| s.events.is_empty()));
}

#[tokio::test]
async fn test_clones_share_storage() {
    let service = InMemorySessionService::new();
    let clone = service.clone();
    service
        .create_session("app", "u1", None, Some("shared"))
        .await
        .unwrap();
    assert!(clone.get_session("app", "u1", "shared").await.unwrap().is_some());
}
