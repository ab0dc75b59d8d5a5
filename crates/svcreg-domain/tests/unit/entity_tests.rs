//! Unit tests for runtime service entities

use serde_json::json;
use svcreg_domain::entities::{Artifact, ArtifactScope, Event, Session, is_user_scoped};

#[test]
fn test_session_serializes_state_and_events() {
    let mut session = Session::new("s1", "app", "u1");
    session.apply_event(Event::new("user", "hello").with_state_delta("count", json!(1)));

    let value = serde_json::to_value(&session).unwrap();
    assert_eq!(value["state"]["count"], json!(1));
    assert_eq!(value["events"][0]["content"], json!("hello"));
}

#[test]
fn test_user_scoped_namespace() {
    let scope = ArtifactScope::new("app", "u1", "s1");
    assert!(is_user_scoped("user:profile.png"));
    assert!(!is_user_scoped("report.txt"));
    assert_eq!(scope.namespace_for("user:profile.png"), "app/u1/user");
    assert_eq!(scope.namespace_for("report.txt"), "app/u1/s1");
}

#[test]
fn test_text_artifact() {
    let artifact = Artifact::text("hi");
    assert_eq!(artifact.data, b"hi".to_vec());
    assert_eq!(artifact.mime_type, "text/plain");
}
