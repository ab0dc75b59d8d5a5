//! Tests for the filesystem artifact service

use svcreg_domain::entities::{Artifact, ArtifactScope};
use svcreg_providers::{ArtifactService, FileArtifactService};
use tempfile::TempDir;

fn open_store() -> (TempDir, FileArtifactService) {
    let dir = TempDir::new().unwrap();
    let store = FileArtifactService::open(dir.path().join("artifacts")).unwrap();
    (dir, store)
}

#[tokio::test]
async fn test_save_and_load_versions() {
    let (_dir, store) = open_store();
    let scope = ArtifactScope::new("app", "u1", "s1");

    assert_eq!(store.save_artifact(&scope, "doc.txt", Artifact::text("one")).await.unwrap(), 0);
    assert_eq!(
        store
            .save_artifact(&scope, "doc.txt", Artifact::new(b"{}".to_vec(), "application/json"))
            .await
            .unwrap(),
        1
    );

    let latest = store.load_artifact(&scope, "doc.txt", None).await.unwrap().unwrap();
    assert_eq!(latest.mime_type, "application/json");
    let first = store.load_artifact(&scope, "doc.txt", Some(0)).await.unwrap().unwrap();
    assert_eq!(first, Artifact::text("one"));
    assert_eq!(store.list_versions(&scope, "doc.txt").await.unwrap(), vec![0, 1]);
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let scope = ArtifactScope::new("app", "u1", "s1");
    {
        let store = FileArtifactService::open(dir.path()).unwrap();
        store
            .save_artifact(&scope, "user:settings.json", Artifact::text("{}"))
            .await
            .unwrap();
    }

    let reopened = FileArtifactService::open(dir.path()).unwrap();
    let keys = reopened
        .list_artifact_keys(&ArtifactScope::new("app", "u1", "another"))
        .await
        .unwrap();
    assert_eq!(keys, vec!["user:settings.json".to_string()]);
}

#[tokio::test]
async fn test_unsafe_names_stay_under_root() {
    let (dir, store) = open_store();
    let scope = ArtifactScope::new("..", "../u1", "s/1");
    store
        .save_artifact(&scope, "../../escape.txt", Artifact::text("x"))
        .await
        .unwrap();

    assert!(!dir.path().join("escape.txt").exists());
    assert_eq!(
        store.list_artifact_keys(&scope).await.unwrap(),
        vec!["../../escape.txt".to_string()]
    );
}

#[tokio::test]
async fn test_missing_artifact_loads_none() {
    let (_dir, store) = open_store();
    let scope = ArtifactScope::new("app", "u1", "s1");
    assert!(store.load_artifact(&scope, "nope", None).await.unwrap().is_none());
    assert!(store.list_artifact_keys(&scope).await.unwrap().is_empty());
    store.delete_artifact(&scope, "nope").await.unwrap();
}
