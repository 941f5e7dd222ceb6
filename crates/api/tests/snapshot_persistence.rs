//! End-to-end check that HTTP writes reach the snapshot file.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{post_json_auth, register_and_login};
use serde_json::json;
use tradepost_events::{load_snapshot, DirectorySnapshot, EventBus, SnapshotPersistence};
use tradepost_store::Directory;

#[tokio::test]
async fn test_http_writes_are_mirrored_to_the_snapshot_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.json");

    let bus = Arc::new(EventBus::default());
    let directory = Arc::new(Directory::new(Arc::clone(&bus)));
    let persistence = SnapshotPersistence::new(&path, DirectorySnapshot::default());
    let handle = tokio::spawn(persistence.run(bus.subscribe()));

    let app = common::build_test_app_from(Arc::clone(&directory));

    let token = register_and_login(&app, "a@test.com", "pw").await;
    let response = post_json_auth(
        app.clone(),
        "/api/v1/listings",
        json!({ "title": "Yoga Lesson", "category": "service", "lat": 0, "lng": 0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Close the bus so the persistence task drains and exits.
    drop(app);
    drop(directory);
    drop(bus);
    handle.await.expect("persistence task should finish");

    let snapshot = load_snapshot(&path);
    assert_eq!(snapshot.identities.len(), 1);
    assert_eq!(snapshot.identities[0].email, "a@test.com");
    assert_eq!(snapshot.listings.len(), 1);
    assert_eq!(snapshot.listings[0].title, "Yoga Lesson");

    // A directory seeded from the snapshot accepts the old credentials.
    let restored = Arc::new(Directory::new(Arc::new(EventBus::default())));
    restored
        .load(snapshot.identities, snapshot.listings)
        .await;
    let restored_app = common::build_test_app_from(restored);
    let token = {
        let response = common::post_json(
            restored_app.clone(),
            "/api/v1/auth/login",
            json!({ "email": "a@test.com", "secret": "pw" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        common::body_json(response).await["token"]
            .as_str()
            .expect("token")
            .to_string()
    };
    assert!(!token.is_empty());
}
