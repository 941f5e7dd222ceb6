//! HTTP-level integration tests for listing publication and discovery.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json_auth, register_and_login};
use serde_json::json;

// ---------------------------------------------------------------------------
// Publication
// ---------------------------------------------------------------------------

/// Publishing without any token returns 401.
#[tokio::test]
async fn test_create_without_token() {
    let app = common::build_test_app();

    let response = common::post_json(
        app,
        "/api/v1/listings",
        json!({ "title": "Yoga Lesson", "category": "service" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

/// A token the server never issued returns 401, however plausible it looks.
#[tokio::test]
async fn test_create_with_garbled_token() {
    let app = common::build_test_app();
    register_and_login(&app, "a@test.com", "pw").await;

    let well_formed_but_unissued = "0".repeat(64);
    for bogus in ["deadbeef", well_formed_but_unissued.as_str()] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/listings",
            json!({ "title": "Yoga Lesson", "category": "service" }),
            bogus,
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

/// Successful publication returns 201 with the stored listing.
#[tokio::test]
async fn test_create_success() {
    let app = common::build_test_app();
    let token = register_and_login(&app, "a@test.com", "pw").await;

    let response = post_json_auth(
        app,
        "/api/v1/listings",
        json!({
            "title": "Yoga Lesson",
            "description": "one hour of hatha yoga",
            "category": "service",
            "offer": "vegetables or bread",
            "lat": 51.5,
            "lng": -0.12,
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["id"].is_string());
    assert!(json["owner_id"].is_string());
    assert_eq!(json["title"], "Yoga Lesson");
    assert_eq!(json["category"], "service");
    assert_eq!(json["offer"], "vegetables or bread");
    assert_eq!(json["latitude"], 51.5);
    assert_eq!(json["longitude"], -0.12);
    assert!(json["created_at"].is_string());
}

/// Missing title or category returns 400 with the MISSING_FIELDS code.
#[tokio::test]
async fn test_create_missing_fields() {
    let app = common::build_test_app();
    let token = register_and_login(&app, "a@test.com", "pw").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/listings",
        json!({ "category": "service" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_FIELDS");

    let response = post_json_auth(
        app,
        "/api/v1/listings",
        json!({ "title": "Yoga Lesson", "category": "" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Bad coordinates are coerced to 0.0, never rejected.
#[tokio::test]
async fn test_create_coerces_bad_coordinates() {
    let app = common::build_test_app();
    let token = register_and_login(&app, "a@test.com", "pw").await;

    let response = post_json_auth(
        app,
        "/api/v1/listings",
        json!({
            "title": "Garden Tools",
            "category": "goods",
            "lat": "not-a-number",
            "lng": "2.35",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["latitude"], 0.0);
    assert_eq!(json["longitude"], 2.35);
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Publish a standard set of listings for the discovery tests.
async fn seed_listings(app: &axum::Router, token: &str) {
    for body in [
        json!({ "title": "Yoga Lesson", "description": "one hour of hatha yoga",
                "category": "service", "lat": 0, "lng": 0 }),
        json!({ "title": "Garden Tools", "description": "spade and rake",
                "category": "goods", "lat": 0, "lng": 1 }),
        json!({ "title": "Sourdough Starter", "description": "lively rye culture",
                "category": "food", "lat": 45, "lng": 7 }),
    ] {
        let response = post_json_auth(app.clone(), "/api/v1/listings", body, token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

/// No filters: everything comes back in creation order.
#[tokio::test]
async fn test_discover_unfiltered() {
    let app = common::build_test_app();
    let token = register_and_login(&app, "a@test.com", "pw").await;
    seed_listings(&app, &token).await;

    let response = get(app, "/api/v1/listings").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().expect("data array");
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["title"], "Yoga Lesson");
    assert_eq!(data[1]["title"], "Garden Tools");
    assert_eq!(data[2]["title"], "Sourdough Starter");
}

/// Category must match exactly, case-sensitively.
#[tokio::test]
async fn test_discover_by_category() {
    let app = common::build_test_app();
    let token = register_and_login(&app, "a@test.com", "pw").await;
    seed_listings(&app, &token).await;

    let response = get(app.clone(), "/api/v1/listings?category=service").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().expect("data").len(), 1);

    let response = get(app, "/api/v1/listings?category=Service").await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().expect("data").is_empty());
}

/// Free text matches title or description, case-insensitively.
#[tokio::test]
async fn test_discover_by_text() {
    let app = common::build_test_app();
    let token = register_and_login(&app, "a@test.com", "pw").await;
    seed_listings(&app, &token).await;

    let response = get(app.clone(), "/api/v1/listings?q=YOGA").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().expect("data").len(), 1);

    // "rake" only appears in a description.
    let response = get(app, "/api/v1/listings?q=rake").await;
    let json = body_json(response).await;
    let data = json["data"].as_array().expect("data");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Garden Tools");
}

/// Radius filtering includes the centre listing and excludes distant ones.
#[tokio::test]
async fn test_discover_by_radius() {
    let app = common::build_test_app();
    let token = register_and_login(&app, "a@test.com", "pw").await;
    seed_listings(&app, &token).await;

    let response = get(app.clone(), "/api/v1/listings?lat=0&lng=0&radius=1").await;
    let json = body_json(response).await;
    let data = json["data"].as_array().expect("data");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Yoga Lesson");

    let response = get(app, "/api/v1/listings?lat=10&lng=10&radius=1").await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().expect("data").is_empty());
}

/// Partial or garbled geo parameters disable the filter entirely.
#[tokio::test]
async fn test_discover_partial_geo_params_are_ignored() {
    let app = common::build_test_app();
    let token = register_and_login(&app, "a@test.com", "pw").await;
    seed_listings(&app, &token).await;

    for query in [
        "?lat=0&lng=0",
        "?radius=1",
        "?lat=0&radius=1",
        "?lat=abc&lng=0&radius=1",
    ] {
        let response = get(app.clone(), &format!("/api/v1/listings{query}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json["data"].as_array().expect("data").len(),
            3,
            "geo filter must be skipped for {query}"
        );
    }
}

/// Predicates compose conjunctively.
#[tokio::test]
async fn test_discover_composed_predicates() {
    let app = common::build_test_app();
    let token = register_and_login(&app, "a@test.com", "pw").await;
    seed_listings(&app, &token).await;

    let response = get(app.clone(), "/api/v1/listings?category=service&q=yoga").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().expect("data").len(), 1);

    let response = get(app.clone(), "/api/v1/listings?category=goods&q=yoga").await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().expect("data").is_empty());

    let response = get(
        app,
        "/api/v1/listings?category=service&q=yoga&lat=0&lng=0&radius=5",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().expect("data").len(), 1);
}

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

/// Register, log in, publish, and rediscover one listing.
#[tokio::test]
async fn test_end_to_end_scenario() {
    let app = common::build_test_app();
    let token = register_and_login(&app, "a@test.com", "pw").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/listings",
        json!({ "title": "Yoga Lesson", "category": "service", "lat": 0, "lng": 0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, "/api/v1/listings").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().expect("data");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Yoga Lesson");
}
