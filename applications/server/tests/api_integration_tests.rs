/// API integration tests
/// Tests complete HTTP request/response cycles with a real database
mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{fixtures, TestApp};
use serde_json::json;
use voyage_core::validation::{DESTINATIONS_REQUIRED, START_DATE_INVALID};
use voyage_core::UserId;

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

// =============================================================================
// Registration and login
// =============================================================================

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "name": "Ada", "email": " Ada@Example.com ", "password": "secret1" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["name"], "Ada");
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "name": "Other", "email": "ADA@example.com", "password": "secret1" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn test_register_validation_messages() {
    let app = TestApp::new().await;

    let cases = [
        (json!({ "email": "a@b.io", "password": "secret1" }), "Name is required"),
        (
            json!({ "name": "Ada", "email": "not-an-email", "password": "secret1" }),
            "Please include a valid email",
        ),
        (
            json!({ "name": "Ada", "email": "a@b.io", "password": "12345" }),
            "Password must be at least 6 characters",
        ),
    ];

    for (body, message) in cases {
        let (status, response) = app
            .request(Method::POST, "/api/auth/register", None, Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], message);
    }
}

#[tokio::test]
async fn test_login_flow() {
    let app = TestApp::new().await;
    let (_, user_id) = app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": fixtures::TEST_PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id.as_str());

    // Use the token on a protected route
    let token = body["token"].as_str().unwrap();
    let (status, me) = app.request(Method::GET, "/api/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "ada@example.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "wrongpassword" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "password" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(Method::POST, "/api/auth/login", None, Some(json!({ "email": "a@b.io" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email and password are required");
}

// =============================================================================
// Auth gate
// =============================================================================

#[tokio::test]
async fn test_itineraries_without_token() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/api/itineraries", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token, authorization denied");
}

#[tokio::test]
async fn test_itineraries_with_invalid_token() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(Method::GET, "/api/itineraries", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token is not valid");
}

#[tokio::test]
async fn test_token_for_unknown_user_rejected() {
    let app = TestApp::new().await;
    let token = app
        .state
        .auth_service
        .create_token(&UserId::generate())
        .unwrap();

    let (status, body) = app
        .request(Method::GET, "/api/itineraries", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token is not valid");
}

#[tokio::test]
async fn test_raw_authorization_header_accepted() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;

    let request = Request::builder()
        .uri("/api/itineraries")
        .header(header::AUTHORIZATION, token)
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

// =============================================================================
// Itineraries
// =============================================================================

#[tokio::test]
async fn test_list_empty() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .request(Method::GET, "/api/itineraries", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_itinerary() {
    let app = TestApp::new().await;
    let (token, user_id) = app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/itineraries",
            Some(&token),
            Some(fixtures::europe_trip()),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_string());
    assert_eq!(body["title"], "Europe Trip");
    assert_eq!(body["user"], user_id.as_str());
    assert_eq!(body["destinations"].as_array().unwrap().len(), 1);
    assert_eq!(body["destinations"][0]["location"], "Paris");
    assert_eq!(body["destinations"][0]["startDate"], "2024-06-01T00:00:00Z");
    assert!(body["destinations"][0]["latitude"].is_null());
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_create_rejects_empty_destinations() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/itineraries",
            Some(&token),
            Some(json!({ "title": "Nowhere", "destinations": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "At least one destination is required");

    // Nothing was persisted
    let (_, list) = app
        .request(Method::GET, "/api/itineraries", Some(&token), None)
        .await;
    assert_eq!(list, json!([]));
}

async fn assert_create_rejected(
    app: &TestApp,
    token: &str,
    cases: Vec<(serde_json::Value, &str)>,
) {
    for (body, message) in cases {
        let (status, response) = app
            .request(Method::POST, "/api/itineraries", Some(token), Some(body.clone()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(response["message"], message, "body: {}", body);
    }
}

#[tokio::test]
async fn test_create_validation_order() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;

    let no_location = json!({ "startDate": "2024-06-01", "endDate": "2024-06-02" });
    let bad_start = json!({ "location": "Paris", "startDate": "soon", "endDate": "2024-06-02" });
    let no_end = json!({ "location": "Paris", "startDate": "2024-06-01" });

    let cases = vec![
        (json!({ "destinations": [] }), "Title is required"),
        (json!({ "title": "T", "destinations": [no_location] }), "Location is required"),
        (json!({ "title": "T", "destinations": [bad_start] }), "Valid start date is required"),
        (json!({ "title": "T", "destinations": [no_end] }), "Valid end date is required"),
    ];
    assert_create_rejected(&app, &token, cases).await;
}

#[tokio::test]
async fn test_wrongly_typed_fields_report_rule_messages() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;

    let numeric_location = json!({ "location": 5, "endDate": "2024-06-02" });
    let object_location = json!({ "location": {}, "startDate": "2024-06-01" });

    let cases = vec![
        (json!({ "title": "", "destinations": {} }), "Title is required"),
        (json!({ "destinations": "Paris" }), "Title is required"),
        (json!({ "title": "T", "destinations": "Paris" }), DESTINATIONS_REQUIRED),
        (json!({ "title": "T", "destinations": {} }), DESTINATIONS_REQUIRED),
        (json!({ "title": "T", "destinations": [null] }), "Location is required"),
        (json!({ "title": "T", "destinations": [object_location] }), "Location is required"),
        (json!({ "title": "T", "destinations": [numeric_location] }), START_DATE_INVALID),
    ];
    assert_create_rejected(&app, &token, cases).await;

    // Same rules guard updates
    let (_, created) = app
        .request(
            Method::POST,
            "/api/itineraries",
            Some(&token),
            Some(fixtures::europe_trip()),
        )
        .await;
    let uri = format!("/api/itineraries/{}", created["id"].as_str().unwrap());
    let (status, body) = app
        .request(
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({ "title": "T", "destinations": "Rome" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "At least one destination is required");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/itineraries")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_list_is_scoped_and_newest_first() {
    let app = TestApp::new().await;
    let (ada, _) = app.register("Ada", "ada@example.com").await;
    let (bob, _) = app.register("Bob", "bob@example.com").await;

    for title in ["First", "Second"] {
        let mut trip = fixtures::europe_trip();
        trip["title"] = json!(title);
        let (status, _) = app
            .request(Method::POST, "/api/itineraries", Some(&ada), Some(trip))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    app.request(
        Method::POST,
        "/api/itineraries",
        Some(&bob),
        Some(fixtures::europe_trip()),
    )
    .await;

    let (_, list) = app
        .request(Method::GET, "/api/itineraries", Some(&ada), None)
        .await;
    let titles: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[tokio::test]
async fn test_update_round_trip() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;

    let (_, created) = app
        .request(
            Method::POST,
            "/api/itineraries",
            Some(&token),
            Some(fixtures::europe_trip()),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let mut changed = fixtures::europe_trip();
    changed["title"] = json!("Europe Trip, extended");
    changed["destinations"][0]["latitude"] = json!(48.8566);
    changed["destinations"][0]["longitude"] = json!("2.3522");

    let (status, updated) = app
        .request(
            Method::PUT,
            &format!("/api/itineraries/{}", id),
            Some(&token),
            Some(changed),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["user"], created["user"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["title"], "Europe Trip, extended");
    assert_eq!(updated["destinations"][0]["location"], "Paris");
    assert_eq!(updated["destinations"][0]["latitude"], 48.8566);
    assert_eq!(updated["destinations"][0]["longitude"], 2.3522);

    let (_, list) = app
        .request(Method::GET, "/api/itineraries", Some(&token), None)
        .await;
    assert_eq!(list, json!([updated]));
}

#[tokio::test]
async fn test_update_not_owned_is_not_found() {
    let app = TestApp::new().await;
    let (ada, _) = app.register("Ada", "ada@example.com").await;
    let (bob, _) = app.register("Bob", "bob@example.com").await;

    let (_, created) = app
        .request(
            Method::POST,
            "/api/itineraries",
            Some(&ada),
            Some(fixtures::europe_trip()),
        )
        .await;
    let uri = format!("/api/itineraries/{}", created["id"].as_str().unwrap());

    let (status, body) = app
        .request(Method::PUT, &uri, Some(&bob), Some(fixtures::europe_trip()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Itinerary not found" }));

    // Same answer as a record that never existed
    let (status, missing) = app
        .request(
            Method::PUT,
            "/api/itineraries/does-not-exist",
            Some(&bob),
            Some(fixtures::europe_trip()),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing, body);
}

#[tokio::test]
async fn test_delete_not_owned_is_not_found() {
    let app = TestApp::new().await;
    let (ada, _) = app.register("Ada", "ada@example.com").await;
    let (bob, _) = app.register("Bob", "bob@example.com").await;

    let (_, created) = app
        .request(
            Method::POST,
            "/api/itineraries",
            Some(&ada),
            Some(fixtures::europe_trip()),
        )
        .await;
    let uri = format!("/api/itineraries/{}", created["id"].as_str().unwrap());

    let (status, body) = app.request(Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Itinerary not found");

    // Still there for the owner
    let (_, list) = app
        .request(Method::GET, "/api/itineraries", Some(&ada), None)
        .await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_itinerary() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com").await;

    let (_, created) = app
        .request(
            Method::POST,
            "/api/itineraries",
            Some(&token),
            Some(fixtures::europe_trip()),
        )
        .await;
    let uri = format!("/api/itineraries/{}", created["id"].as_str().unwrap());

    let (status, body) = app.request(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Itinerary deleted" }));

    let (status, _) = app.request(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = app
        .request(Method::GET, "/api/itineraries", Some(&token), None)
        .await;
    assert_eq!(list, json!([]));
}
