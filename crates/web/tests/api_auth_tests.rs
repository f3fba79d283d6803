//! Protected routes reject requests without a valid bearer token before
//! touching the database.

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use uuid::Uuid;

mod common;

#[derive(Serialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

fn token_with(sub: &str, exp_offset: i64, secret: &[u8]) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        exp: (now + exp_offset) as usize,
        iat: now as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

async fn status_for(uri: &str, authorization: Option<String>) -> StatusCode {
    let app = common::create_test_app();

    let mut request = Request::builder().uri(uri);
    if let Some(value) = authorization {
        request = request.header(header::AUTHORIZATION, value);
    }

    app.oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_protected_routes_without_token() {
    for uri in [
        "/api/sessions",
        "/api/personal-records",
        "/api/personal-records?sport=run",
    ] {
        assert_eq!(status_for(uri, None).await, StatusCode::UNAUTHORIZED, "{uri}");
    }

    let path = format!("/api/activities/{}", Uuid::new_v4());
    assert_eq!(status_for(&path, None).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unauthorized_body_is_json() {
    let app = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/sessions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let status = status_for("/api/sessions", Some("Token abc".to_string())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let status = status_for("/api/sessions", Some("Bearer not-a-jwt".to_string())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_key() {
    let token = token_with(
        &Uuid::new_v4().to_string(),
        3600,
        b"some_other_signing_key_32_bytes!",
    );
    let status = status_for("/api/sessions", Some(format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token() {
    let token = token_with(&Uuid::new_v4().to_string(), -7200, common::TEST_SECRET);
    let status = status_for("/api/sessions", Some(format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_subject_must_be_a_uuid() {
    let token = token_with("12345678", 3600, common::TEST_SECRET);
    let status = status_for("/api/sessions", Some(format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = common::create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_is_public() {
    let app = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let paths = body["paths"].as_object().expect("paths object");
    assert!(paths.contains_key("/api/personal-records"));
    assert!(paths.contains_key("/api/sessions/{session_id}/activities"));
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}
