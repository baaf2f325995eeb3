mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{TestApp, ADMIN_EMAIL};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_first_session_creates_customer() {
    let app = TestApp::new().await;
    let auth = app.login("guest-1", "guest@example.com").await;

    let (status, body) = app.send("GET", "/api/v1/me", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uid"], "guest-1");
    assert_eq!(body["email"], "guest@example.com");
    assert_eq!(body["role"], "customer");
    assert_eq!(body["display_name"], "Test User");
}

#[tokio::test]
async fn test_configured_admin_email_bootstraps_admin() {
    let app = TestApp::new().await;
    let auth = app.login("boss", &ADMIN_EMAIL.to_uppercase()).await;

    let (_, body) = app.send("GET", "/api/v1/me", Some(&auth), None).await;
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn test_existing_user_is_not_overwritten() {
    let app = TestApp::new().await;
    let admin = app.login_admin().await;
    app.login("guest-1", "guest@example.com").await;

    let (status, _) = app.send("PUT", "/api/v1/admin/users/guest-1/role", Some(&admin), Some(json!({"role": "admin"}))).await;
    assert_eq!(status, StatusCode::OK);

    // Signing in again must keep the promoted role.
    let again = app.login("guest-1", "guest@example.com").await;
    let (_, body) = app.send("GET", "/api/v1/me", Some(&again), None).await;
    assert_eq!(body["role"], "admin");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE uid = 'guest-1'")
        .fetch_one(&app.pool).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_session_requires_bearer_token() {
    let app = TestApp::new().await;

    let (status, _) = app.send("POST", "/api/v1/auth/session", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/session")
            .header(header::AUTHORIZATION, "Bearer |no-uid")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_reject_missing_session() {
    let app = TestApp::new().await;

    let (status, _) = app.send("GET", "/api/v1/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send("GET", "/api/v1/bookings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mutations_require_csrf_header() {
    let app = TestApp::new().await;
    let auth = app.login("guest-1", "guest@example.com").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/bookings")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"guests": 1}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/bookings")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", "wrong")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"guests": 1}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_tampered_session_is_rejected() {
    let app = TestApp::new().await;
    let mut auth = app.login("guest-1", "guest@example.com").await;
    auth.access_token.push('x');

    let (status, _) = app.send("GET", "/api/v1/me", Some(&auth), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/logout").body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let cleared = res.headers().get_all(header::SET_COOKIE).iter()
        .any(|h| h.to_str().unwrap().starts_with("access_token="));
    assert!(cleared);
}
