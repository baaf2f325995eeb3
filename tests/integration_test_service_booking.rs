mod common;

use axum::http::StatusCode;
use base64::{Engine as _, engine::general_purpose};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_catalog_lists_every_service() {
    let app = TestApp::new().await;

    let (status, body) = app.send("GET", "/api/v1/services", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let services = body.as_array().unwrap();
    assert_eq!(services.len(), 10);

    let massage = services.iter().find(|s| s["service_type"] == "spa-traditional-massage").unwrap();
    assert_eq!(massage["price"], 350_000);
    assert_eq!(massage["duration_min"], 60);
}

#[tokio::test]
async fn test_service_total_is_price_times_guests() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let method = app.seed_payment_method("OVO", true).await;

    let (status, body) = app.send("POST", "/api/v1/service-bookings", Some(&guest), Some(json!({
        "service_type": "spa-traditional-massage",
        "payment_method_id": method.id,
        "service_date": "2030-09-01",
        "service_time": "10:00",
        "guests": 3,
        "special_requests": "Quiet room"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_amount"], 1_050_000);
    assert_eq!(body["service"]["price"], 350_000);
    assert_eq!(body["service"]["duration_min"], 60);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["payment_status"], "pending");
    assert_eq!(body["payment_method"]["name"], "OVO");
    assert_eq!(body["user_email"], "guest@example.com");

    let (_, mine) = app.send("GET", "/api/v1/service-bookings", Some(&guest), None).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_service_guest_limit() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let method = app.seed_payment_method("OVO", true).await;

    for (guests, expected) in [(0, StatusCode::BAD_REQUEST), (21, StatusCode::BAD_REQUEST), (20, StatusCode::OK)] {
        let (status, _) = app.send("POST", "/api/v1/service-bookings", Some(&guest), Some(json!({
            "service_type": "dining-breakfast-buffet",
            "payment_method_id": method.id,
            "service_date": "2030-09-01",
            "service_time": "07:00",
            "guests": guests
        }))).await;
        assert_eq!(status, expected, "guests = {}", guests);
    }

    let (status, body) = app.send("POST", "/api/v1/service-bookings", Some(&guest), Some(json!({
        "service_type": "dining-breakfast-buffet",
        "payment_method_id": method.id,
        "service_date": "2030-09-01",
        "service_time": "07:00"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("guests"));
}

#[tokio::test]
async fn test_service_selection_errors() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let method = app.seed_payment_method("OVO", true).await;
    let inactive = app.seed_payment_method("Old Bank", false).await;

    let (status, body) = app.send("POST", "/api/v1/service-bookings", Some(&guest), Some(json!({
        "service_type": "",
        "service_date": "2030-09-01",
        "service_time": "07:00",
        "guests": 1
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no service selected");

    let (status, body) = app.send("POST", "/api/v1/service-bookings", Some(&guest), Some(json!({
        "service_type": "spa-facial",
        "service_date": "2030-09-01",
        "service_time": "07:00",
        "guests": 1
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no payment method");

    let (status, _) = app.send("POST", "/api/v1/service-bookings", Some(&guest), Some(json!({
        "service_type": "spa-mud-bath",
        "payment_method_id": method.id,
        "service_date": "2030-09-01",
        "service_time": "07:00",
        "guests": 1
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("POST", "/api/v1/service-bookings", Some(&guest), Some(json!({
        "service_type": "spa-facial",
        "payment_method_id": inactive.id,
        "service_date": "2030-09-01",
        "service_time": "07:00",
        "guests": 1
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("POST", "/api/v1/service-bookings", Some(&guest), Some(json!({
        "service_type": "spa-facial",
        "payment_method_id": method.id,
        "service_date": "2030-09-01",
        "guests": 1
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_service_booking_proof_and_ownership() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let other = app.login("guest-2", "other@example.com").await;
    let admin = app.login_admin().await;
    let method = app.seed_payment_method("OVO", true).await;

    let (_, created) = app.send("POST", "/api/v1/service-bookings", Some(&guest), Some(json!({
        "service_type": "hotel-airport-transfer",
        "payment_method_id": method.id,
        "service_date": "2030-09-01",
        "service_time": "05:30",
        "guests": 2
    }))).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = app.send("GET", &format!("/api/v1/service-bookings/{}", id), Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send("GET", &format!("/api/v1/service-bookings/{}", id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send("POST", &format!("/api/v1/service-bookings/{}/payment-proof", id), Some(&guest), Some(json!({
        "file_name": "ovo.jpg",
        "file_type": "image/jpeg",
        "data_base64": general_purpose::STANDARD.encode([7u8; 300]),
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_status"], "proof-uploaded");

    let (status, body) = app.send("POST", &format!("/api/v1/admin/reviews/service/{}/verify-payment", id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_status"], "verified");

    let (_, all) = app.send("GET", "/api/v1/admin/service-bookings?status=pending", Some(&admin), None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}
