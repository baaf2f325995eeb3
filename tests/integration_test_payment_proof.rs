mod common;

use axum::http::StatusCode;
use base64::{Engine as _, engine::general_purpose};
use common::{AuthHeaders, TestApp};
use reservation_backend::domain::ports::BookingRepository;
use reservation_backend::infra::repositories::sqlite_booking_repo::SqliteBookingRepo;
use serde_json::{json, Value};

async fn pending_booking(app: &TestApp, auth: &AuthHeaders) -> String {
    let venue = app.seed_venue("Ballroom", 100, 2_000_000).await;
    let method = app.seed_payment_method("BCA", true).await;
    let (_, body) = app.send("POST", "/api/v1/bookings", Some(auth), Some(json!({
        "venue_id": venue.id,
        "payment_method_id": method.id,
        "event_name": "Gala",
        "check_in": "2030-07-10",
        "check_out": "2030-07-12",
        "guests": 50
    }))).await;
    body["id"].as_str().unwrap().to_string()
}

fn proof(size: usize, file_type: &str) -> Value {
    json!({
        "file_name": "transfer-receipt.png",
        "file_type": file_type,
        "data_base64": general_purpose::STANDARD.encode(vec![0x89u8; size]),
    })
}

#[tokio::test]
async fn test_owner_uploads_proof() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let id = pending_booking(&app, &guest).await;

    let (status, body) = app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(proof(2048, "image/png"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_status"], "proof-uploaded");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["payment_proof"]["file_size"], 2048);
    assert_eq!(body["payment_proof"]["file_type"], "image/png");
    assert_eq!(body["payment_proof"]["status"], "pending");
    assert!(body["payment_proof"].get("data").is_none());

    let (status, stored) = app.send("GET", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), None).await;
    assert_eq!(status, StatusCode::OK);
    let decoded = general_purpose::STANDARD.decode(stored["data_base64"].as_str().unwrap()).unwrap();
    assert_eq!(decoded.len(), 2048);
}

#[tokio::test]
async fn test_data_url_prefix_is_accepted() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let id = pending_booking(&app, &guest).await;

    let payload = json!({
        "file_name": "receipt.jpg",
        "file_type": "image/jpeg",
        "data_base64": format!("data:image/jpeg;base64,{}", general_purpose::STANDARD.encode([1u8, 2, 3])),
    });
    let (status, body) = app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_proof"]["file_size"], 3);
}

#[tokio::test]
async fn test_oversized_or_non_image_proof_changes_nothing() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let id = pending_booking(&app, &guest).await;

    let (status, _) = app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(proof(5 * 1024 * 1024 + 1, "image/png"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(proof(512, "application/pdf"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(json!({
        "file_name": "x.png", "file_type": "image/png", "data_base64": "%%%not base64%%%"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, fetched) = app.send("GET", &format!("/api/v1/bookings/{}", id), Some(&guest), None).await;
    assert_eq!(fetched["payment_status"], "pending");
    assert!(fetched["payment_proof"].is_null());
}

#[tokio::test]
async fn test_exactly_five_mebibytes_is_accepted() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let id = pending_booking(&app, &guest).await;

    let (status, _) = app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(proof(5 * 1024 * 1024, "image/webp"))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_other_customers_cannot_upload_or_read() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let intruder = app.login("guest-2", "other@example.com").await;
    let id = pending_booking(&app, &guest).await;

    let (status, _) = app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&intruder), Some(proof(64, "image/png"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(proof(64, "image/png"))).await;
    let (status, _) = app.send("GET", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&intruder), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reupload_replaces_then_verify_locks() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let admin = app.login_admin().await;
    let id = pending_booking(&app, &guest).await;

    app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(proof(64, "image/png"))).await;
    let (status, body) = app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(proof(128, "image/jpeg"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_proof"]["file_size"], 128);

    let (status, _) = app.send("POST", &format!("/api/v1/admin/reviews/room/{}/verify-payment", id), Some(&guest), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send("POST", &format!("/api/v1/admin/reviews/room/{}/verify-payment", id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_status"], "verified");
    assert_eq!(body["payment_proof"]["status"], "verified");
    assert!(body["payment_verified_at"].is_string());

    let (status, _) = app.send("POST", &format!("/api/v1/admin/reviews/room/{}/verify-payment", id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(proof(64, "image/png"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_verify_without_proof_conflicts() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let admin = app.login_admin().await;
    let id = pending_booking(&app, &guest).await;

    let (status, _) = app.send("POST", &format!("/api/v1/admin/reviews/room/{}/verify-payment", id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_rejected_booking_refuses_proof() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let admin = app.login_admin().await;
    let id = pending_booking(&app, &guest).await;

    app.send("POST", &format!("/api/v1/admin/reviews/room/{}/reject", id), Some(&admin), Some(json!({"reason": "No availability"}))).await;

    let (status, _) = app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(proof(64, "image/png"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_missing_proof_is_not_found() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let id = pending_booking(&app, &guest).await;

    let (status, _) = app.send("GET", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listings_leave_proof_content_in_the_store() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let admin = app.login_admin().await;
    let id = pending_booking(&app, &guest).await;
    app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(proof(4096, "image/png"))).await;

    let repo = SqliteBookingRepo::new(app.pool.clone());

    let listed = repo.list_by_user("guest-1").await.unwrap();
    let listed_proof = listed[0].payment_proof.as_ref().unwrap();
    assert_eq!(listed_proof.file_size, 4096);
    assert_eq!(listed_proof.file_type, "image/png");
    assert!(listed_proof.data.is_empty());

    let all = repo.list_all(None).await.unwrap();
    assert!(all[0].payment_proof.as_ref().unwrap().data.is_empty());

    let full = repo.find_by_id(&id).await.unwrap().unwrap();
    let decoded = general_purpose::STANDARD.decode(&full.payment_proof.unwrap().data).unwrap();
    assert_eq!(decoded.len(), 4096);

    // The listing endpoint still reports the proof metadata.
    let (_, mine) = app.send("GET", "/api/v1/bookings", Some(&guest), None).await;
    assert_eq!(mine[0]["payment_proof"]["file_size"], 4096);

    let (_, stats) = app.send("GET", "/api/v1/admin/stats", Some(&admin), None).await;
    assert_eq!(stats["awaiting_verification"], 1);
    assert_eq!(stats["rooms"]["pending"], 1);

    // Verifying after a listing read keeps the stored content intact.
    app.send("POST", &format!("/api/v1/admin/reviews/room/{}/verify-payment", id), Some(&admin), None).await;
    let (status, stored) = app.send("GET", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), None).await;
    assert_eq!(status, StatusCode::OK);
    let decoded = general_purpose::STANDARD.decode(stored["data_base64"].as_str().unwrap()).unwrap();
    assert_eq!(decoded.len(), 4096);
}

#[tokio::test]
async fn test_upload_without_content_is_a_validation_error() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let id = pending_booking(&app, &guest).await;

    let (status, body) = app.send("POST", &format!("/api/v1/bookings/{}/payment-proof", id), Some(&guest), Some(json!({
        "file_name": "receipt.png",
        "file_type": "image/png"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("empty"));

    let (_, fetched) = app.send("GET", &format!("/api/v1/bookings/{}", id), Some(&guest), None).await;
    assert_eq!(fetched["payment_status"], "pending");
    assert!(fetched["payment_proof"].is_null());
}
