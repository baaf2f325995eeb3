mod common;

use axum::http::StatusCode;
use common::{AuthHeaders, TestApp};
use serde_json::{json, Value};

async fn book(app: &TestApp, auth: &AuthHeaders, venue_id: &str, method_id: &str, check_in: &str, check_out: &str, time: Option<&str>) -> String {
    let mut payload = json!({
        "venue_id": venue_id,
        "payment_method_id": method_id,
        "event_name": "Seminar",
        "check_in": check_in,
        "check_out": check_out,
        "guests": 30
    });
    if let Some(time) = time {
        payload["event_time"] = json!(time);
    }
    let (status, body) = app.send("POST", "/api/v1/bookings", Some(auth), Some(payload)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["id"].as_str().unwrap().to_string()
}

fn availability_of(list: &Value, venue_id: &str) -> bool {
    list.as_array().unwrap()
        .iter()
        .find(|v| v["id"] == venue_id)
        .map(|v| v["available"].as_bool().unwrap())
        .expect("venue missing from availability list")
}

#[tokio::test]
async fn test_approved_slot_blocks_exact_time_only() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let admin = app.login_admin().await;
    let hall = app.seed_venue("Hall A", 50, 1_000_000).await;
    let garden = app.seed_venue("Garden", 200, 3_000_000).await;
    let method = app.seed_payment_method("BCA", true).await;

    let id = book(&app, &guest, &hall.id, &method.id, "2030-08-01", "2030-08-02", Some("18:00")).await;
    app.send("POST", &format!("/api/v1/admin/reviews/room/{}/approve", id), Some(&admin), None).await;

    let (status, at_slot) = app.send("GET", "/api/v1/availability?date=2030-08-01&time=18:00", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!availability_of(&at_slot, &hall.id));
    assert!(availability_of(&at_slot, &garden.id));

    // Seconds are optional in the query.
    let (_, with_seconds) = app.send("GET", "/api/v1/availability?date=2030-08-01&time=18:00:00", None, None).await;
    assert!(!availability_of(&with_seconds, &hall.id));

    let (_, other_time) = app.send("GET", "/api/v1/availability?date=2030-08-01&time=18:30", None, None).await;
    assert!(availability_of(&other_time, &hall.id));

    let (_, other_day) = app.send("GET", "/api/v1/availability?date=2030-08-02&time=18:00", None, None).await;
    assert!(availability_of(&other_day, &hall.id));
}

#[tokio::test]
async fn test_pending_and_rejected_bookings_leave_venue_free() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let admin = app.login_admin().await;
    let hall = app.seed_venue("Hall A", 50, 1_000_000).await;
    let method = app.seed_payment_method("BCA", true).await;

    book(&app, &guest, &hall.id, &method.id, "2030-08-01", "2030-08-02", Some("18:00")).await;
    let rejected = book(&app, &guest, &hall.id, &method.id, "2030-08-01", "2030-08-02", Some("18:00")).await;
    app.send("POST", &format!("/api/v1/admin/reviews/room/{}/reject", rejected), Some(&admin), Some(json!({"reason": "clash"}))).await;

    let (_, slot) = app.send("GET", "/api/v1/availability?date=2030-08-01&time=18:00", None, None).await;
    assert!(availability_of(&slot, &hall.id));

    let (_, range) = app.send("GET", "/api/v1/availability/range?check_in=2030-08-01&check_out=2030-08-02", None, None).await;
    assert!(availability_of(&range, &hall.id));
}

#[tokio::test]
async fn test_untimed_booking_only_shows_in_range_check() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let admin = app.login_admin().await;
    let hall = app.seed_venue("Hall A", 50, 1_000_000).await;
    let method = app.seed_payment_method("BCA", true).await;

    let id = book(&app, &guest, &hall.id, &method.id, "2030-08-01", "2030-08-04", None).await;
    app.send("POST", &format!("/api/v1/admin/reviews/room/{}/approve", id), Some(&admin), None).await;

    // The slot check matches on event time, which this booking lacks.
    let (_, slot) = app.send("GET", "/api/v1/availability?date=2030-08-02&time=10:00", None, None).await;
    assert!(availability_of(&slot, &hall.id));

    let (_, overlapping) = app.send("GET", "/api/v1/availability/range?check_in=2030-08-03&check_out=2030-08-06", None, None).await;
    assert!(!availability_of(&overlapping, &hall.id));
}

#[tokio::test]
async fn test_range_check_is_half_open() {
    let app = TestApp::new().await;
    let guest = app.login("guest-1", "guest@example.com").await;
    let admin = app.login_admin().await;
    let hall = app.seed_venue("Hall A", 50, 1_000_000).await;
    let method = app.seed_payment_method("BCA", true).await;

    let id = book(&app, &guest, &hall.id, &method.id, "2030-08-01", "2030-08-04", None).await;
    app.send("POST", &format!("/api/v1/admin/reviews/room/{}/approve", id), Some(&admin), None).await;

    let (_, after) = app.send("GET", "/api/v1/availability/range?check_in=2030-08-04&check_out=2030-08-06", None, None).await;
    assert!(availability_of(&after, &hall.id));

    let (_, before) = app.send("GET", "/api/v1/availability/range?check_in=2030-07-28&check_out=2030-08-01", None, None).await;
    assert!(availability_of(&before, &hall.id));

    let (_, last_night) = app.send("GET", "/api/v1/availability/range?check_in=2030-08-03&check_out=2030-08-03", None, None).await;
    assert!(!availability_of(&last_night, &hall.id));

    // Reversed input is put in order.
    let (_, reversed) = app.send("GET", "/api/v1/availability/range?check_in=2030-08-05&check_out=2030-07-30", None, None).await;
    assert!(!availability_of(&reversed, &hall.id));
}

#[tokio::test]
async fn test_availability_rejects_malformed_query() {
    let app = TestApp::new().await;
    app.seed_venue("Hall A", 50, 1_000_000).await;

    let (status, _) = app.send("GET", "/api/v1/availability?date=01-08-2030&time=18:00", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("GET", "/api/v1/availability?date=2030-08-01&time=6pm", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("GET", "/api/v1/availability?date=2030-08-01", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
