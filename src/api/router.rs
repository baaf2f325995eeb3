use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Request},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{
    auth, availability, booking, catalog, health, payment_method, review, service_booking, user, venue,
};
use tower_http::{
    trace::TraceLayer,
    timeout::TimeoutLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

/// Base64 proofs of up to 5 MiB grow by a third on the wire.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let request_timeout = state.config.request_timeout;

    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/session", post(auth::create_session))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/me", get(auth::me))

        // Public catalog
        .route("/api/v1/venues", get(venue::list_venues))
        .route("/api/v1/venues/{venue_id}", get(venue::get_venue))
        .route("/api/v1/availability", get(availability::check_slot))
        .route("/api/v1/availability/range", get(availability::check_range))
        .route("/api/v1/services", get(catalog::list_services))
        .route("/api/v1/payment-methods", get(payment_method::list_active_methods))

        // Customer bookings
        .route("/api/v1/bookings", post(booking::create_booking).get(booking::list_my_bookings))
        .route("/api/v1/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/bookings/{booking_id}/payment-proof", post(booking::upload_proof).get(booking::get_proof))
        .route("/api/v1/service-bookings", post(service_booking::create_service_booking).get(service_booking::list_my_service_bookings))
        .route("/api/v1/service-bookings/{booking_id}", get(service_booking::get_service_booking))
        .route("/api/v1/service-bookings/{booking_id}/payment-proof", post(service_booking::upload_proof).get(service_booking::get_proof))

        // Admin review
        .route("/api/v1/admin/bookings", get(review::list_all_bookings))
        .route("/api/v1/admin/service-bookings", get(review::list_all_service_bookings))
        .route("/api/v1/admin/reviews/{booking_type}/{booking_id}/approve", post(review::approve))
        .route("/api/v1/admin/reviews/{booking_type}/{booking_id}/reject", post(review::reject))
        .route("/api/v1/admin/reviews/{booking_type}/{booking_id}/verify-payment", post(review::verify_payment))
        .route("/api/v1/admin/stats", get(review::stats))

        // Admin catalog
        .route("/api/v1/admin/venues", post(venue::create_venue))
        .route("/api/v1/admin/venues/{venue_id}", put(venue::update_venue).delete(venue::delete_venue))
        .route("/api/v1/admin/payment-methods", get(payment_method::list_all_methods).post(payment_method::create_method))
        .route("/api/v1/admin/payment-methods/{method_id}", put(payment_method::update_method).delete(payment_method::delete_method))
        .route("/api/v1/admin/payment-methods/{method_id}/toggle", post(payment_method::toggle_method))

        // Admin users
        .route("/api/v1/admin/users", get(user::list_users))
        .route("/api/v1/admin/users/{uid}/role", put(user::update_role))

        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                        role = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
