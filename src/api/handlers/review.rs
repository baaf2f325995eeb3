use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{RejectRequest, StatusFilter};
use crate::domain::models::booking::{BookingStatus, BookingType};
use crate::error::AppError;
use std::sync::Arc;

fn parse_status(filter: StatusFilter) -> Result<Option<BookingStatus>, AppError> {
    filter.status
        .filter(|s| !s.trim().is_empty() && s != "all")
        .map(|s| s.trim().parse().map_err(AppError::Validation))
        .transpose()
}

pub async fn list_all_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Query(filter): Query<StatusFilter>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.all_bookings(&actor, parse_status(filter)?).await?;
    Ok(Json(bookings))
}

pub async fn list_all_service_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Query(filter): Query<StatusFilter>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.all_service_bookings(&actor, parse_status(filter)?).await?;
    Ok(Json(bookings))
}

pub async fn approve(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path((kind, booking_id)): Path<(BookingType, String)>,
) -> Result<impl IntoResponse, AppError> {
    let reviewed = state.booking_service.approve(&actor, kind, &booking_id).await?;
    Ok(Json(reviewed))
}

pub async fn reject(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path((kind, booking_id)): Path<(BookingType, String)>,
    Json(payload): Json<RejectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reviewed = state.booking_service.reject(&actor, kind, &booking_id, &payload.reason).await?;
    Ok(Json(reviewed))
}

pub async fn verify_payment(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path((kind, booking_id)): Path<(BookingType, String)>,
) -> Result<impl IntoResponse, AppError> {
    let verified = state.booking_service.verify_payment(&actor, kind, &booking_id).await?;
    Ok(Json(verified))
}

pub async fn stats(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.booking_service.stats(&actor).await?;
    Ok(Json(stats))
}
