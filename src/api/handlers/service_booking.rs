use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::PaymentProofResponse;
use crate::domain::models::booking::BookingType;
use crate::domain::services::booking_service::{NewServiceBooking, ProofUpload};
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_service_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<NewServiceBooking>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.create_service_booking(&actor, payload).await?;
    Ok(Json(booking))
}

pub async fn list_my_service_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.my_service_bookings(&actor).await?;
    Ok(Json(bookings))
}

pub async fn get_service_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.get_service_booking(&actor, &booking_id).await?;
    Ok(Json(booking))
}

pub async fn upload_proof(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<ProofUpload>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.booking_service.upload_proof(&actor, BookingType::Service, &booking_id, payload).await?;
    Ok(Json(updated))
}

pub async fn get_proof(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let proof = state.booking_service.payment_proof(&actor, BookingType::Service, &booking_id).await?;
    Ok(Json(PaymentProofResponse::from(proof)))
}
