use axum::{extract::{State, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{RangeQuery, SlotQuery};
use crate::domain::services::booking_service::{parse_date, parse_time};
use crate::error::AppError;
use std::sync::Arc;

/// Venues marked against approved bookings at one exact date and time.
pub async fn check_slot(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SlotQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date("date", &query.date)?;
    let time = parse_time("time", &query.time)?;
    let venues = state.booking_service.check_availability(date, time).await?;
    Ok(Json(venues))
}

pub async fn check_range(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let check_in = parse_date("check_in", &query.check_in)?;
    let check_out = parse_date("check_out", &query.check_out)?;
    let venues = state.booking_service.check_range_availability(check_in, check_out).await?;
    Ok(Json(venues))
}
