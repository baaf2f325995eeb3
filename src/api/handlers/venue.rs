use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{CreateVenueRequest, UpdateVenueRequest};
use crate::domain::models::venue::{NewVenueParams, Venue};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn check_venue(venue: &Venue) -> Result<(), AppError> {
    if venue.name.trim().is_empty() {
        return Err(AppError::Validation("venue name is required".into()));
    }
    if venue.capacity < 1 {
        return Err(AppError::Validation("capacity must be at least 1".into()));
    }
    if venue.price < 0 {
        return Err(AppError::Validation("price must not be negative".into()));
    }
    Ok(())
}

pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let venues = state.venue_repo.list().await?;
    Ok(Json(venues))
}

pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let venue = state.venue_repo.find_by_id(&venue_id).await?
        .ok_or(AppError::NotFound("Venue not found".into()))?;
    Ok(Json(venue))
}

pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateVenueRequest>,
) -> Result<impl IntoResponse, AppError> {
    let venue = Venue::new(NewVenueParams {
        name: payload.name.trim().to_string(),
        category: payload.category,
        capacity: payload.capacity,
        price: payload.price,
        description: payload.description,
        amenities: payload.amenities,
        images: payload.images,
        is_available: payload.is_available.unwrap_or(true),
    });
    check_venue(&venue)?;

    let created = state.venue_repo.create(&venue).await?;
    info!("Venue created: {} ({}) by {}", created.name, created.id, admin.uid);
    Ok(Json(created))
}

pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(venue_id): Path<String>,
    Json(payload): Json<UpdateVenueRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut venue = state.venue_repo.find_by_id(&venue_id).await?
        .ok_or(AppError::NotFound("Venue not found".into()))?;

    if let Some(v) = payload.name { venue.name = v.trim().to_string(); }
    if let Some(v) = payload.category { venue.category = v; }
    if let Some(v) = payload.capacity { venue.capacity = v; }
    if let Some(v) = payload.price { venue.price = v; }
    if let Some(v) = payload.description { venue.description = v; }
    if let Some(v) = payload.amenities { venue.amenities = v; }
    if let Some(v) = payload.images { venue.images = v; }
    if let Some(v) = payload.is_available { venue.is_available = v; }
    check_venue(&venue)?;

    let updated = state.venue_repo.update(&venue).await?;
    info!("Venue updated: {} by {}", updated.id, admin.uid);
    Ok(Json(updated))
}

pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(venue_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.venue_repo.delete(&venue_id).await?;
    info!("Venue deleted: {} by {}", venue_id, admin.uid);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
