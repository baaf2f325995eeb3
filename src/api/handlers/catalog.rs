use axum::{response::IntoResponse, Json};
use crate::domain::services::catalog::all_services;

pub async fn list_services() -> impl IntoResponse {
    Json(all_services())
}
