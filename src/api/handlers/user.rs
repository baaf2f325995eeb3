use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::UpdateRoleRequest;
use crate::domain::models::auth::UserProfile;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list().await?;
    Ok(Json(users))
}

/// Applies to the user's open sessions on their next request.
pub async fn update_role(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(uid): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if uid == admin.uid {
        return Err(AppError::Validation("admins cannot change their own role".into()));
    }
    let user = state.user_repo.update_role(&uid, payload.role).await?;
    info!("User {} role set to {} by {}", user.uid, user.role.as_str(), admin.uid);
    Ok(Json(UserProfile::from(user)))
}
