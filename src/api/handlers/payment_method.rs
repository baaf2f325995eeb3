use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{CreatePaymentMethodRequest, UpdatePaymentMethodRequest};
use crate::domain::models::payment_method::{PaymentMethod, PaymentMethodType};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn parse_method_type(raw: &str) -> Result<PaymentMethodType, AppError> {
    raw.trim().to_lowercase().parse().map_err(AppError::Validation)
}

fn required(field: &str, value: String) -> Result<String, AppError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(value)
}

/// Active methods only; what customers pick from at checkout.
pub async fn list_active_methods(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let methods = state.payment_method_repo.list(true).await?;
    Ok(Json(methods))
}

pub async fn list_all_methods(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let methods = state.payment_method_repo.list(false).await?;
    Ok(Json(methods))
}

pub async fn create_method(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreatePaymentMethodRequest>,
) -> Result<impl IntoResponse, AppError> {
    let method = PaymentMethod::new(
        required("name", payload.name)?,
        parse_method_type(&payload.method_type)?,
        required("account_number", payload.account_number)?,
        required("account_name", payload.account_name)?,
        payload.instructions,
    );
    let created = state.payment_method_repo.create(&method).await?;
    info!("Payment method created: {} by {}", created.id, admin.uid);
    Ok(Json(created))
}

pub async fn update_method(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(method_id): Path<String>,
    Json(payload): Json<UpdatePaymentMethodRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut method = state.payment_method_repo.find_by_id(&method_id).await?
        .ok_or(AppError::NotFound("Payment method not found".into()))?;

    if let Some(v) = payload.name { method.name = required("name", v)?; }
    if let Some(v) = payload.method_type { method.method_type = parse_method_type(&v)?; }
    if let Some(v) = payload.account_number { method.account_number = required("account_number", v)?; }
    if let Some(v) = payload.account_name { method.account_name = required("account_name", v)?; }
    if let Some(v) = payload.instructions { method.instructions = Some(v); }
    if let Some(v) = payload.is_active { method.is_active = v; }

    let updated = state.payment_method_repo.update(&method).await?;
    info!("Payment method updated: {} by {}", updated.id, admin.uid);
    Ok(Json(updated))
}

pub async fn toggle_method(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(method_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let method = state.payment_method_repo.find_by_id(&method_id).await?
        .ok_or(AppError::NotFound("Payment method not found".into()))?;
    let toggled = state.payment_method_repo.set_active(&method_id, !method.is_active).await?;
    info!("Payment method {} is_active={} by {}", toggled.id, toggled.is_active, admin.uid);
    Ok(Json(toggled))
}

pub async fn delete_method(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(method_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.payment_method_repo.delete(&method_id).await?;
    info!("Payment method deleted: {} by {}", method_id, admin.uid);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
