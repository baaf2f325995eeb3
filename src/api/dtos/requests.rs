use crate::domain::models::user::Role;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    pub category: String,
    pub capacity: i32,
    pub price: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub is_available: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub capacity: Option<i32>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreatePaymentMethodRequest {
    pub name: String,
    pub method_type: String,
    pub account_number: String,
    pub account_name: String,
    pub instructions: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePaymentMethodRequest {
    pub name: Option<String>,
    pub method_type: Option<String>,
    pub account_number: Option<String>,
    pub account_name: Option<String>,
    pub instructions: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[derive(Deserialize)]
pub struct SlotQuery {
    pub date: String,
    pub time: String,
}

#[derive(Deserialize)]
pub struct RangeQuery {
    pub check_in: String,
    pub check_out: String,
}

#[derive(Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}
