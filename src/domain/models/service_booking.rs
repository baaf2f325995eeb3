use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::domain::models::booking::{BookingStatus, PaymentMethodSnapshot, Reservation};
use crate::domain::models::payment::{PaymentProof, PaymentStatus};
use crate::domain::services::catalog::CatalogService;

/// Catalog entry copied into the booking at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSnapshot {
    pub service_type: String,
    pub service_name: String,
    pub category: String,
    pub price: i64,
    pub duration_min: i32,
}

impl From<&CatalogService> for ServiceSnapshot {
    fn from(entry: &CatalogService) -> Self {
        Self {
            service_type: entry.service_type.to_string(),
            service_name: entry.service_name.to_string(),
            category: entry.category.as_str().to_string(),
            price: entry.price,
            duration_min: entry.duration_min,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceBooking {
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    pub service: ServiceSnapshot,
    pub service_date: NaiveDate,
    pub service_time: NaiveTime,
    pub guests: i32,
    pub total_amount: i64,
    pub payment_method: PaymentMethodSnapshot,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_proof: Option<PaymentProof>,
    pub rejection_reason: Option<String>,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub payment_verified_at: Option<DateTime<Utc>>,
}

pub struct NewServiceBookingParams {
    pub user_id: String,
    pub user_email: String,
    pub service: ServiceSnapshot,
    pub payment_method: PaymentMethodSnapshot,
    pub service_date: NaiveDate,
    pub service_time: NaiveTime,
    pub guests: i32,
    pub total_amount: i64,
    pub special_requests: Option<String>,
}

impl ServiceBooking {
    pub fn new(params: NewServiceBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            user_email: params.user_email,
            service: params.service,
            service_date: params.service_date,
            service_time: params.service_time,
            guests: params.guests,
            total_amount: params.total_amount,
            payment_method: params.payment_method,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_proof: None,
            rejection_reason: None,
            special_requests: params.special_requests,
            created_at: Utc::now(),
            approved_at: None,
            rejected_at: None,
            payment_verified_at: None,
        }
    }
}

impl Reservation for ServiceBooking {
    fn owner_uid(&self) -> &str {
        &self.user_id
    }

    fn status(&self) -> BookingStatus {
        self.status
    }

    fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    fn payment_proof(&self) -> Option<&PaymentProof> {
        self.payment_proof.as_ref()
    }
}
