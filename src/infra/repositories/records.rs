//! Flat row shapes shared by the SQLite and PostgreSQL repositories.
//!
//! Snapshots and the payment proof are stored as prefixed columns on the
//! booking row; these records fold them back into the domain types.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

use crate::domain::models::{
    booking::{Booking, PaymentMethodSnapshot, StatusAggregate, VenueSnapshot},
    payment::PaymentProof,
    payment_method::PaymentMethod,
    service_booking::{ServiceBooking, ServiceSnapshot},
    user::User,
    venue::Venue,
};
use crate::error::AppError;

fn parse_column<T: FromStr<Err = String>>(column: &str, value: &str) -> Result<T, AppError> {
    value.parse().map_err(|e| AppError::InternalWithMsg(format!("Corrupt {} column: {}", column, e)))
}

fn parse_json_list(column: &str, value: &str) -> Result<Vec<String>, AppError> {
    serde_json::from_str(value).map_err(|e| AppError::InternalWithMsg(format!("Corrupt {} column: {}", column, e)))
}

pub fn to_json_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Booking columns for listing queries. `proof_data` is selected as NULL so a
/// listing never pulls the proof content off disk.
pub const BOOKING_LISTING_COLUMNS: &str = "id, user_id, user_email, venue_id, venue_name, venue_price, event_name, guests,
    check_in, check_out, event_time, nights, total_amount,
    payment_method_id, payment_method_name, payment_method_type, payment_account_number, payment_account_name,
    status, payment_status,
    proof_file_name, proof_file_size, proof_file_type, NULL AS proof_data, proof_uploaded_at, proof_status,
    rejection_reason, special_requests, created_at, approved_at, rejected_at, payment_verified_at";

pub const SERVICE_BOOKING_LISTING_COLUMNS: &str = "id, user_id, user_email, service_type, service_name, service_category, service_price,
    duration_min, service_date, service_time, guests, total_amount,
    payment_method_id, payment_method_name, payment_method_type, payment_account_number, payment_account_name,
    status, payment_status,
    proof_file_name, proof_file_size, proof_file_type, NULL AS proof_data, proof_uploaded_at, proof_status,
    rejection_reason, special_requests, created_at, approved_at, rejected_at, payment_verified_at";

/// Proof columns, all null until a proof is uploaded.
#[derive(Debug, FromRow)]
pub struct ProofColumns {
    pub proof_file_name: Option<String>,
    pub proof_file_size: Option<i64>,
    pub proof_file_type: Option<String>,
    pub proof_data: Option<String>,
    pub proof_uploaded_at: Option<DateTime<Utc>>,
    pub proof_status: Option<String>,
}

impl ProofColumns {
    fn into_proof(self) -> Result<Option<PaymentProof>, AppError> {
        let Some(uploaded_at) = self.proof_uploaded_at else {
            return Ok(None);
        };
        Ok(Some(PaymentProof {
            file_name: self.proof_file_name.unwrap_or_default(),
            file_size: self.proof_file_size.unwrap_or_default(),
            file_type: self.proof_file_type.unwrap_or_default(),
            data: self.proof_data.unwrap_or_default(),
            uploaded_at,
            status: parse_column("proof_status", self.proof_status.as_deref().unwrap_or("pending"))?,
        }))
    }
}

/// Payment method columns copied onto each booking row.
#[derive(Debug, FromRow)]
pub struct PaymentSnapshotColumns {
    pub payment_method_id: String,
    pub payment_method_name: String,
    pub payment_method_type: String,
    pub payment_account_number: String,
    pub payment_account_name: String,
}

impl From<PaymentSnapshotColumns> for PaymentMethodSnapshot {
    fn from(c: PaymentSnapshotColumns) -> Self {
        Self {
            id: c.payment_method_id,
            name: c.payment_method_name,
            method_type: c.payment_method_type,
            account_number: c.payment_account_number,
            account_name: c.payment_account_name,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct BookingRecord {
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    pub venue_id: String,
    pub venue_name: String,
    pub venue_price: i64,
    pub event_name: String,
    pub guests: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub nights: i64,
    pub total_amount: i64,
    #[sqlx(flatten)]
    pub payment_method: PaymentSnapshotColumns,
    pub status: String,
    pub payment_status: String,
    #[sqlx(flatten)]
    pub proof: ProofColumns,
    pub rejection_reason: Option<String>,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub payment_verified_at: Option<DateTime<Utc>>,
}

impl TryFrom<BookingRecord> for Booking {
    type Error = AppError;

    fn try_from(r: BookingRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_column("status", &r.status)?,
            payment_status: parse_column("payment_status", &r.payment_status)?,
            payment_proof: r.proof.into_proof()?,
            id: r.id,
            user_id: r.user_id,
            user_email: r.user_email,
            venue: VenueSnapshot { venue_id: r.venue_id, venue_name: r.venue_name, price: r.venue_price },
            event_name: r.event_name,
            guests: r.guests,
            check_in: r.check_in,
            check_out: r.check_out,
            event_time: r.event_time,
            nights: r.nights,
            total_amount: r.total_amount,
            payment_method: r.payment_method.into(),
            rejection_reason: r.rejection_reason,
            special_requests: r.special_requests,
            created_at: r.created_at,
            approved_at: r.approved_at,
            rejected_at: r.rejected_at,
            payment_verified_at: r.payment_verified_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct ServiceBookingRecord {
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    pub service_type: String,
    pub service_name: String,
    pub service_category: String,
    pub service_price: i64,
    pub duration_min: i32,
    pub service_date: NaiveDate,
    pub service_time: NaiveTime,
    pub guests: i32,
    pub total_amount: i64,
    #[sqlx(flatten)]
    pub payment_method: PaymentSnapshotColumns,
    pub status: String,
    pub payment_status: String,
    #[sqlx(flatten)]
    pub proof: ProofColumns,
    pub rejection_reason: Option<String>,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub payment_verified_at: Option<DateTime<Utc>>,
}

impl TryFrom<ServiceBookingRecord> for ServiceBooking {
    type Error = AppError;

    fn try_from(r: ServiceBookingRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_column("status", &r.status)?,
            payment_status: parse_column("payment_status", &r.payment_status)?,
            payment_proof: r.proof.into_proof()?,
            id: r.id,
            user_id: r.user_id,
            user_email: r.user_email,
            service: ServiceSnapshot {
                service_type: r.service_type,
                service_name: r.service_name,
                category: r.service_category,
                price: r.service_price,
                duration_min: r.duration_min,
            },
            service_date: r.service_date,
            service_time: r.service_time,
            guests: r.guests,
            total_amount: r.total_amount,
            payment_method: r.payment_method.into(),
            rejection_reason: r.rejection_reason,
            special_requests: r.special_requests,
            created_at: r.created_at,
            approved_at: r.approved_at,
            rejected_at: r.rejected_at,
            payment_verified_at: r.payment_verified_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct VenueRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub capacity: i32,
    pub price: i64,
    pub description: String,
    pub amenities_json: String,
    pub images_json: String,
    pub is_available: bool,
    pub rating: f64,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<VenueRecord> for Venue {
    type Error = AppError;

    fn try_from(r: VenueRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            amenities: parse_json_list("amenities_json", &r.amenities_json)?,
            images: parse_json_list("images_json", &r.images_json)?,
            id: r.id,
            name: r.name,
            category: r.category,
            capacity: r.capacity,
            price: r.price,
            description: r.description,
            is_available: r.is_available,
            rating: r.rating,
            review_count: r.review_count,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct PaymentMethodRecord {
    pub id: String,
    pub name: String,
    pub method_type: String,
    pub account_number: String,
    pub account_name: String,
    pub instructions: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PaymentMethodRecord> for PaymentMethod {
    type Error = AppError;

    fn try_from(r: PaymentMethodRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            method_type: parse_column("method_type", &r.method_type)?,
            id: r.id,
            name: r.name,
            account_number: r.account_number,
            account_name: r.account_name,
            instructions: r.instructions,
            is_active: r.is_active,
            created_at: r.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct UserRecord {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRecord> for User {
    type Error = AppError;

    fn try_from(r: UserRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            role: parse_column("role", &r.role)?,
            uid: r.uid,
            email: r.email,
            display_name: r.display_name,
            created_at: r.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct StatusAggregateRecord {
    pub status: String,
    pub payment_status: String,
    pub bookings: i64,
    pub total_amount: i64,
}

impl TryFrom<StatusAggregateRecord> for StatusAggregate {
    type Error = AppError;

    fn try_from(r: StatusAggregateRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_column("status", &r.status)?,
            payment_status: parse_column("payment_status", &r.payment_status)?,
            bookings: r.bookings,
            total_amount: r.total_amount,
        })
    }
}

/// Converts every row, failing on the first corrupt one.
pub fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, AppError>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(T::try_from).collect()
}
