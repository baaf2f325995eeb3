use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::payment::{PaymentEvent, PaymentProof, PaymentStatus};
use crate::domain::models::payment_method::PaymentMethod;
use crate::domain::models::venue::Venue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("booking is already {from}, it cannot be {}", review_verb(.action))]
    Review { from: BookingStatus, action: ReviewAction },
    #[error("payment is {from}, cannot apply {event:?}")]
    Payment { from: PaymentStatus, event: PaymentEvent },
}

fn review_verb(action: &ReviewAction) -> &'static str {
    match action {
        ReviewAction::Approve => "approved",
        ReviewAction::Reject => "rejected",
    }
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }

    /// Only pending bookings can be reviewed; approved and rejected are terminal.
    pub fn apply(self, action: ReviewAction) -> Result<BookingStatus, TransitionError> {
        match (self, action) {
            (BookingStatus::Pending, ReviewAction::Approve) => Ok(BookingStatus::Approved),
            (BookingStatus::Pending, ReviewAction::Reject) => Ok(BookingStatus::Rejected),
            (from, action) => Err(TransitionError::Review { from, action }),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Pending)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "approved" => Ok(BookingStatus::Approved),
            "rejected" => Ok(BookingStatus::Rejected),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}

/// Which collection a reviewed booking lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Room,
    Service,
}

/// Outcome of an admin review, handed to the repository as one conditional write.
#[derive(Debug, Clone)]
pub struct ReviewDecision {
    pub status: BookingStatus,
    pub rejection_reason: Option<String>,
    pub decided_at: DateTime<Utc>,
}

impl ReviewDecision {
    pub fn approved_at(&self) -> Option<DateTime<Utc>> {
        (self.status == BookingStatus::Approved).then_some(self.decided_at)
    }

    pub fn rejected_at(&self) -> Option<DateTime<Utc>> {
        (self.status == BookingStatus::Rejected).then_some(self.decided_at)
    }
}

/// Payment fields written together when a proof is uploaded or verified.
#[derive(Debug, Clone)]
pub struct PaymentUpdate {
    pub payment_status: PaymentStatus,
    pub proof: Option<PaymentProof>,
    pub verified_at: Option<DateTime<Utc>>,
}

/// Bookings sharing one `(status, payment_status)` pair, counted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusAggregate {
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub bookings: i64,
    pub total_amount: i64,
}

/// Fields shared by venue and service bookings that drive the lifecycle.
pub trait Reservation {
    fn owner_uid(&self) -> &str;
    fn status(&self) -> BookingStatus;
    fn payment_status(&self) -> PaymentStatus;
    fn payment_proof(&self) -> Option<&PaymentProof>;
}

/// Venue identity and price as the customer saw them when booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueSnapshot {
    pub venue_id: String,
    pub venue_name: String,
    pub price: i64,
}

impl From<&Venue> for VenueSnapshot {
    fn from(venue: &Venue) -> Self {
        Self {
            venue_id: venue.id.clone(),
            venue_name: venue.name.clone(),
            price: venue.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodSnapshot {
    pub id: String,
    pub name: String,
    pub method_type: String,
    pub account_number: String,
    pub account_name: String,
}

impl From<&PaymentMethod> for PaymentMethodSnapshot {
    fn from(method: &PaymentMethod) -> Self {
        Self {
            id: method.id.clone(),
            name: method.name.clone(),
            method_type: method.method_type.as_str().to_string(),
            account_number: method.account_number.clone(),
            account_name: method.account_name.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    pub venue: VenueSnapshot,
    pub event_name: String,
    pub guests: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub nights: i64,
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

pub struct NewBookingParams {
    pub user_id: String,
    pub user_email: String,
    pub venue: VenueSnapshot,
    pub payment_method: PaymentMethodSnapshot,
    pub event_name: String,
    pub guests: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub nights: i64,
    pub total_amount: i64,
    pub special_requests: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            user_email: params.user_email,
            venue: params.venue,
            event_name: params.event_name,
            guests: params.guests,
            check_in: params.check_in,
            check_out: params.check_out,
            event_time: params.event_time,
            nights: params.nights,
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

impl Reservation for Booking {
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
