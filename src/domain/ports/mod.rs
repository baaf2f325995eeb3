use crate::domain::models::{
    auth::Identity,
    booking::{Booking, BookingStatus, PaymentUpdate, ReviewDecision, StatusAggregate},
    payment::PaymentStatus,
    payment_method::PaymentMethod,
    service_booking::ServiceBooking,
    user::{Role, User},
    venue::Venue,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// Newest first. Listings carry proof metadata but not the proof content;
    /// `find_by_id` returns the full row.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    /// Newest first, optionally narrowed to one status.
    async fn list_all(&self, status: Option<BookingStatus>) -> Result<Vec<Booking>, AppError>;
    async fn list_approved_at_slot(&self, date: NaiveDate, time: NaiveTime) -> Result<Vec<Booking>, AppError>;
    async fn list_approved_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Booking>, AppError>;
    /// Applies the decision only while the booking is still in `expected`.
    /// Returns `None` when no row matched.
    async fn apply_review(&self, id: &str, expected: BookingStatus, decision: &ReviewDecision) -> Result<Option<Booking>, AppError>;
    /// Writes payment fields while the payment is still in `expected` and the
    /// booking has not been rejected. Returns `None` when no row matched.
    async fn update_payment(&self, id: &str, expected: PaymentStatus, update: &PaymentUpdate) -> Result<Option<Booking>, AppError>;
    async fn aggregate_by_status(&self) -> Result<Vec<StatusAggregate>, AppError>;
}

#[async_trait]
pub trait ServiceBookingRepository: Send + Sync {
    async fn create(&self, booking: &ServiceBooking) -> Result<ServiceBooking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ServiceBooking>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<ServiceBooking>, AppError>;
    async fn list_all(&self, status: Option<BookingStatus>) -> Result<Vec<ServiceBooking>, AppError>;
    async fn apply_review(&self, id: &str, expected: BookingStatus, decision: &ReviewDecision) -> Result<Option<ServiceBooking>, AppError>;
    async fn update_payment(&self, id: &str, expected: PaymentStatus, update: &PaymentUpdate) -> Result<Option<ServiceBooking>, AppError>;
    async fn aggregate_by_status(&self) -> Result<Vec<StatusAggregate>, AppError>;
}

#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn create(&self, venue: &Venue) -> Result<Venue, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Venue>, AppError>;
    async fn list(&self) -> Result<Vec<Venue>, AppError>;
    async fn update(&self, venue: &Venue) -> Result<Venue, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PaymentMethodRepository: Send + Sync {
    async fn create(&self, method: &PaymentMethod) -> Result<PaymentMethod, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<PaymentMethod>, AppError>;
    async fn list(&self, active_only: bool) -> Result<Vec<PaymentMethod>, AppError>;
    async fn update(&self, method: &PaymentMethod) -> Result<PaymentMethod, AppError>;
    async fn set_active(&self, id: &str, is_active: bool) -> Result<PaymentMethod, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, uid: &str) -> Result<Option<User>, AppError>;
    /// Inserts the user unless the uid already exists, then returns the stored row.
    async fn create_if_absent(&self, user: &User) -> Result<User, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn update_role(&self, uid: &str, role: Role) -> Result<User, AppError>;
}

/// External authentication service. Verifies an ID token it issued.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<Identity, AppError>;
}
