use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::models::{
    auth::SessionContext,
    booking::{
        Booking, BookingStatus, BookingType, NewBookingParams, PaymentMethodSnapshot, PaymentUpdate,
        Reservation, ReviewAction, ReviewDecision, StatusAggregate, VenueSnapshot,
    },
    payment::{PaymentEvent, PaymentProof, PaymentStatus},
    payment_method::PaymentMethod,
    service_booking::{NewServiceBookingParams, ServiceBooking, ServiceSnapshot},
    venue::VenueAvailability,
};
use crate::domain::ports::{BookingRepository, PaymentMethodRepository, ServiceBookingRepository, VenueRepository};
use crate::domain::services::{availability, catalog, pricing};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct NewVenueBooking {
    pub venue_id: Option<String>,
    pub payment_method_id: Option<String>,
    #[serde(default)]
    pub event_name: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub event_time: Option<String>,
    #[serde(default)]
    pub guests: i32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewServiceBooking {
    pub service_type: Option<String>,
    pub payment_method_id: Option<String>,
    pub service_date: Option<String>,
    pub service_time: Option<String>,
    #[serde(default)]
    pub guests: i32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProofUpload {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub data_base64: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(untagged)]
pub enum AnyBooking {
    Room(Booking),
    Service(ServiceBooking),
}

impl AnyBooking {
    pub fn id(&self) -> &str {
        match self {
            AnyBooking::Room(b) => &b.id,
            AnyBooking::Service(b) => &b.id,
        }
    }

    pub fn status(&self) -> BookingStatus {
        match self {
            AnyBooking::Room(b) => b.status,
            AnyBooking::Service(b) => b.status,
        }
    }
}

#[derive(Debug, Serialize, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total: usize,
}

impl StatusCounts {
    fn tally(rows: &[StatusAggregate]) -> Self {
        let mut counts = Self::default();
        for row in rows {
            let n = usize::try_from(row.bookings).unwrap_or_default();
            match row.status {
                BookingStatus::Pending => counts.pending += n,
                BookingStatus::Approved => counts.approved += n,
                BookingStatus::Rejected => counts.rejected += n,
            }
            counts.total += n;
        }
        counts
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub rooms: StatusCounts,
    pub services: StatusCounts,
    pub awaiting_verification: usize,
    pub approved_revenue: i64,
}

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{} must be a date (YYYY-MM-DD)", field)))
}

pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime, AppError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("{} must be a time (HH:MM)", field)))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required_date(field: &str, value: &Option<String>) -> Result<NaiveDate, AppError> {
    let raw = present(value).ok_or_else(|| AppError::Validation(format!("{} is required", field)))?;
    parse_date(field, raw)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn not_found(kind: BookingType) -> AppError {
    match kind {
        BookingType::Room => AppError::NotFound("Booking not found".into()),
        BookingType::Service => AppError::NotFound("Service booking not found".into()),
    }
}

fn concurrent_change(id: &str) -> AppError {
    AppError::Conflict(format!("Booking {} changed while it was being updated, reload and retry", id))
}

fn decide(current: BookingStatus, action: ReviewAction, rejection_reason: Option<String>) -> Result<ReviewDecision, AppError> {
    let status = current.apply(action)?;
    Ok(ReviewDecision { status, rejection_reason, decided_at: Utc::now() })
}

fn plan_upload(actor: &SessionContext, current: &impl Reservation, proof: PaymentProof) -> Result<PaymentUpdate, AppError> {
    if !actor.can_access(current.owner_uid()) {
        return Err(AppError::Forbidden("Not your booking".into()));
    }
    if current.status() == BookingStatus::Rejected {
        return Err(AppError::Conflict("Cannot attach payment proof to a rejected booking".into()));
    }
    let payment_status = current.payment_status().apply(PaymentEvent::ProofUploaded)?;
    Ok(PaymentUpdate { payment_status, proof: Some(proof), verified_at: None })
}

fn plan_verification(current: &impl Reservation) -> Result<PaymentUpdate, AppError> {
    if current.status() == BookingStatus::Rejected {
        return Err(AppError::Conflict("Cannot verify payment of a rejected booking".into()));
    }
    let payment_status = current.payment_status().apply(PaymentEvent::Verified)?;
    let proof = current.payment_proof()
        .cloned()
        .ok_or_else(|| AppError::Conflict("No payment proof to verify".into()))?
        .verified();
    Ok(PaymentUpdate { payment_status, proof: Some(proof), verified_at: Some(Utc::now()) })
}

/// Creation, review and payment workflow for venue and service bookings.
///
/// Every operation receives the acting user explicitly. Writes are single
/// conditional statements; nothing here holds locks across calls, and
/// creation does not check for overlapping bookings.
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    service_bookings: Arc<dyn ServiceBookingRepository>,
    venues: Arc<dyn VenueRepository>,
    payment_methods: Arc<dyn PaymentMethodRepository>,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        service_bookings: Arc<dyn ServiceBookingRepository>,
        venues: Arc<dyn VenueRepository>,
        payment_methods: Arc<dyn PaymentMethodRepository>,
    ) -> Self {
        Self { bookings, service_bookings, venues, payment_methods }
    }

    async fn active_payment_method(&self, id: &str) -> Result<PaymentMethod, AppError> {
        match self.payment_methods.find_by_id(id).await? {
            Some(method) if method.is_active => Ok(method),
            _ => Err(AppError::Validation("payment method is not active".into())),
        }
    }

    pub async fn create_venue_booking(&self, actor: &SessionContext, input: NewVenueBooking) -> Result<Booking, AppError> {
        let venue_id = present(&input.venue_id)
            .ok_or_else(|| AppError::Validation("no venue selected".into()))?;
        let payment_method_id = present(&input.payment_method_id)
            .ok_or_else(|| AppError::Validation("no payment method".into()))?;

        let venue = self.venues.find_by_id(venue_id).await?
            .ok_or_else(|| AppError::NotFound("Venue not found".into()))?;
        if !venue.is_available {
            return Err(AppError::Validation("venue is not open for booking".into()));
        }
        let method = self.active_payment_method(payment_method_id).await?;

        let event_name = input.event_name.trim().to_string();
        if event_name.is_empty() {
            return Err(AppError::Validation("event name is required".into()));
        }
        let check_in = required_date("check_in", &input.check_in)?;
        let check_out = required_date("check_out", &input.check_out)?;
        let event_time = present(&input.event_time)
            .map(|t| parse_time("event_time", t))
            .transpose()?;
        if !(1..=venue.capacity).contains(&input.guests) {
            return Err(AppError::Validation(format!("guests must be between 1 and {}", venue.capacity)));
        }

        let nights = pricing::nights_between(check_in, check_out);
        if check_out < check_in {
            warn!("Venue booking for {} has check_out before check_in, counting {} nights", venue.id, nights);
        }
        let total_amount = pricing::venue_total(venue.price, nights)?;

        let booking = Booking::new(NewBookingParams {
            user_id: actor.uid.clone(),
            user_email: actor.email.clone(),
            venue: VenueSnapshot::from(&venue),
            payment_method: PaymentMethodSnapshot::from(&method),
            event_name,
            guests: input.guests,
            check_in,
            check_out,
            event_time,
            nights,
            total_amount,
            special_requests: non_blank(input.special_requests),
        });

        let created = self.bookings.create(&booking).await?;
        info!("Venue booking created: {} for venue {} by {}", created.id, created.venue.venue_id, actor.uid);
        Ok(created)
    }

    pub async fn create_service_booking(&self, actor: &SessionContext, input: NewServiceBooking) -> Result<ServiceBooking, AppError> {
        let service_type = present(&input.service_type)
            .ok_or_else(|| AppError::Validation("no service selected".into()))?;
        let payment_method_id = present(&input.payment_method_id)
            .ok_or_else(|| AppError::Validation("no payment method".into()))?;

        let entry = catalog::find_service(service_type)
            .ok_or_else(|| AppError::Validation(format!("unknown service '{}'", service_type)))?;
        let method = self.active_payment_method(payment_method_id).await?;

        let service_date = required_date("service_date", &input.service_date)?;
        let service_time = present(&input.service_time)
            .ok_or_else(|| AppError::Validation("service_time is required".into()))
            .and_then(|t| parse_time("service_time", t))?;
        if !(1..=catalog::MAX_SERVICE_GUESTS).contains(&input.guests) {
            return Err(AppError::Validation(format!("guests must be between 1 and {}", catalog::MAX_SERVICE_GUESTS)));
        }
        let total_amount = pricing::service_total(entry.price, input.guests)?;

        let booking = ServiceBooking::new(NewServiceBookingParams {
            user_id: actor.uid.clone(),
            user_email: actor.email.clone(),
            service: ServiceSnapshot::from(entry),
            payment_method: PaymentMethodSnapshot::from(&method),
            service_date,
            service_time,
            guests: input.guests,
            total_amount,
            special_requests: non_blank(input.special_requests),
        });

        let created = self.service_bookings.create(&booking).await?;
        info!("Service booking created: {} ({}) by {}", created.id, created.service.service_type, actor.uid);
        Ok(created)
    }

    pub async fn approve(&self, actor: &SessionContext, kind: BookingType, id: &str) -> Result<AnyBooking, AppError> {
        actor.require_admin()?;
        self.review(actor, kind, id, ReviewAction::Approve, None).await
    }

    pub async fn reject(&self, actor: &SessionContext, kind: BookingType, id: &str, reason: &str) -> Result<AnyBooking, AppError> {
        actor.require_admin()?;
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::Validation("rejection reason is required".into()));
        }
        self.review(actor, kind, id, ReviewAction::Reject, Some(reason.to_string())).await
    }

    async fn review(
        &self,
        actor: &SessionContext,
        kind: BookingType,
        id: &str,
        action: ReviewAction,
        reason: Option<String>,
    ) -> Result<AnyBooking, AppError> {
        let reviewed = match kind {
            BookingType::Room => {
                let current = self.bookings.find_by_id(id).await?.ok_or_else(|| not_found(kind))?;
                let decision = decide(current.status, action, reason)?;
                let updated = self.bookings.apply_review(id, current.status, &decision).await?
                    .ok_or_else(|| concurrent_change(id))?;
                AnyBooking::Room(updated)
            }
            BookingType::Service => {
                let current = self.service_bookings.find_by_id(id).await?.ok_or_else(|| not_found(kind))?;
                let decision = decide(current.status, action, reason)?;
                let updated = self.service_bookings.apply_review(id, current.status, &decision).await?
                    .ok_or_else(|| concurrent_change(id))?;
                AnyBooking::Service(updated)
            }
        };

        info!("Booking {} ({:?}) is now {} (by {})", reviewed.id(), kind, reviewed.status(), actor.uid);
        Ok(reviewed)
    }

    pub async fn upload_proof(&self, actor: &SessionContext, kind: BookingType, id: &str, upload: ProofUpload) -> Result<AnyBooking, AppError> {
        let proof = PaymentProof::from_base64(&upload.file_name, &upload.file_type, &upload.data_base64)
            .inspect_err(|e| warn!("Payment proof refused for {}: {}", id, e))?;

        let updated = match kind {
            BookingType::Room => {
                let current = self.bookings.find_by_id(id).await?.ok_or_else(|| not_found(kind))?;
                let update = plan_upload(actor, &current, proof)?;
                AnyBooking::Room(self.bookings.update_payment(id, current.payment_status, &update).await?
                    .ok_or_else(|| concurrent_change(id))?)
            }
            BookingType::Service => {
                let current = self.service_bookings.find_by_id(id).await?.ok_or_else(|| not_found(kind))?;
                let update = plan_upload(actor, &current, proof)?;
                AnyBooking::Service(self.service_bookings.update_payment(id, current.payment_status, &update).await?
                    .ok_or_else(|| concurrent_change(id))?)
            }
        };

        info!("Payment proof uploaded for booking {} by {}", id, actor.uid);
        Ok(updated)
    }

    pub async fn verify_payment(&self, actor: &SessionContext, kind: BookingType, id: &str) -> Result<AnyBooking, AppError> {
        actor.require_admin()?;

        let updated = match kind {
            BookingType::Room => {
                let current = self.bookings.find_by_id(id).await?.ok_or_else(|| not_found(kind))?;
                let update = plan_verification(&current)?;
                AnyBooking::Room(self.bookings.update_payment(id, current.payment_status, &update).await?
                    .ok_or_else(|| concurrent_change(id))?)
            }
            BookingType::Service => {
                let current = self.service_bookings.find_by_id(id).await?.ok_or_else(|| not_found(kind))?;
                let update = plan_verification(&current)?;
                AnyBooking::Service(self.service_bookings.update_payment(id, current.payment_status, &update).await?
                    .ok_or_else(|| concurrent_change(id))?)
            }
        };

        info!("Payment verified for booking {} by {}", id, actor.uid);
        Ok(updated)
    }

    pub async fn payment_proof(&self, actor: &SessionContext, kind: BookingType, id: &str) -> Result<PaymentProof, AppError> {
        let proof = match kind {
            BookingType::Room => {
                let current = self.bookings.find_by_id(id).await?.ok_or_else(|| not_found(kind))?;
                if !actor.can_access(&current.user_id) {
                    return Err(AppError::Forbidden("Not your booking".into()));
                }
                current.payment_proof
            }
            BookingType::Service => {
                let current = self.service_bookings.find_by_id(id).await?.ok_or_else(|| not_found(kind))?;
                if !actor.can_access(&current.user_id) {
                    return Err(AppError::Forbidden("Not your booking".into()));
                }
                current.payment_proof
            }
        };
        proof.ok_or_else(|| AppError::NotFound("No payment proof uploaded".into()))
    }

    pub async fn get_booking(&self, actor: &SessionContext, id: &str) -> Result<Booking, AppError> {
        let booking = self.bookings.find_by_id(id).await?.ok_or_else(|| not_found(BookingType::Room))?;
        if !actor.can_access(&booking.user_id) {
            return Err(AppError::Forbidden("Not your booking".into()));
        }
        Ok(booking)
    }

    pub async fn get_service_booking(&self, actor: &SessionContext, id: &str) -> Result<ServiceBooking, AppError> {
        let booking = self.service_bookings.find_by_id(id).await?.ok_or_else(|| not_found(BookingType::Service))?;
        if !actor.can_access(&booking.user_id) {
            return Err(AppError::Forbidden("Not your booking".into()));
        }
        Ok(booking)
    }

    pub async fn my_bookings(&self, actor: &SessionContext) -> Result<Vec<Booking>, AppError> {
        self.bookings.list_by_user(&actor.uid).await
    }

    pub async fn my_service_bookings(&self, actor: &SessionContext) -> Result<Vec<ServiceBooking>, AppError> {
        self.service_bookings.list_by_user(&actor.uid).await
    }

    pub async fn all_bookings(&self, actor: &SessionContext, status: Option<BookingStatus>) -> Result<Vec<Booking>, AppError> {
        actor.require_admin()?;
        self.bookings.list_all(status).await
    }

    pub async fn all_service_bookings(&self, actor: &SessionContext, status: Option<BookingStatus>) -> Result<Vec<ServiceBooking>, AppError> {
        actor.require_admin()?;
        self.service_bookings.list_all(status).await
    }

    /// Venues taken by an approved booking at exactly `(date, time)`.
    pub async fn check_availability(&self, date: NaiveDate, time: NaiveTime) -> Result<Vec<VenueAvailability>, AppError> {
        let approved = self.bookings.list_approved_at_slot(date, time).await?;
        let booked = availability::booked_at_slot(&approved, date, time);
        let venues = self.venues.list().await?;
        Ok(availability::mark_availability(venues, &booked))
    }

    /// Venues with an approved booking overlapping `[check_in, check_out)`.
    pub async fn check_range_availability(&self, check_in: NaiveDate, check_out: NaiveDate) -> Result<Vec<VenueAvailability>, AppError> {
        let (start, end) = availability::normalize_range(check_in, check_out);
        let candidates = self.bookings.list_approved_between(start, end).await?;
        let booked = availability::booked_in_range(&candidates, start, end);
        let venues = self.venues.list().await?;
        Ok(availability::mark_availability(venues, &booked))
    }

    /// Counted by the store, so no booking rows are loaded.
    pub async fn stats(&self, actor: &SessionContext) -> Result<DashboardStats, AppError> {
        actor.require_admin()?;
        let rooms = self.bookings.aggregate_by_status().await?;
        let services = self.service_bookings.aggregate_by_status().await?;

        let awaiting_verification: usize = rooms.iter().chain(&services)
            .filter(|a| a.payment_status == PaymentStatus::ProofUploaded)
            .map(|a| usize::try_from(a.bookings).unwrap_or_default())
            .sum();

        let approved_revenue: i64 = rooms.iter().chain(&services)
            .filter(|a| a.status == BookingStatus::Approved)
            .map(|a| a.total_amount)
            .sum();

        Ok(DashboardStats {
            rooms: StatusCounts::tally(&rooms),
            services: StatusCounts::tally(&services),
            awaiting_verification,
            approved_revenue,
        })
    }
}
