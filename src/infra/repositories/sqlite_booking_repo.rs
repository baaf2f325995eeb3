use crate::domain::{
    models::{
        booking::{Booking, BookingStatus, PaymentUpdate, ReviewDecision, StatusAggregate},
        payment::PaymentStatus,
    },
    ports::BookingRepository,
};
use crate::error::AppError;
use crate::infra::repositories::records::{convert_all, BookingRecord, BOOKING_LISTING_COLUMNS, StatusAggregateRecord};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        let record = sqlx::query_as::<_, BookingRecord>(
            "INSERT INTO bookings (id, user_id, user_email, venue_id, venue_name, venue_price, event_name, guests,
                check_in, check_out, event_time, nights, total_amount,
                payment_method_id, payment_method_name, payment_method_type, payment_account_number, payment_account_name,
                status, payment_status, special_requests, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.user_id).bind(&booking.user_email)
            .bind(&booking.venue.venue_id).bind(&booking.venue.venue_name).bind(booking.venue.price)
            .bind(&booking.event_name).bind(booking.guests)
            .bind(booking.check_in).bind(booking.check_out).bind(booking.event_time)
            .bind(booking.nights).bind(booking.total_amount)
            .bind(&booking.payment_method.id).bind(&booking.payment_method.name).bind(&booking.payment_method.method_type)
            .bind(&booking.payment_method.account_number).bind(&booking.payment_method.account_name)
            .bind(booking.status.as_str()).bind(booking.payment_status.as_str())
            .bind(&booking.special_requests).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        record.try_into()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, BookingRecord>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .map(Booking::try_from)
            .transpose()
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        let rows = sqlx::query_as::<_, BookingRecord>(&format!("SELECT {BOOKING_LISTING_COLUMNS} FROM bookings WHERE user_id = ? ORDER BY created_at DESC"))
            .bind(user_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;
        convert_all(rows)
    }

    async fn list_all(&self, status: Option<BookingStatus>) -> Result<Vec<Booking>, AppError> {
        let rows = match status {
            Some(status) => sqlx::query_as::<_, BookingRecord>(&format!("SELECT {BOOKING_LISTING_COLUMNS} FROM bookings WHERE status = ? ORDER BY created_at DESC"))
                .bind(status.as_str())
                .fetch_all(&self.pool).await,
            None => sqlx::query_as::<_, BookingRecord>(&format!("SELECT {BOOKING_LISTING_COLUMNS} FROM bookings ORDER BY created_at DESC"))
                .fetch_all(&self.pool).await,
        }.map_err(AppError::Database)?;
        convert_all(rows)
    }

    async fn list_approved_at_slot(&self, date: NaiveDate, time: NaiveTime) -> Result<Vec<Booking>, AppError> {
        let rows = sqlx::query_as::<_, BookingRecord>(
            &format!("SELECT {BOOKING_LISTING_COLUMNS} FROM bookings WHERE check_in = ? AND event_time = ? AND status = 'approved'")
        )
            .bind(date).bind(time)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;
        convert_all(rows)
    }

    async fn list_approved_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Booking>, AppError> {
        // Either date may be the earlier one, so both columns are checked on each side.
        let rows = sqlx::query_as::<_, BookingRecord>(
            &format!("SELECT {BOOKING_LISTING_COLUMNS} FROM bookings
             WHERE status = 'approved'
               AND (check_in < ? OR check_out < ?)
               AND (check_in >= ? OR check_out >= ?)")
        )
            .bind(end).bind(end).bind(start).bind(start)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;
        convert_all(rows)
    }

    async fn apply_review(&self, id: &str, expected: BookingStatus, decision: &ReviewDecision) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, BookingRecord>(
            "UPDATE bookings SET status = ?, rejection_reason = ?, approved_at = ?, rejected_at = ?
             WHERE id = ? AND status = ?
             RETURNING *"
        )
            .bind(decision.status.as_str()).bind(&decision.rejection_reason)
            .bind(decision.approved_at()).bind(decision.rejected_at())
            .bind(id).bind(expected.as_str())
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .map(Booking::try_from)
            .transpose()
    }

    async fn update_payment(&self, id: &str, expected: PaymentStatus, update: &PaymentUpdate) -> Result<Option<Booking>, AppError> {
        let proof = update.proof.as_ref();
        sqlx::query_as::<_, BookingRecord>(
            "UPDATE bookings SET payment_status = ?,
                proof_file_name = ?, proof_file_size = ?, proof_file_type = ?, proof_data = ?, proof_uploaded_at = ?, proof_status = ?,
                payment_verified_at = ?
             WHERE id = ? AND payment_status = ? AND status != 'rejected'
             RETURNING *"
        )
            .bind(update.payment_status.as_str())
            .bind(proof.map(|p| p.file_name.clone())).bind(proof.map(|p| p.file_size))
            .bind(proof.map(|p| p.file_type.clone())).bind(proof.map(|p| p.data.clone()))
            .bind(proof.map(|p| p.uploaded_at)).bind(proof.map(|p| p.status.as_str()))
            .bind(update.verified_at)
            .bind(id).bind(expected.as_str())
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .map(Booking::try_from)
            .transpose()
    }

    async fn aggregate_by_status(&self) -> Result<Vec<StatusAggregate>, AppError> {
        let rows = sqlx::query_as::<_, StatusAggregateRecord>(
            "SELECT status, payment_status, COUNT(*) AS bookings, COALESCE(SUM(total_amount), 0) AS total_amount
             FROM bookings
             GROUP BY status, payment_status"
        )
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;
        convert_all(rows)
    }
}
