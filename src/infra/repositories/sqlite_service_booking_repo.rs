use crate::domain::{
    models::{
        booking::{BookingStatus, PaymentUpdate, ReviewDecision, StatusAggregate},
        payment::PaymentStatus,
        service_booking::ServiceBooking,
    },
    ports::ServiceBookingRepository,
};
use crate::error::AppError;
use crate::infra::repositories::records::{convert_all, ServiceBookingRecord, SERVICE_BOOKING_LISTING_COLUMNS, StatusAggregateRecord};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteServiceBookingRepo {
    pool: SqlitePool,
}

impl SqliteServiceBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceBookingRepository for SqliteServiceBookingRepo {
    async fn create(&self, booking: &ServiceBooking) -> Result<ServiceBooking, AppError> {
        let record = sqlx::query_as::<_, ServiceBookingRecord>(
            "INSERT INTO service_bookings (id, user_id, user_email, service_type, service_name, service_category, service_price,
                duration_min, service_date, service_time, guests, total_amount,
                payment_method_id, payment_method_name, payment_method_type, payment_account_number, payment_account_name,
                status, payment_status, special_requests, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.user_id).bind(&booking.user_email)
            .bind(&booking.service.service_type).bind(&booking.service.service_name)
            .bind(&booking.service.category).bind(booking.service.price).bind(booking.service.duration_min)
            .bind(booking.service_date).bind(booking.service_time)
            .bind(booking.guests).bind(booking.total_amount)
            .bind(&booking.payment_method.id).bind(&booking.payment_method.name).bind(&booking.payment_method.method_type)
            .bind(&booking.payment_method.account_number).bind(&booking.payment_method.account_name)
            .bind(booking.status.as_str()).bind(booking.payment_status.as_str())
            .bind(&booking.special_requests).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        record.try_into()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ServiceBooking>, AppError> {
        sqlx::query_as::<_, ServiceBookingRecord>("SELECT * FROM service_bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .map(ServiceBooking::try_from)
            .transpose()
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<ServiceBooking>, AppError> {
        let rows = sqlx::query_as::<_, ServiceBookingRecord>(
            &format!("SELECT {SERVICE_BOOKING_LISTING_COLUMNS} FROM service_bookings WHERE user_id = ? ORDER BY created_at DESC")
        )
            .bind(user_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;
        convert_all(rows)
    }

    async fn list_all(&self, status: Option<BookingStatus>) -> Result<Vec<ServiceBooking>, AppError> {
        let rows = match status {
            Some(status) => sqlx::query_as::<_, ServiceBookingRecord>(
                &format!("SELECT {SERVICE_BOOKING_LISTING_COLUMNS} FROM service_bookings WHERE status = ? ORDER BY created_at DESC")
            )
                .bind(status.as_str())
                .fetch_all(&self.pool).await,
            None => sqlx::query_as::<_, ServiceBookingRecord>(&format!("SELECT {SERVICE_BOOKING_LISTING_COLUMNS} FROM service_bookings ORDER BY created_at DESC"))
                .fetch_all(&self.pool).await,
        }.map_err(AppError::Database)?;
        convert_all(rows)
    }

    async fn apply_review(&self, id: &str, expected: BookingStatus, decision: &ReviewDecision) -> Result<Option<ServiceBooking>, AppError> {
        sqlx::query_as::<_, ServiceBookingRecord>(
            "UPDATE service_bookings SET status = ?, rejection_reason = ?, approved_at = ?, rejected_at = ?
             WHERE id = ? AND status = ?
             RETURNING *"
        )
            .bind(decision.status.as_str()).bind(&decision.rejection_reason)
            .bind(decision.approved_at()).bind(decision.rejected_at())
            .bind(id).bind(expected.as_str())
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .map(ServiceBooking::try_from)
            .transpose()
    }

    async fn update_payment(&self, id: &str, expected: PaymentStatus, update: &PaymentUpdate) -> Result<Option<ServiceBooking>, AppError> {
        let proof = update.proof.as_ref();
        sqlx::query_as::<_, ServiceBookingRecord>(
            "UPDATE service_bookings SET payment_status = ?,
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
            .map(ServiceBooking::try_from)
            .transpose()
    }

    async fn aggregate_by_status(&self) -> Result<Vec<StatusAggregate>, AppError> {
        let rows = sqlx::query_as::<_, StatusAggregateRecord>(
            "SELECT status, payment_status, COUNT(*) AS bookings, COALESCE(SUM(total_amount), 0) AS total_amount
             FROM service_bookings
             GROUP BY status, payment_status"
        )
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;
        convert_all(rows)
    }
}
