pub mod records;

pub mod sqlite_booking_repo;
pub mod sqlite_service_booking_repo;
pub mod sqlite_venue_repo;
pub mod sqlite_payment_method_repo;
pub mod sqlite_user_repo;

pub mod postgres_booking_repo;
pub mod postgres_service_booking_repo;
pub mod postgres_venue_repo;
pub mod postgres_payment_method_repo;
pub mod postgres_user_repo;
