pub mod auth;
pub mod booking;
pub mod payment;
pub mod payment_method;
pub mod service_booking;
pub mod user;
pub mod venue;
