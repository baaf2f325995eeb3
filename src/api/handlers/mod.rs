pub mod auth;
pub mod availability;
pub mod booking;
pub mod catalog;
pub mod health;
pub mod payment_method;
pub mod review;
pub mod service_booking;
pub mod user;
pub mod venue;
