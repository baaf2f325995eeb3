use std::sync::Arc;
use crate::domain::ports::{
    BookingRepository, IdentityProvider, PaymentMethodRepository, ServiceBookingRepository,
    UserRepository, VenueRepository,
};
use crate::domain::services::{auth_service::AuthService, booking_service::BookingService};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub venue_repo: Arc<dyn VenueRepository>,
    pub payment_method_repo: Arc<dyn PaymentMethodRepository>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub auth_service: Arc<AuthService>,
    pub booking_service: Arc<BookingService>,
}

pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub venues: Arc<dyn VenueRepository>,
    pub payment_methods: Arc<dyn PaymentMethodRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub service_bookings: Arc<dyn ServiceBookingRepository>,
}

impl AppState {
    /// Wires the services over one set of repositories.
    pub fn assemble(
        config: Config,
        repos: Repositories,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Result<Self, crate::error::AppError> {
        let auth_service = Arc::new(AuthService::new(repos.users.clone(), config.clone())?);
        let booking_service = Arc::new(BookingService::new(
            repos.bookings,
            repos.service_bookings,
            repos.venues.clone(),
            repos.payment_methods.clone(),
        ));

        Ok(Self {
            config,
            user_repo: repos.users,
            venue_repo: repos.venues,
            payment_method_repo: repos.payment_methods,
            identity_provider,
            auth_service,
            booking_service,
        })
    }
}
