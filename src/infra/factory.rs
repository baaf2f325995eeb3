use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::state::{AppState, Repositories};
use crate::infra::identity::jwt_identity_provider::JwtIdentityProvider;
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_service_booking_repo::PostgresServiceBookingRepo,
    postgres_venue_repo::PostgresVenueRepo, postgres_payment_method_repo::PostgresPaymentMethodRepo,
    postgres_user_repo::PostgresUserRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_service_booking_repo::SqliteServiceBookingRepo,
    sqlite_venue_repo::SqliteVenueRepo, sqlite_payment_method_repo::SqlitePaymentMethodRepo,
    sqlite_user_repo::SqliteUserRepo,
};

pub fn is_postgres_url(database_url: &str) -> bool {
    database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let database_url = &config.database_url;
    let identity_provider = Arc::new(JwtIdentityProvider::new(
        &config.idp_public_key,
        &config.idp_issuer,
        &config.idp_audience,
    )?);

    let repos = if is_postgres_url(database_url) {
        info!("Initializing PostgreSQL connection...");

        let opts: PgConnectOptions = database_url.parse()
            .map_err(|e| AppError::InternalWithMsg(format!("Invalid Postgres URL: {}", e)))?;
        let opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(config.db_acquire_timeout)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;
        postgres_repositories(pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(config.db_acquire_timeout)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;
        sqlite_repositories(pool)
    };

    AppState::assemble(config.clone(), repos, identity_provider)
}

pub fn sqlite_repositories(pool: SqlitePool) -> Repositories {
    Repositories {
        users: Arc::new(SqliteUserRepo::new(pool.clone())),
        venues: Arc::new(SqliteVenueRepo::new(pool.clone())),
        payment_methods: Arc::new(SqlitePaymentMethodRepo::new(pool.clone())),
        bookings: Arc::new(SqliteBookingRepo::new(pool.clone())),
        service_bookings: Arc::new(SqliteServiceBookingRepo::new(pool)),
    }
}

pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        users: Arc::new(PostgresUserRepo::new(pool.clone())),
        venues: Arc::new(PostgresVenueRepo::new(pool.clone())),
        payment_methods: Arc::new(PostgresPaymentMethodRepo::new(pool.clone())),
        bookings: Arc::new(PostgresBookingRepo::new(pool.clone())),
        service_bookings: Arc::new(PostgresServiceBookingRepo::new(pool)),
    }
}

async fn run_postgres_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Postgres migrations failed: {}", e)))
}

async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("SQLite migrations failed: {}", e)))
}
