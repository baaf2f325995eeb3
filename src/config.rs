use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not valid: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub session_signing_key: String, // Ed25519 private key (PEM)
    pub session_verify_key: String,  // Ed25519 public key (PEM)
    pub session_issuer: String,
    pub session_ttl_minutes: i64,
    pub idp_public_key: String,
    pub idp_issuer: String,
    pub idp_audience: String,
    /// Lowercased. Matching users get the admin role on first sign-in.
    pub admin_emails: Vec<String>,
    pub request_timeout: Duration,
    pub db_acquire_timeout: Duration,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

pub fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: parsed("PORT", 3000)?,
            session_signing_key: required("SESSION_SIGNING_KEY")?,
            session_verify_key: required("SESSION_VERIFY_KEY")?,
            session_issuer: env::var("SESSION_ISSUER").unwrap_or_else(|_| "https://api.reservations.local".to_string()),
            session_ttl_minutes: parsed("SESSION_TTL_MINUTES", 720)?,
            idp_public_key: required("IDP_PUBLIC_KEY")?,
            idp_issuer: required("IDP_ISSUER")?,
            idp_audience: required("IDP_AUDIENCE")?,
            admin_emails: parse_admin_emails(&env::var("ADMIN_EMAILS").unwrap_or_default()),
            request_timeout: Duration::from_secs(parsed("REQUEST_TIMEOUT_SECS", 30)?),
            db_acquire_timeout: Duration::from_secs(parsed("DB_ACQUIRE_TIMEOUT_SECS", 5)?),
        })
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails.iter().any(|e| *e == email)
    }
}
