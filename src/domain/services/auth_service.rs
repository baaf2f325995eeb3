use std::sync::Arc;
use crate::domain::{
    models::{auth::{Claims, Identity}, user::{Role, User}},
    ports::UserRepository,
};
use crate::error::AppError;
use crate::config::Config;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use chrono::{Utc, Duration};
use rand::{distributions::Alphanumeric, Rng};
use tracing::info;

pub const SESSION_AUDIENCE: &str = "reservation-frontend";

pub struct Session {
    pub token: String,
    pub csrf_token: String,
    pub user: User,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    config: Config,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Result<Self, AppError> {
        let encoding_key = EncodingKey::from_ed_pem(config.session_signing_key.as_bytes())
            .map_err(|e| AppError::InternalWithMsg(format!("Invalid session signing key: {}", e)))?;
        let decoding_key = DecodingKey::from_ed_pem(config.session_verify_key.as_bytes())
            .map_err(|e| AppError::InternalWithMsg(format!("Invalid session verify key: {}", e)))?;

        Ok(Self { users, config, encoding_key, decoding_key })
    }

    /// Looks the verified identity up, creating the user document on first
    /// sign-in, and mints a session token for it.
    pub async fn establish_session(&self, identity: Identity) -> Result<Session, AppError> {
        let user = match self.users.find_by_id(&identity.uid).await? {
            Some(user) => user,
            None => {
                let role = if self.config.is_admin_email(&identity.email) { Role::Admin } else { Role::Customer };
                let user = self.users
                    .create_if_absent(&User::new(identity.uid, identity.email, identity.display_name, role))
                    .await?;
                info!("User {} created with role {}", user.uid, user.role.as_str());
                user
            }
        };

        let (token, csrf_token) = self.issue_token(&user)?;
        Ok(Session { token, csrf_token, user })
    }

    fn issue_token(&self, user: &User) -> Result<(String, String), AppError> {
        let csrf_token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect();
        let now = Utc::now();
        let exp = (now + Duration::minutes(self.config.session_ttl_minutes)).timestamp() as usize;

        let claims = Claims {
            iss: self.config.session_issuer.clone(),
            sub: user.uid.clone(),
            aud: SESSION_AUDIENCE.to_string(),
            exp,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            email: user.email.clone(),
            role: user.role,
            csrf_token: csrf_token.clone(),
        };

        let token = encode(&Header::new(Algorithm::EdDSA), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        Ok((token, csrf_token))
    }

    pub fn decode_session(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&[SESSION_AUDIENCE]);
        validation.set_issuer(&[&self.config.session_issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Session token rejected: {}", e);
                AppError::Unauthorized
            })
    }
}
