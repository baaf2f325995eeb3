use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{models::auth::Identity, ports::IdentityProvider};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    email: Option<String>,
    name: Option<String>,
}

/// Verifies ID tokens signed by the external identity provider with its
/// Ed25519 key.
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(public_key_pem: &str, issuer: &str, audience: &str) -> Result<Self, AppError> {
        let decoding_key = DecodingKey::from_ed_pem(public_key_pem.as_bytes())
            .map_err(|e| AppError::InternalWithMsg(format!("Invalid identity provider key: {}", e)))?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);

        Ok(Self { decoding_key, validation })
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn verify(&self, id_token: &str) -> Result<Identity, AppError> {
        let claims = decode::<IdTokenClaims>(id_token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("ID token rejected: {}", e);
                AppError::Unauthorized
            })?
            .claims;

        let email = claims.email.filter(|e| !e.trim().is_empty()).ok_or(AppError::Unauthorized)?;
        Ok(Identity { uid: claims.sub, email, display_name: claims.name })
    }
}
