use serde::{Deserialize, Serialize};

use crate::domain::models::user::{Role, User};
use crate::error::AppError;

/// Claims of the session token minted by this service.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,

    #[serde(rename = "https://reservations.local/claims/email")]
    pub email: String,

    #[serde(rename = "https://reservations.local/claims/role")]
    pub role: Role,

    #[serde(rename = "https://reservations.local/claims/csrf")]
    pub csrf_token: String,
}

/// Who the external identity provider says the caller is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// The acting user, passed explicitly into every lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub uid: String,
    pub email: String,
    pub role: Role,
}

impl SessionContext {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin role required".into()))
        }
    }

    /// Owners see their own bookings; admins see everything.
    pub fn can_access(&self, owner_uid: &str) -> bool {
        self.is_admin() || self.uid == owner_uid
    }
}

impl From<&User> for SessionContext {
    fn from(user: &User) -> Self {
        Self {
            uid: user.uid.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub csrf_token: String,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            uid: user.uid,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
        }
    }
}
