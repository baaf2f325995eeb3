use axum::{
    extract::{FromRequestParts, FromRef},
    http::{request::Parts, StatusCode},
};
use crate::state::AppState;
use crate::domain::models::auth::SessionContext;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::{error, Span};

pub const SESSION_COOKIE: &str = "access_token";
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Signed-in caller, read from the session cookie.
///
/// Non-GET requests must echo the session's CSRF token in `X-CSRF-Token`.
/// The role comes from the stored user, not the token, so a role change
/// applies to sessions that are already open.
pub struct AuthUser(pub SessionContext);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

        let session_token = cookies.get(SESSION_COOKIE)
            .ok_or(StatusCode::UNAUTHORIZED)?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let claims = app_state.auth_service.decode_session(&session_token)
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        let method = &parts.method;
        if method != "GET" && method != "HEAD" && method != "OPTIONS" {
            let csrf_header_val = parts.headers.get(CSRF_HEADER)
                .ok_or(StatusCode::FORBIDDEN)?
                .to_str()
                .map_err(|_| StatusCode::FORBIDDEN)?;

            if csrf_header_val != claims.csrf_token {
                return Err(StatusCode::FORBIDDEN);
            }
        }

        let user = app_state.user_repo.find_by_id(&claims.sub).await
            .map_err(|e| {
                error!("Failed to load session user {}: {:?}", claims.sub, e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::UNAUTHORIZED)?;
        let actor = SessionContext::from(&user);

        Span::current().record("user_id", &actor.uid);
        Span::current().record("role", actor.role.as_str());

        Ok(AuthUser(actor))
    }
}

/// Signed-in caller holding the admin role.
pub struct AdminUser(pub SessionContext);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(actor) = AuthUser::from_request_parts(parts, state).await?;
        if !actor.is_admin() {
            return Err(StatusCode::FORBIDDEN);
        }
        Ok(AdminUser(actor))
    }
}
