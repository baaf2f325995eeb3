use axum::{extract::State, http::{HeaderMap, StatusCode, header}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::extractors::auth::{AuthUser, SESSION_COOKIE};
use crate::domain::models::auth::{AuthResponse, UserProfile};
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::info;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::AUTHORIZATION)?
        .to_str().ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Exchanges an identity provider ID token for a session cookie.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let id_token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    let identity = state.identity_provider.verify(id_token).await?;
    let session = state.auth_service.establish_session(identity).await?;

    set_session_cookie(&cookies, &session.token, state.config.session_ttl_minutes);

    info!("Session established for user: {}", session.user.uid);

    Ok(Json(AuthResponse {
        csrf_token: session.csrf_token,
        user: UserProfile::from(session.user),
    }))
}

pub async fn logout(cookies: Cookies) -> Result<impl IntoResponse, AppError> {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").into());

    info!("User logged out");

    Ok(StatusCode::OK)
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_id(&actor.uid).await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(UserProfile::from(user)))
}

fn set_session_cookie(cookies: &Cookies, token: &str, ttl_minutes: i64) {
    let mut session_c = Cookie::new(SESSION_COOKIE, token.to_string());
    session_c.set_http_only(true);
    session_c.set_secure(true);
    session_c.set_same_site(SameSite::Strict);
    session_c.set_path("/");
    session_c.set_max_age(Duration::minutes(ttl_minutes));
    cookies.add(session_c);
}
