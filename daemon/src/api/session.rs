//! Session tokens on the wire: the `auth-token` cookie, or an `Authorization: Bearer` header.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{
        HeaderMap, HeaderValue,
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
};

use folio_storage::db::schemas::user::User;

use super::{ApiError, ApiState};
use crate::services::auth::authenticate;

pub const COOKIE_NAME: &str = "auth-token";

/// Find the session token in `headers`, the cookie wins over the `Authorization` header.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.to_owned())
        .filter(|value| !value.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_owned())
            .filter(|token| !token.is_empty())
    })
}

/// The `Set-Cookie` value carrying a freshly issued token.
///
/// # Errors
///
/// Fails if the token contains bytes that can't go in a header, which hex never does.
pub fn session_cookie(token: &str, ttl_hours: u64) -> Result<HeaderValue, ApiError> {
    let max_age = ttl_hours.saturating_mul(3600);
    HeaderValue::from_str(&format!(
        "{COOKIE_NAME}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age}"
    ))
    .map_err(|_| ApiError::Internal("Internal server error".to_owned()))
}

/// Any signed-in user.
#[derive(Debug, Clone)]
pub struct SessionUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_owned()))?;
        let user = authenticate(&state.db, &state.settings.auth, &token).await?;
        Ok(Self(user))
    }
}

/// A signed-in admin, required by every mutating route.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let SessionUser(user) = SessionUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            log::warn!("{} tried an admin action without the admin role", user.email);
            return Err(ApiError::Forbidden("Admin access required".to_owned()));
        }
        Ok(Self(user))
    }
}
