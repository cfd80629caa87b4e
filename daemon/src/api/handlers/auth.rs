use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
};
use serde::{Deserialize, Serialize};

use folio_storage::db::schemas::user::UserBrief;

use crate::{
    api::{
        ApiError, ApiJson, ApiState,
        session::{SessionUser, session_cookie},
    },
    services::auth,
};

#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserBrief,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: UserBrief,
}

/// Sign in, setting the session cookie.
pub async fn login(
    State(state): State<Arc<ApiState>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_owned(),
        ));
    }

    let (user, token) = auth::login(
        &state.db,
        &state.settings.auth,
        &credentials.email,
        &credentials.password,
    )
    .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        session_cookie(&token, state.settings.auth.token_ttl_hours)?,
    );

    Ok((
        headers,
        Json(LoginResponse {
            success: true,
            message: "Login successful".to_owned(),
            user: user.into(),
        }),
    ))
}

pub async fn me(SessionUser(user): SessionUser) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        user: user.into(),
    })
}
