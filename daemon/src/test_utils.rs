//! utilities used for testing the http api
//!
//! NOTE: most of the stuff related to setting up database state is in the `folio_storage` crate
//! behind the `test_utils` feature flag.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use tower::ServiceExt as _;

use folio_core::config::{Settings, SyncMode};
use folio_storage::test_utils::init_test_database;

use crate::{
    api::{ApiState, router},
    services::auth::{create_admin, login},
};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// A fresh in-memory database behind an api state, with default settings.
pub async fn test_state() -> Result<Arc<ApiState>> {
    test_state_with_mode(SyncMode::default()).await
}

pub async fn test_state_with_mode(sync_mode: SyncMode) -> Result<Arc<ApiState>> {
    let db = init_test_database().await?;
    let mut settings = Settings::default();
    settings.series.sync_mode = sync_mode;
    Ok(Arc::new(ApiState::new(Arc::new(db), Arc::new(settings))))
}

/// Bootstrap the admin account and sign in, returning the session token.
pub async fn admin_token(state: &ApiState) -> Result<String> {
    create_admin(&state.db, "Admin", ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    let (_, token) = login(&state.db, &state.settings.auth, ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    Ok(token)
}

/// Build a request, with a JSON body and a bearer token when given.
pub fn request(
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Result<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    Ok(match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    })
}

/// Send `request` through a fresh router over `state`, returning the status and the JSON body.
pub async fn send(
    state: &Arc<ApiState>,
    request: Request<Body>,
) -> Result<(StatusCode, serde_json::Value)> {
    let app: Router = router(state.clone());
    let response = app.oneshot(request).await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body)?
    };
    Ok((status, json))
}

/// The `data` of a successful response, failing the test otherwise.
pub fn expect_data(
    (status, body): (StatusCode, serde_json::Value),
) -> Result<serde_json::Value> {
    anyhow::ensure!(status == StatusCode::OK, "unexpected status {status}: {body}");
    anyhow::ensure!(body["success"] == true, "unsuccessful response: {body}");
    Ok(body["data"].clone())
}
