use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;

use folio_storage::db::{crud::Document, schemas::subscriber::Subscriber};

use super::require;
use crate::api::{ApiError, ApiJson, ApiState, Message, message};

#[derive(Debug, Default, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub email: String,
}

/// Add an address to the mailing list.
pub async fn subscribe(
    State(state): State<Arc<ApiState>>,
    ApiJson(Subscription { email }): ApiJson<Subscription>,
) -> Result<Json<Message>, ApiError> {
    require(&email, "Email")?;

    let existing = Subscriber::read_by_email(&state.db, &email)
        .await
        .map_err(ApiError::internal("Failed to subscribe to newsletter"))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Email already subscribed".to_owned()));
    }

    let subscriber = Subscriber::create(&state.db, Subscriber::new(&email))
        .await
        .map_err(ApiError::internal("Failed to subscribe to newsletter"))?
        .ok_or_else(|| ApiError::Internal("Failed to subscribe to newsletter".to_owned()))?;
    log::info!("New newsletter subscriber {}", subscriber.id);

    Ok(message("Successfully subscribed to newsletter"))
}
