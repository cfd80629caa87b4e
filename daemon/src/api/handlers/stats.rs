use std::sync::Arc;

use axum::{Json, extract::State};

use folio_core::state::StatEntry;

use crate::{
    api::{ApiError, ApiState, Envelope, data},
    services::stats::site_stats,
};

/// Home page statistics, counted fresh on every request.
pub async fn get_stats(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Envelope<Vec<StatEntry>>>, ApiError> {
    let stats = site_stats(&state.db, &state.settings.stats)
        .await
        .map_err(ApiError::internal("Failed to fetch stats"))?;
    Ok(data(stats))
}
