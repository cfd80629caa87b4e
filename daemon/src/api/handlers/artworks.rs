//! Artwork handlers.
//!
//! Writes go through [`crate::services::artworks`] so the series stay maintained.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use folio_storage::db::{
    crud::artwork::FEATURED_LIMIT,
    schemas::artwork::{
        Artwork, ArtworkChangeSet, ArtworkFilter, ArtworkView, NewArtwork, TABLE_NAME,
    },
};

use super::{Resource, require};
use crate::{
    api::{
        ApiError, ApiJson, ApiState, Envelope, Message, data, filter_value, message,
        session::AdminUser,
    },
    services,
};

const ARTWORKS: Resource = Resource {
    table: TABLE_NAME,
    singular: "artwork",
    label: "Artwork",
    plural: "artworks",
};

/// Query parameters of the gallery listing. `"all"` means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct ArtworkQuery {
    pub year: Option<String>,
    pub medium: Option<String>,
    pub series: Option<String>,
    pub search: Option<String>,
}

impl TryFrom<ArtworkQuery> for ArtworkFilter {
    type Error = ApiError;

    fn try_from(query: ArtworkQuery) -> Result<Self, Self::Error> {
        let year = filter_value(query.year)
            .map(|year| {
                year.trim()
                    .parse()
                    .map_err(|_| ApiError::BadRequest(format!("Invalid year: {year}")))
            })
            .transpose()?;

        Ok(Self {
            year,
            medium: filter_value(query.medium),
            series: filter_value(query.series),
            search: query.search.filter(|search| !search.trim().is_empty()),
        })
    }
}

/// List artworks, newest first.
pub async fn list_artworks(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ArtworkQuery>,
) -> Result<Json<Envelope<Vec<ArtworkView>>>, ApiError> {
    let filter = ArtworkFilter::try_from(query)?;
    let artworks = Artwork::list(&state.db, &filter)
        .await
        .map_err(ApiError::internal("Failed to fetch artworks"))?;
    Ok(data(artworks.into_iter().map(ArtworkView::from).collect()))
}

/// Up to three featured artworks, or random ones if none are featured.
pub async fn featured_artworks(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Envelope<Vec<ArtworkView>>>, ApiError> {
    let artworks = Artwork::read_featured(&state.db, FEATURED_LIMIT)
        .await
        .map_err(ApiError::internal("Failed to fetch featured artworks"))?;
    Ok(data(artworks.into_iter().map(ArtworkView::from).collect()))
}

pub async fn get_artwork(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ArtworkView>>, ApiError> {
    ARTWORKS.read::<_, Artwork, _>(&state.db, &id).await
}

pub async fn create_artwork(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    ApiJson(new): ApiJson<NewArtwork>,
) -> Result<Json<Envelope<ArtworkView>>, ApiError> {
    require(&new.title, "Title")?;

    let artwork =
        services::artworks::create_artwork(&state.db, state.settings.series.sync_mode, new)
            .await
            .map_err(ApiError::internal("Failed to create artwork"))?;
    Ok(data(artwork.into()))
}

pub async fn update_artwork(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<ArtworkChangeSet>,
) -> Result<Json<Envelope<ArtworkView>>, ApiError> {
    let id = ARTWORKS.id(&id)?;
    if let Some(title) = &changes.title {
        require(title, "Title")?;
    }

    let artwork = services::artworks::update_artwork(
        &state.db,
        state.settings.series.sync_mode,
        id,
        changes,
    )
    .await
    .map_err(ApiError::from_storage(
        "Artwork not found",
        "Failed to update artwork",
    ))?;
    Ok(data(artwork.into()))
}

pub async fn delete_artwork(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let id = ARTWORKS.id(&id)?;
    services::artworks::delete_artwork(&state.db, state.settings.series.sync_mode, id)
        .await
        .map_err(ApiError::from_storage(
            "Artwork not found",
            "Failed to delete artwork",
        ))?;
    Ok(message("Artwork deleted successfully"))
}
