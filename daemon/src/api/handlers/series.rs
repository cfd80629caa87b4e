//! Series handlers, including the two consistency endpoints used by the admin panel.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use folio_core::state::SyncOutcome;
use folio_storage::db::{
    crud::Document,
    schemas::{
        artwork::{Artwork, NewArtwork},
        series::{NewSeries, Series, SeriesChangeSet, SeriesView, TABLE_NAME},
    },
};

use super::{Resource, require};
use crate::{
    api::{ApiError, ApiJson, ApiState, Envelope, Message, session::AdminUser},
    services,
};

const SERIES: Resource = Resource {
    table: TABLE_NAME,
    singular: "series",
    label: "Series",
    plural: "series",
};

pub async fn list_series(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Envelope<Vec<SeriesView>>>, ApiError> {
    SERIES.list::<_, Series, _>(&state.db).await
}

pub async fn get_series(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<SeriesView>>, ApiError> {
    SERIES.read::<_, Series, _>(&state.db, &id).await
}

/// 409 if another series already goes by `title`.
async fn ensure_title_free(
    state: &ApiState,
    title: &str,
    except: Option<&Series>,
) -> Result<(), ApiError> {
    let existing = Series::read_by_title(&state.db, title)
        .await
        .map_err(ApiError::internal(SERIES.failed("fetch")))?;
    match existing {
        Some(existing) if except.is_none_or(|series| series.id != existing.id) => {
            Err(ApiError::Conflict("Series already exists".to_owned()))
        }
        _ => Ok(()),
    }
}

pub async fn create_series(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    ApiJson(new): ApiJson<NewSeries>,
) -> Result<Json<Envelope<SeriesView>>, ApiError> {
    require(&new.title, "Title")?;
    ensure_title_free(&state, &new.title, None).await?;

    SERIES
        .create::<_, Series, _>(&state.db, Series::from(new))
        .await
}

pub async fn update_series(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<SeriesChangeSet>,
) -> Result<Json<Envelope<SeriesView>>, ApiError> {
    if let Some(title) = &changes.title {
        require(title, "Title")?;
        let current = Series::read(&state.db, SERIES.id(&id)?)
            .await
            .map_err(ApiError::internal(SERIES.failed("fetch")))?
            .ok_or_else(|| SERIES.not_found())?;
        ensure_title_free(&state, title, Some(&current)).await?;
    }

    SERIES
        .update::<_, Series, _>(&state.db, &id, changes)
        .await
}

pub async fn delete_series(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    SERIES.delete::<_, Series>(&state.db, &id).await
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub message: String,
    pub results: Vec<SyncOutcome>,
}

/// Recompute `images`, `coverImage` and `artworkCount` of every series from its artworks.
pub async fn sync_series(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
) -> Result<Json<SyncResponse>, ApiError> {
    let results = services::series::resync_all_series(&state.db)
        .await
        .map_err(ApiError::internal("Failed to synchronize series images"))?;

    let failures = results.iter().filter(|outcome| outcome.error.is_some()).count();
    if failures > 0 {
        log::warn!("{failures} of {} series failed to synchronize", results.len());
    }

    Ok(Json(SyncResponse {
        success: true,
        message: "Series images synchronized successfully".to_owned(),
        results,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesFromArtwork {
    #[serde(default)]
    pub series_title: String,
    pub artwork_data: NewArtwork,
}

#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
}

/// Register the series named by an artwork the admin panel just saved.
///
/// `seriesTitle` wins over the series named in `artworkData`.
pub async fn update_from_artwork(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    ApiJson(body): ApiJson<SeriesFromArtwork>,
) -> Result<Json<Success>, ApiError> {
    let mut artwork = Artwork::from(body.artwork_data);
    if !body.series_title.trim().is_empty() {
        artwork.series = body.series_title;
    }

    services::series::ensure_series_for_artwork(&state.db, &artwork).await;
    Ok(Json(Success { success: true }))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{admin_token, expect_data, request, send, test_state};

    use anyhow::Result;
    use axum::http::{Method, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    async fn post_artwork(
        state: &std::sync::Arc<crate::api::ApiState>,
        token: &str,
        body: Value,
    ) -> Result<Value> {
        expect_data(
            send(
                state,
                request(Method::POST, "/api/artworks", Some(body), Some(token))?,
            )
            .await?,
        )
    }

    #[tokio::test]
    async fn test_create_and_duplicate_title() -> Result<()> {
        let state = test_state().await?;
        let token = admin_token(&state).await?;
        let body = json!({ "title": "Ocean", "description": "Waves", "year": "2024" });

        let created = expect_data(
            send(
                &state,
                request(Method::POST, "/api/series", Some(body.clone()), Some(&token))?,
            )
            .await?,
        )?;
        assert_eq!(created["title"], "Ocean");
        assert_eq!(created["artworkCount"], 0);
        assert_eq!(created["images"], json!([]));

        let (status, json) = send(
            &state,
            request(Method::POST, "/api/series", Some(body), Some(&token))?,
        )
        .await?;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"], "Series already exists");
        Ok(())
    }

    #[tokio::test]
    async fn test_rename_onto_existing_title_conflicts() -> Result<()> {
        let state = test_state().await?;
        let token = admin_token(&state).await?;
        for title in ["Ocean", "Forest"] {
            expect_data(
                send(
                    &state,
                    request(
                        Method::POST,
                        "/api/series",
                        Some(json!({ "title": title })),
                        Some(&token),
                    )?,
                )
                .await?,
            )?;
        }
        let listed =
            expect_data(send(&state, request(Method::GET, "/api/series", None, None)?).await?)?;
        let forest = listed
            .as_array()
            .and_then(|items| items.iter().find(|item| item["title"] == "Forest"))
            .and_then(|item| item["id"].as_str())
            .unwrap_or_default()
            .to_owned();

        let (status, _) = send(
            &state,
            request(
                Method::PUT,
                &format!("/api/series/{forest}"),
                Some(json!({ "title": "Ocean" })),
                Some(&token),
            )?,
        )
        .await?;
        assert_eq!(status, StatusCode::CONFLICT);

        let renamed = expect_data(
            send(
                &state,
                request(
                    Method::PUT,
                    &format!("/api/series/{forest}"),
                    Some(json!({ "title": "Forest", "featured": true })),
                    Some(&token),
                )?,
            )
            .await?,
        )?;
        assert_eq!(renamed["featured"], true);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete() -> Result<()> {
        let state = test_state().await?;
        let token = admin_token(&state).await?;
        let created = expect_data(
            send(
                &state,
                request(
                    Method::POST,
                    "/api/series",
                    Some(json!({ "title": "Ocean" })),
                    Some(&token),
                )?,
            )
            .await?,
        )?;
        let id = created["id"].as_str().unwrap_or_default().to_owned();

        let (status, json) = send(
            &state,
            request(Method::DELETE, &format!("/api/series/{id}"), None, Some(&token))?,
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Series deleted successfully");

        let (status, json) = send(
            &state,
            request(Method::DELETE, &format!("/api/series/{id}"), None, Some(&token))?,
        )
        .await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Series not found");
        Ok(())
    }

    #[tokio::test]
    async fn test_sync_repairs_stale_series() -> Result<()> {
        let state = test_state().await?;
        let token = admin_token(&state).await?;
        post_artwork(
            &state,
            &token,
            json!({ "title": "One", "year": 2024, "medium": "Oil", "series": "Ocean", "image": "u1" }),
        )
        .await?;
        post_artwork(
            &state,
            &token,
            json!({ "title": "Two", "year": 2024, "medium": "Oil", "series": "Ocean", "image": "u2" }),
        )
        .await?;
        expect_data(
            send(
                &state,
                request(
                    Method::POST,
                    "/api/series",
                    Some(json!({ "title": "Empty" })),
                    Some(&token),
                )?,
            )
            .await?,
        )?;

        let (status, json) = send(
            &state,
            request(Method::POST, "/api/series/sync", None, Some(&token))?,
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Series images synchronized successfully");

        let mut results = json["results"].as_array().cloned().unwrap_or_default();
        results.sort_by_key(|result| result["seriesTitle"].as_str().map(String::from));
        assert_eq!(
            results,
            vec![
                json!({ "seriesTitle": "Empty", "imageCount": 0, "updated": false }),
                json!({ "seriesTitle": "Ocean", "imageCount": 2, "updated": true }),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_sync_requires_admin() -> Result<()> {
        let state = test_state().await?;
        let (status, _) =
            send(&state, request(Method::POST, "/api/series/sync", None, None)?).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_from_artwork() -> Result<()> {
        let state = test_state().await?;
        let token = admin_token(&state).await?;
        let body = json!({
            "seriesTitle": "Ocean",
            "artworkData": { "title": "Tidal Study", "year": 2024, "medium": "Oil", "image": "u1" }
        });

        for _ in 0..2 {
            let (status, json) = send(
                &state,
                request(
                    Method::POST,
                    "/api/series/update-from-artwork",
                    Some(body.clone()),
                    Some(&token),
                )?,
            )
            .await?;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json, json!({ "success": true }));
        }

        let listed =
            expect_data(send(&state, request(Method::GET, "/api/series", None, None)?).await?)?;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
        assert_eq!(listed[0]["title"], "Ocean");
        assert_eq!(listed[0]["coverImage"], "u1");
        assert_eq!(listed[0]["images"], json!(["u1"]));
        assert_eq!(listed[0]["artworkCount"], 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_from_artwork_without_series_is_a_no_op() -> Result<()> {
        let state = test_state().await?;
        let token = admin_token(&state).await?;
        let body = json!({
            "seriesTitle": "n/a",
            "artworkData": { "title": "Loose Sketch", "year": 2024, "image": "u1" }
        });

        let (status, _) = send(
            &state,
            request(
                Method::POST,
                "/api/series/update-from-artwork",
                Some(body),
                Some(&token),
            )?,
        )
        .await?;
        assert_eq!(status, StatusCode::OK);

        let listed =
            expect_data(send(&state, request(Method::GET, "/api/series", None, None)?).await?)?;
        assert_eq!(listed, json!([]));
        Ok(())
    }
}
