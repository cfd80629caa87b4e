use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use folio_storage::db::schemas::exhibition::{
    Exhibition, ExhibitionChangeSet, ExhibitionView, NewExhibition, TABLE_NAME,
};

use super::{Resource, require};
use crate::api::{
    ApiError, ApiJson, ApiState, Envelope, Message, data, filter_value, session::AdminUser,
};

const EXHIBITIONS: Resource = Resource {
    table: TABLE_NAME,
    singular: "exhibition",
    label: "Exhibition",
    plural: "exhibitions",
};

#[derive(Debug, Default, Deserialize)]
pub struct ExhibitionQuery {
    pub status: Option<String>,
}

/// List exhibitions, latest start date first.
pub async fn list_exhibitions(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ExhibitionQuery>,
) -> Result<Json<Envelope<Vec<ExhibitionView>>>, ApiError> {
    let exhibitions = Exhibition::list(&state.db, filter_value(query.status))
        .await
        .map_err(ApiError::internal("Failed to fetch exhibitions"))?;
    Ok(data(
        exhibitions.into_iter().map(ExhibitionView::from).collect(),
    ))
}

pub async fn get_exhibition(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ExhibitionView>>, ApiError> {
    EXHIBITIONS.read::<_, Exhibition, _>(&state.db, &id).await
}

pub async fn create_exhibition(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    ApiJson(new): ApiJson<NewExhibition>,
) -> Result<Json<Envelope<ExhibitionView>>, ApiError> {
    require(&new.title, "Title")?;
    EXHIBITIONS
        .create::<_, Exhibition, _>(&state.db, Exhibition::from(new))
        .await
}

pub async fn update_exhibition(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<ExhibitionChangeSet>,
) -> Result<Json<Envelope<ExhibitionView>>, ApiError> {
    EXHIBITIONS
        .update::<_, Exhibition, _>(&state.db, &id, changes)
        .await
}

pub async fn delete_exhibition(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    EXHIBITIONS.delete::<_, Exhibition>(&state.db, &id).await
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{admin_token, expect_data, request, send, test_state};

    use anyhow::Result;
    use axum::http::{Method, StatusCode};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::everything("/api/exhibitions", vec!["Tides", "Harbour"])]
    #[case::all_means_everything("/api/exhibitions?status=all", vec!["Tides", "Harbour"])]
    #[case::past("/api/exhibitions?status=past", vec!["Harbour"])]
    #[case::nothing_matches("/api/exhibitions?status=current", vec![])]
    #[tokio::test]
    async fn test_list_by_status(#[case] uri: &str, #[case] expected: Vec<&str>) -> Result<()> {
        let state = test_state().await?;
        let token = admin_token(&state).await?;
        for (title, start, status) in [
            ("Harbour", "2021-03-01", "past"),
            ("Tides", "2025-06-01", "upcoming"),
        ] {
            expect_data(
                send(
                    &state,
                    request(
                        Method::POST,
                        "/api/exhibitions",
                        Some(
                            json!({ "title": title, "startDate": start, "status": status, "type": "solo" }),
                        ),
                        Some(&token),
                    )?,
                )
                .await?,
            )?;
        }

        let listed = expect_data(send(&state, request(Method::GET, uri, None, None)?).await?)?;
        let titles: Vec<&str> = listed
            .as_array()
            .map(|items| items.iter().filter_map(|item| item["title"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(titles, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_crud() -> Result<()> {
        let state = test_state().await?;
        let token = admin_token(&state).await?;

        let created = expect_data(
            send(
                &state,
                request(
                    Method::POST,
                    "/api/exhibitions",
                    Some(
                        json!({ "title": "Tides", "venue": "Harbour Gallery", "startDate": "2025-06-01", "type": "group" }),
                    ),
                    Some(&token),
                )?,
            )
            .await?,
        )?;
        assert_eq!(created["type"], "group");
        let id = created["id"].as_str().unwrap_or_default().to_owned();

        let updated = expect_data(
            send(
                &state,
                request(
                    Method::PUT,
                    &format!("/api/exhibitions/{id}"),
                    Some(json!({ "status": "current" })),
                    Some(&token),
                )?,
            )
            .await?,
        )?;
        assert_eq!(updated["status"], "current");
        assert_eq!(updated["venue"], "Harbour Gallery");

        let (status, json) = send(
            &state,
            request(Method::DELETE, &format!("/api/exhibitions/{id}"), None, Some(&token))?,
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Exhibition deleted successfully");

        let (status, json) = send(
            &state,
            request(Method::GET, &format!("/api/exhibitions/{id}"), None, None)?,
        )
        .await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Exhibition not found");
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_id() -> Result<()> {
        let state = test_state().await?;
        let (status, json) = send(
            &state,
            request(Method::GET, "/api/exhibitions/42", None, None)?,
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid exhibition ID format");
        Ok(())
    }
}
