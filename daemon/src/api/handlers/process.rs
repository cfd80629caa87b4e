//! Handlers for the process page: materials, process steps, studio images and timelapse videos.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use folio_storage::db::schemas::process::{
    MATERIALS_TABLE_NAME, Material, MaterialChangeSet, MaterialView, NewMaterial, NewProcessStep,
    NewStudioImage, NewTimelapseVideo, PROCESS_STEPS_TABLE_NAME, ProcessStep,
    ProcessStepChangeSet, ProcessStepView, STUDIO_IMAGES_TABLE_NAME, StudioImage,
    StudioImageChangeSet, StudioImageView, TIMELAPSE_VIDEOS_TABLE_NAME, TimelapseVideo,
    TimelapseVideoChangeSet, TimelapseVideoView,
};

use super::{Resource, require};
use crate::api::{ApiError, ApiJson, ApiState, Envelope, Message, data, session::AdminUser};

const MATERIALS: Resource = Resource {
    table: MATERIALS_TABLE_NAME,
    singular: "material",
    label: "Material",
    plural: "materials",
};

const STEPS: Resource = Resource {
    table: PROCESS_STEPS_TABLE_NAME,
    singular: "process step",
    label: "Process step",
    plural: "process steps",
};

const STUDIO_IMAGES: Resource = Resource {
    table: STUDIO_IMAGES_TABLE_NAME,
    singular: "studio image",
    label: "Studio image",
    plural: "studio images",
};

const VIDEOS: Resource = Resource {
    table: TIMELAPSE_VIDEOS_TABLE_NAME,
    singular: "video",
    label: "Video",
    plural: "videos",
};

type Db = State<Arc<ApiState>>;

// Materials

/// Material categories, alphabetically.
pub async fn list_materials(
    State(state): Db,
) -> Result<Json<Envelope<Vec<MaterialView>>>, ApiError> {
    let materials = Material::list(&state.db)
        .await
        .map_err(ApiError::internal("Failed to fetch materials"))?;
    Ok(data(materials.into_iter().map(MaterialView::from).collect()))
}

pub async fn get_material(
    State(state): Db,
    Path(id): Path<String>,
) -> Result<Json<Envelope<MaterialView>>, ApiError> {
    MATERIALS.read::<_, Material, _>(&state.db, &id).await
}

pub async fn create_material(
    AdminUser(_): AdminUser,
    State(state): Db,
    ApiJson(new): ApiJson<NewMaterial>,
) -> Result<Json<Envelope<MaterialView>>, ApiError> {
    require(&new.category, "Category")?;
    MATERIALS
        .create::<_, Material, _>(&state.db, Material::from(new))
        .await
}

pub async fn update_material(
    AdminUser(_): AdminUser,
    State(state): Db,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<MaterialChangeSet>,
) -> Result<Json<Envelope<MaterialView>>, ApiError> {
    MATERIALS
        .update::<_, Material, _>(&state.db, &id, changes)
        .await
}

pub async fn delete_material(
    AdminUser(_): AdminUser,
    State(state): Db,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    MATERIALS.delete::<_, Material>(&state.db, &id).await
}

// Process steps

/// Process steps, by step number.
pub async fn list_steps(
    State(state): Db,
) -> Result<Json<Envelope<Vec<ProcessStepView>>>, ApiError> {
    let steps = ProcessStep::list(&state.db)
        .await
        .map_err(ApiError::internal("Failed to fetch process steps"))?;
    Ok(data(steps.into_iter().map(ProcessStepView::from).collect()))
}

pub async fn get_step(
    State(state): Db,
    Path(id): Path<String>,
) -> Result<Json<Envelope<ProcessStepView>>, ApiError> {
    STEPS.read::<_, ProcessStep, _>(&state.db, &id).await
}

pub async fn create_step(
    AdminUser(_): AdminUser,
    State(state): Db,
    ApiJson(new): ApiJson<NewProcessStep>,
) -> Result<Json<Envelope<ProcessStepView>>, ApiError> {
    require(&new.title, "Title")?;
    STEPS
        .create::<_, ProcessStep, _>(&state.db, ProcessStep::from(new))
        .await
}

pub async fn update_step(
    AdminUser(_): AdminUser,
    State(state): Db,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<ProcessStepChangeSet>,
) -> Result<Json<Envelope<ProcessStepView>>, ApiError> {
    STEPS
        .update::<_, ProcessStep, _>(&state.db, &id, changes)
        .await
}

pub async fn delete_step(
    AdminUser(_): AdminUser,
    State(state): Db,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    STEPS.delete::<_, ProcessStep>(&state.db, &id).await
}

// Studio images

pub async fn list_studio_images(
    State(state): Db,
) -> Result<Json<Envelope<Vec<StudioImageView>>>, ApiError> {
    STUDIO_IMAGES
        .list::<_, StudioImage, _>(&state.db)
        .await
}

pub async fn get_studio_image(
    State(state): Db,
    Path(id): Path<String>,
) -> Result<Json<Envelope<StudioImageView>>, ApiError> {
    STUDIO_IMAGES
        .read::<_, StudioImage, _>(&state.db, &id)
        .await
}

pub async fn create_studio_image(
    AdminUser(_): AdminUser,
    State(state): Db,
    ApiJson(new): ApiJson<NewStudioImage>,
) -> Result<Json<Envelope<StudioImageView>>, ApiError> {
    require(&new.title, "Title")?;
    require(&new.image, "Image")?;
    STUDIO_IMAGES
        .create::<_, StudioImage, _>(&state.db, StudioImage::from(new))
        .await
}

pub async fn update_studio_image(
    AdminUser(_): AdminUser,
    State(state): Db,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<StudioImageChangeSet>,
) -> Result<Json<Envelope<StudioImageView>>, ApiError> {
    STUDIO_IMAGES
        .update::<_, StudioImage, _>(&state.db, &id, changes)
        .await
}

pub async fn delete_studio_image(
    AdminUser(_): AdminUser,
    State(state): Db,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    STUDIO_IMAGES
        .delete::<_, StudioImage>(&state.db, &id)
        .await
}

// Timelapse videos

pub async fn list_videos(
    State(state): Db,
) -> Result<Json<Envelope<Vec<TimelapseVideoView>>>, ApiError> {
    VIDEOS.list::<_, TimelapseVideo, _>(&state.db).await
}

pub async fn get_video(
    State(state): Db,
    Path(id): Path<String>,
) -> Result<Json<Envelope<TimelapseVideoView>>, ApiError> {
    VIDEOS.read::<_, TimelapseVideo, _>(&state.db, &id).await
}

pub async fn create_video(
    AdminUser(_): AdminUser,
    State(state): Db,
    ApiJson(new): ApiJson<NewTimelapseVideo>,
) -> Result<Json<Envelope<TimelapseVideoView>>, ApiError> {
    require(&new.title, "Title")?;
    VIDEOS
        .create::<_, TimelapseVideo, _>(&state.db, TimelapseVideo::from(new))
        .await
}

pub async fn update_video(
    AdminUser(_): AdminUser,
    State(state): Db,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<TimelapseVideoChangeSet>,
) -> Result<Json<Envelope<TimelapseVideoView>>, ApiError> {
    VIDEOS
        .update::<_, TimelapseVideo, _>(&state.db, &id, changes)
        .await
}

pub async fn delete_video(
    AdminUser(_): AdminUser,
    State(state): Db,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    VIDEOS.delete::<_, TimelapseVideo>(&state.db, &id).await
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{admin_token, expect_data, request, send, test_state};

    use anyhow::Result;
    use axum::http::{Method, StatusCode};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn field(items: &Value, name: &str) -> Vec<Value> {
        items
            .as_array()
            .map(|items| items.iter().map(|item| item[name].clone()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_steps_are_listed_by_number() -> Result<()> {
        let state = test_state().await?;
        let token = admin_token(&state).await?;
        for (step, title) in [(3, "Varnish"), (1, "Sketch"), (2, "Underpainting")] {
            expect_data(
                send(
                    &state,
                    request(
                        Method::POST,
                        "/api/process/steps",
                        Some(json!({ "step": step, "title": title, "tools": ["brush"] })),
                        Some(&token),
                    )?,
                )
                .await?,
            )?;
        }

        let steps = expect_data(
            send(&state, request(Method::GET, "/api/process/steps", None, None)?).await?,
        )?;
        assert_eq!(field(&steps, "step"), vec![json!(1), json!(2), json!(3)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_materials_are_listed_by_category() -> Result<()> {
        let state = test_state().await?;
        let token = admin_token(&state).await?;
        for category in ["Surfaces", "Brushes", "Paints"] {
            expect_data(
                send(
                    &state,
                    request(
                        Method::POST,
                        "/api/process/materials",
                        Some(json!({ "category": category, "items": ["one"] })),
                        Some(&token),
                    )?,
                )
                .await?,
            )?;
        }

        let materials = expect_data(
            send(&state, request(Method::GET, "/api/process/materials", None, None)?).await?,
        )?;
        assert_eq!(
            field(&materials, "category"),
            vec![json!("Brushes"), json!("Paints"), json!("Surfaces")]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_video_crud() -> Result<()> {
        let state = test_state().await?;
        let token = admin_token(&state).await?;
        let created = expect_data(
            send(
                &state,
                request(
                    Method::POST,
                    "/api/process/videos",
                    Some(json!({ "title": "Glazing", "duration": "3:45", "videoUrl": "" })),
                    Some(&token),
                )?,
            )
            .await?,
        )?;
        assert_eq!(created["duration"], "3:45");
        assert_eq!(created.get("videoUrl"), None);
        let id = created["id"].as_str().unwrap_or_default().to_owned();

        let updated = expect_data(
            send(
                &state,
                request(
                    Method::PUT,
                    &format!("/api/process/videos/{id}"),
                    Some(json!({ "videoUrl": "https://videos.example.com/glazing.mp4" })),
                    Some(&token),
                )?,
            )
            .await?,
        )?;
        assert_eq!(updated["videoUrl"], "https://videos.example.com/glazing.mp4");

        let listed = expect_data(
            send(&state, request(Method::GET, "/api/process/videos", None, None)?).await?,
        )?;
        assert_eq!(field(&listed, "title"), vec![json!("Glazing")]);

        let (status, json) = send(
            &state,
            request(Method::DELETE, &format!("/api/process/videos/{id}"), None, Some(&token))?,
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Video deleted successfully");
        Ok(())
    }

    #[tokio::test]
    async fn test_studio_image_requires_an_image() -> Result<()> {
        let state = test_state().await?;
        let token = admin_token(&state).await?;
        let (status, json) = send(
            &state,
            request(
                Method::POST,
                "/api/process/studio",
                Some(json!({ "title": "North window" })),
                Some(&token),
            )?,
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Image is required");
        Ok(())
    }

    #[rstest]
    #[case::materials("/api/process/materials/01HZX8Q5V2J3K4M5N6P7Q8R9ST", "Material not found")]
    #[case::steps("/api/process/steps/01HZX8Q5V2J3K4M5N6P7Q8R9ST", "Process step not found")]
    #[case::studio("/api/process/studio/01HZX8Q5V2J3K4M5N6P7Q8R9ST", "Studio image not found")]
    #[case::videos("/api/process/videos/01HZX8Q5V2J3K4M5N6P7Q8R9ST", "Video not found")]
    #[tokio::test]
    async fn test_missing_records(#[case] uri: &str, #[case] error: &str) -> Result<()> {
        let state = test_state().await?;
        let (status, json) = send(&state, request(Method::GET, uri, None, None)?).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], error);
        Ok(())
    }
}
