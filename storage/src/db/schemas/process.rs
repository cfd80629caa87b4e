//! Content for the "process" and "studio" pages: materials, process steps, studio photos and
//! timelapse videos.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::{Table, generate_id, record_key};

pub const MATERIALS_TABLE_NAME: &str = "materials";
pub const PROCESS_STEPS_TABLE_NAME: &str = "process_steps";
pub const STUDIO_IMAGES_TABLE_NAME: &str = "studio_images";
pub const TIMELAPSE_VIDEOS_TABLE_NAME: &str = "timelapse_videos";

/// A category of materials the artist works with, e.g. "Paints".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: RecordId,
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Table for Material {
    const TABLE_NAME: &'static str = MATERIALS_TABLE_NAME;
    const TABLE_SCHEMA_QUERY: &'static str = r"
        DEFINE TABLE OVERWRITE materials SCHEMAFULL;
        DEFINE FIELD OVERWRITE category ON materials TYPE string;
        DEFINE FIELD OVERWRITE items ON materials TYPE array<string> DEFAULT [];
    ";
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewMaterial {
    pub category: String,
    pub items: Vec<String>,
}

impl From<NewMaterial> for Material {
    #[inline]
    fn from(new: NewMaterial) -> Self {
        Self {
            id: generate_id(MATERIALS_TABLE_NAME),
            category: new.category,
            items: new.items,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialView {
    pub id: String,
    pub category: String,
    pub items: Vec<String>,
}

impl From<Material> for MaterialView {
    #[inline]
    fn from(material: Material) -> Self {
        Self {
            id: record_key(&material.id),
            category: material.category,
            items: material.items,
        }
    }
}

/// One step of the artist's working process. Steps are shown in ascending `step` order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    pub id: RecordId,
    pub step: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub tools: Vec<String>,
}

impl Table for ProcessStep {
    const TABLE_NAME: &'static str = PROCESS_STEPS_TABLE_NAME;
    const TABLE_SCHEMA_QUERY: &'static str = r"
        DEFINE TABLE OVERWRITE process_steps SCHEMAFULL;
        DEFINE FIELD OVERWRITE step ON process_steps TYPE int;
        DEFINE FIELD OVERWRITE title ON process_steps TYPE string;
        DEFINE FIELD OVERWRITE description ON process_steps TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE image ON process_steps TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE details ON process_steps TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE tools ON process_steps TYPE array<string> DEFAULT [];
    ";
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProcessStep {
    pub step: u32,
    pub title: String,
    pub description: String,
    pub image: String,
    pub details: String,
    pub tools: Vec<String>,
}

impl From<NewProcessStep> for ProcessStep {
    #[inline]
    fn from(new: NewProcessStep) -> Self {
        Self {
            id: generate_id(PROCESS_STEPS_TABLE_NAME),
            step: new.step,
            title: new.title,
            description: new.description,
            image: new.image,
            details: new.details,
            tools: new.tools,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStepChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStepView {
    pub id: String,
    pub step: u32,
    pub title: String,
    pub description: String,
    pub image: String,
    pub details: String,
    pub tools: Vec<String>,
}

impl From<ProcessStep> for ProcessStepView {
    #[inline]
    fn from(step: ProcessStep) -> Self {
        Self {
            id: record_key(&step.id),
            step: step.step,
            title: step.title,
            description: step.description,
            image: step.image,
            details: step.details,
            tools: step.tools,
        }
    }
}

/// A photo of the studio.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioImage {
    pub id: RecordId,
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub description: String,
}

impl Table for StudioImage {
    const TABLE_NAME: &'static str = STUDIO_IMAGES_TABLE_NAME;
    const TABLE_SCHEMA_QUERY: &'static str = r"
        DEFINE TABLE OVERWRITE studio_images SCHEMAFULL;
        DEFINE FIELD OVERWRITE title ON studio_images TYPE string;
        DEFINE FIELD OVERWRITE image ON studio_images TYPE string;
        DEFINE FIELD OVERWRITE description ON studio_images TYPE string DEFAULT '';
    ";
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewStudioImage {
    pub title: String,
    pub image: String,
    pub description: String,
}

impl From<NewStudioImage> for StudioImage {
    #[inline]
    fn from(new: NewStudioImage) -> Self {
        Self {
            id: generate_id(STUDIO_IMAGES_TABLE_NAME),
            title: new.title,
            image: new.image,
            description: new.description,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioImageChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioImageView {
    pub id: String,
    pub title: String,
    pub image: String,
    pub description: String,
}

impl From<StudioImage> for StudioImageView {
    #[inline]
    fn from(image: StudioImage) -> Self {
        Self {
            id: record_key(&image.id),
            title: image.title,
            image: image.image,
            description: image.description,
        }
    }
}

/// A timelapse of a piece being made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelapseVideo {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub thumbnail: String,
    /// Display duration, e.g. "3:45".
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl Table for TimelapseVideo {
    const TABLE_NAME: &'static str = TIMELAPSE_VIDEOS_TABLE_NAME;
    const TABLE_SCHEMA_QUERY: &'static str = r"
        DEFINE TABLE OVERWRITE timelapse_videos SCHEMAFULL;
        DEFINE FIELD OVERWRITE title ON timelapse_videos TYPE string;
        DEFINE FIELD OVERWRITE thumbnail ON timelapse_videos TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE duration ON timelapse_videos TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE description ON timelapse_videos TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE videoUrl ON timelapse_videos TYPE option<string>;
    ";
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTimelapseVideo {
    pub title: String,
    pub thumbnail: String,
    pub duration: String,
    pub description: String,
    pub video_url: Option<String>,
}

impl From<NewTimelapseVideo> for TimelapseVideo {
    #[inline]
    fn from(new: NewTimelapseVideo) -> Self {
        Self {
            id: generate_id(TIMELAPSE_VIDEOS_TABLE_NAME),
            title: new.title,
            thumbnail: new.thumbnail,
            duration: new.duration,
            description: new.description,
            video_url: new.video_url.filter(|url| !url.trim().is_empty()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelapseVideoChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelapseVideoView {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub duration: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl From<TimelapseVideo> for TimelapseVideoView {
    #[inline]
    fn from(video: TimelapseVideo) -> Self {
        Self {
            id: record_key(&video.id),
            title: video.title,
            thumbnail: video.thumbnail,
            duration: video.duration,
            description: video.description,
            video_url: video.video_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_video_url_is_dropped() {
        let video = TimelapseVideo::from(NewTimelapseVideo {
            title: "Glazing".into(),
            video_url: Some("  ".into()),
            ..Default::default()
        });
        assert_eq!(video.video_url, None);

        let json = serde_json::to_value(TimelapseVideoView::from(video)).unwrap();
        assert!(json.get("videoUrl").is_none());
    }

    #[test]
    fn test_process_step_ids_use_their_table() {
        let step = ProcessStep::from(NewProcessStep {
            step: 2,
            title: "Underpainting".into(),
            ..Default::default()
        });
        assert_eq!(step.id.table(), PROCESS_STEPS_TABLE_NAME);
        assert_eq!(ProcessStepView::from(step).step, 2);
    }
}
