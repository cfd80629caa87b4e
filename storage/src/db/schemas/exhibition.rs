//! Exhibitions the artist has taken part in.

use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, sql::Datetime};

use super::{Table, generate_id, record_key};

pub type ExhibitionId = RecordId;

pub const TABLE_NAME: &str = "exhibitions";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    pub id: ExhibitionId,
    pub title: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub location: String,
    /// ISO-8601 date, exhibitions are listed newest first by this field.
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// e.g. "solo" or "group".
    #[serde(default, rename = "type")]
    pub kind: String,
    /// e.g. "upcoming", "current" or "past".
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub artworks_displayed: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Datetime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Datetime>,
}

impl Table for Exhibition {
    const TABLE_NAME: &'static str = TABLE_NAME;
    const TABLE_SCHEMA_QUERY: &'static str = r"
        DEFINE TABLE OVERWRITE exhibitions SCHEMAFULL;
        DEFINE FIELD OVERWRITE title ON exhibitions TYPE string;
        DEFINE FIELD OVERWRITE venue ON exhibitions TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE location ON exhibitions TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE startDate ON exhibitions TYPE string;
        DEFINE FIELD OVERWRITE endDate ON exhibitions TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE `type` ON exhibitions TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE status ON exhibitions TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE description ON exhibitions TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE artworksDisplayed ON exhibitions TYPE array<string> DEFAULT [];
        DEFINE FIELD OVERWRITE images ON exhibitions TYPE array<string> DEFAULT [];
        DEFINE FIELD OVERWRITE featured ON exhibitions TYPE bool DEFAULT false;
        DEFINE FIELD OVERWRITE createdAt ON exhibitions TYPE datetime DEFAULT time::now() READONLY;
        DEFINE FIELD OVERWRITE updatedAt ON exhibitions TYPE datetime VALUE time::now();
        DEFINE INDEX OVERWRITE exhibitions_status_idx ON exhibitions FIELDS status;
    ";
}

impl Exhibition {
    #[must_use]
    #[inline]
    pub fn generate_id() -> ExhibitionId {
        generate_id(TABLE_NAME)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewExhibition {
    pub title: String,
    pub venue: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub description: String,
    pub artworks_displayed: Vec<String>,
    pub images: Vec<String>,
    pub featured: bool,
}

impl From<NewExhibition> for Exhibition {
    #[inline]
    fn from(new: NewExhibition) -> Self {
        Self {
            id: Self::generate_id(),
            title: new.title,
            venue: new.venue,
            location: new.location,
            start_date: new.start_date,
            end_date: new.end_date,
            kind: new.kind,
            status: new.status,
            description: new.description,
            artworks_displayed: new.artworks_displayed,
            images: new.images,
            featured: new.featured,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artworks_displayed: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionView {
    pub id: String,
    pub title: String,
    pub venue: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub description: String,
    pub artworks_displayed: Vec<String>,
    pub images: Vec<String>,
    pub featured: bool,
}

impl From<Exhibition> for ExhibitionView {
    #[inline]
    fn from(exhibition: Exhibition) -> Self {
        Self {
            id: record_key(&exhibition.id),
            title: exhibition.title,
            venue: exhibition.venue,
            location: exhibition.location,
            start_date: exhibition.start_date,
            end_date: exhibition.end_date,
            kind: exhibition.kind,
            status: exhibition.status,
            description: exhibition.description,
            artworks_displayed: exhibition.artworks_displayed,
            images: exhibition.images,
            featured: exhibition.featured,
        }
    }
}
