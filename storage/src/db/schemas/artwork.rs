//! An artwork is a single piece in the portfolio.
//!
//! Artworks reference their series by title only, see [`super::series`].

use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, sql::Datetime};

use super::{Table, datetime_to_string, generate_id, record_key};

pub type ArtworkId = RecordId;

pub const TABLE_NAME: &str = "artworks";

/// The series value the admin panel uses for "not part of any series".
pub const NO_SERIES: &str = "n/a";

/// Check whether a series value on an artwork names an actual series.
///
/// Blank values and any casing of `"n/a"` mean the artwork is not part of a series.
#[must_use]
#[inline]
pub fn is_series_title(series: &str) -> bool {
    let series = series.trim();
    !series.is_empty() && !series.eq_ignore_ascii_case(NO_SERIES)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    /// the unique identifier for this [`Artwork`].
    pub id: ArtworkId,
    pub title: String,
    pub year: i32,
    pub medium: String,
    #[serde(default)]
    pub dimensions: String,
    /// Title of the series this artwork belongs to, see [`is_series_title`].
    #[serde(default)]
    pub series: String,
    /// URL of the artwork's image.
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
    /// Ordered, distinct tags.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Datetime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Datetime>,
}

impl Table for Artwork {
    const TABLE_NAME: &'static str = TABLE_NAME;
    const TABLE_SCHEMA_QUERY: &'static str = r"
        DEFINE TABLE OVERWRITE artworks SCHEMAFULL;
        DEFINE FIELD OVERWRITE title ON artworks TYPE string;
        DEFINE FIELD OVERWRITE year ON artworks TYPE int;
        DEFINE FIELD OVERWRITE medium ON artworks TYPE string;
        DEFINE FIELD OVERWRITE dimensions ON artworks TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE series ON artworks TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE image ON artworks TYPE string;
        DEFINE FIELD OVERWRITE description ON artworks TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE featured ON artworks TYPE bool DEFAULT false;
        DEFINE FIELD OVERWRITE tags ON artworks TYPE array<string> DEFAULT [];
        DEFINE FIELD OVERWRITE createdAt ON artworks TYPE datetime DEFAULT time::now() READONLY;
        DEFINE FIELD OVERWRITE updatedAt ON artworks TYPE datetime VALUE time::now();
        DEFINE INDEX OVERWRITE artworks_series_idx ON artworks FIELDS series;
    ";
}

impl Artwork {
    #[must_use]
    #[inline]
    pub fn generate_id() -> ArtworkId {
        generate_id(TABLE_NAME)
    }

    /// Whether this artwork belongs to a series.
    #[must_use]
    #[inline]
    pub fn has_series(&self) -> bool {
        is_series_title(&self.series)
    }

    /// Case-insensitive match of `needle` against the title and tags.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// The fields needed to create an artwork, as submitted by the admin panel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewArtwork {
    pub title: String,
    pub year: i32,
    pub medium: String,
    pub dimensions: String,
    pub series: String,
    pub image: String,
    pub description: String,
    pub featured: bool,
    pub tags: Vec<String>,
}

impl From<NewArtwork> for Artwork {
    #[inline]
    fn from(new: NewArtwork) -> Self {
        Self {
            id: Self::generate_id(),
            title: new.title,
            year: new.year,
            medium: new.medium,
            dimensions: new.dimensions,
            series: new.series,
            image: new.image,
            description: new.description,
            featured: new.featured,
            tags: dedup_tags(new.tags),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Drop blank and repeated tags, keeping the first occurrence of each.
fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_owned();
        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ArtworkChangeSet {
    #[must_use]
    #[inline]
    pub fn normalized(mut self) -> Self {
        self.tags = self.tags.map(dedup_tags);
        self
    }
}

/// Filters for listing artworks. `None` means "don't filter on this".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtworkFilter {
    pub year: Option<i32>,
    pub medium: Option<String>,
    pub series: Option<String>,
    pub search: Option<String>,
}

/// An artwork as presented to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkView {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub medium: String,
    pub dimensions: String,
    pub series: String,
    pub image: String,
    pub description: String,
    pub featured: bool,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Artwork> for ArtworkView {
    #[inline]
    fn from(artwork: Artwork) -> Self {
        Self {
            id: record_key(&artwork.id),
            created_at: datetime_to_string(artwork.created_at.as_ref()),
            updated_at: datetime_to_string(artwork.updated_at.as_ref()),
            title: artwork.title,
            year: artwork.year,
            medium: artwork.medium,
            dimensions: artwork.dimensions,
            series: artwork.series,
            image: artwork.image,
            description: artwork.description,
            featured: artwork.featured,
            tags: artwork.tags,
        }
    }
}
