//! A series is a named grouping of artworks.
//!
//! Artworks join a series by carrying its title in their `series` field, there is no foreign key.
//! The `images`, `coverImage` and `artworkCount` fields of a series are derived from those artworks,
//! see [`SeriesDerived`].

use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, sql::Datetime};

use super::{Table, artwork::Artwork, datetime_to_string, generate_id, record_key};

pub type SeriesId = RecordId;

pub const TABLE_NAME: &str = "series";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    /// the unique identifier for this [`Series`].
    pub id: SeriesId,
    /// The logical key of the series, unique across the table.
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The artist's statement for the series.
    #[serde(default)]
    pub statement: String,
    /// The year of the first contributing artwork, never recalculated.
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub artwork_count: u64,
    #[serde(default)]
    pub cover_image: String,
    /// Image URLs of the member artworks, in natural artwork order.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Datetime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Datetime>,
}

impl Table for Series {
    const TABLE_NAME: &'static str = TABLE_NAME;
    const TABLE_SCHEMA_QUERY: &'static str = r"
        DEFINE TABLE OVERWRITE series SCHEMAFULL;
        DEFINE FIELD OVERWRITE title ON series TYPE string;
        DEFINE FIELD OVERWRITE description ON series TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE statement ON series TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE year ON series TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE artworkCount ON series TYPE int DEFAULT 0;
        DEFINE FIELD OVERWRITE coverImage ON series TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE images ON series TYPE array<string> DEFAULT [];
        DEFINE FIELD OVERWRITE featured ON series TYPE bool DEFAULT false;
        DEFINE FIELD OVERWRITE createdAt ON series TYPE datetime DEFAULT time::now() READONLY;
        DEFINE FIELD OVERWRITE updatedAt ON series TYPE datetime VALUE time::now();
        DEFINE INDEX OVERWRITE series_title_idx ON series FIELDS title UNIQUE;
    ";
}

/// Description given to series created automatically from an artwork.
#[must_use]
#[inline]
pub fn default_description(title: &str) -> String {
    format!("A collection of artworks from the {title} series")
}

/// Statement given to series created automatically from an artwork.
pub const DEFAULT_STATEMENT: &str =
    "This series represents a unique exploration in my artistic journey.";

impl Series {
    #[must_use]
    #[inline]
    pub fn generate_id() -> SeriesId {
        generate_id(TABLE_NAME)
    }

    /// A new series with the boilerplate text used for automatically created series,
    /// seeded from the artwork that introduced its title.
    #[must_use]
    pub fn for_artwork(artwork: &Artwork) -> Self {
        Self {
            id: Self::generate_id(),
            title: artwork.series.clone(),
            description: default_description(&artwork.series),
            statement: DEFAULT_STATEMENT.to_owned(),
            year: artwork.year.to_string(),
            artwork_count: 1,
            cover_image: artwork.image.clone(),
            images: vec![artwork.image.clone()],
            featured: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// A new series with the boilerplate text, whose derived fields are computed from `artworks`.
    ///
    /// `artworks` must be in natural order, the first one provides the year.
    #[must_use]
    pub fn from_members(title: &str, artworks: &[Artwork]) -> Self {
        let derived = SeriesDerived::from_artworks(artworks, "");
        Self {
            id: Self::generate_id(),
            title: title.to_owned(),
            description: default_description(title),
            statement: DEFAULT_STATEMENT.to_owned(),
            year: artworks
                .first()
                .map(|artwork| artwork.year.to_string())
                .unwrap_or_default(),
            artwork_count: derived.artwork_count,
            cover_image: derived.cover_image,
            images: derived.images,
            featured: false,
            created_at: None,
            updated_at: None,
        }
    }
}

/// The fields of a series that are computed from its member artworks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesDerived {
    pub images: Vec<String>,
    pub cover_image: String,
    pub artwork_count: u64,
}

impl SeriesDerived {
    /// Compute the derived fields from the member artworks, in natural order.
    ///
    /// Artworks without an image contribute to the count but not to `images`.
    /// The cover is the first image, or `prior_cover` if there are no images.
    #[must_use]
    pub fn from_artworks(artworks: &[Artwork], prior_cover: &str) -> Self {
        let images: Vec<String> = artworks
            .iter()
            .map(|artwork| artwork.image.clone())
            .filter(|image| !image.is_empty())
            .collect();
        let cover_image = images
            .first()
            .cloned()
            .unwrap_or_else(|| prior_cover.to_owned());

        Self {
            images,
            cover_image,
            artwork_count: artworks.len() as u64,
        }
    }

    /// Whether `series` already holds exactly these derived values.
    #[must_use]
    #[inline]
    pub fn matches(&self, series: &Series) -> bool {
        self.images == series.images
            && self.cover_image == series.cover_image
            && self.artwork_count == series.artwork_count
    }
}

impl From<SeriesDerived> for SeriesChangeSet {
    #[inline]
    fn from(derived: SeriesDerived) -> Self {
        Self {
            images: Some(derived.images),
            cover_image: Some(derived.cover_image),
            artwork_count: Some(derived.artwork_count),
            ..Default::default()
        }
    }
}

/// The fields needed to create a series by hand.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewSeries {
    pub title: String,
    pub description: String,
    pub statement: String,
    pub year: String,
    pub cover_image: String,
    pub images: Vec<String>,
    pub featured: bool,
}

impl From<NewSeries> for Series {
    #[inline]
    fn from(new: NewSeries) -> Self {
        Self {
            id: Self::generate_id(),
            title: new.title,
            description: new.description,
            statement: new.statement,
            year: new.year,
            artwork_count: 0,
            cover_image: new.cover_image,
            images: new.images,
            featured: new.featured,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// A series as presented to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub statement: String,
    pub year: String,
    pub artwork_count: u64,
    pub cover_image: String,
    pub images: Vec<String>,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Series> for SeriesView {
    #[inline]
    fn from(series: Series) -> Self {
        Self {
            id: record_key(&series.id),
            created_at: datetime_to_string(series.created_at.as_ref()),
            updated_at: datetime_to_string(series.updated_at.as_ref()),
            title: series.title,
            description: series.description,
            statement: series.statement,
            year: series.year,
            artwork_count: series.artwork_count,
            cover_image: series.cover_image,
            images: series.images,
            featured: series.featured,
        }
    }
}
