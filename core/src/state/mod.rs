//! Shared state types handed from the daemon's services to its clients.

use serde::{Deserialize, Serialize};

use crate::config::StatsSettings;

/// One labelled figure on the home page, e.g. "Artworks Created: 120+".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub label: String,
    pub value: u64,
    pub suffix: String,
}

impl StatEntry {
    #[must_use]
    #[inline]
    pub fn new(label: &str, value: u64, suffix: &str) -> Self {
        Self {
            label: label.to_owned(),
            value,
            suffix: suffix.to_owned(),
        }
    }
}

/// Counts of the content tables, as read from the database.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCounts {
    pub artworks: u64,
    pub exhibitions: u64,
    pub series: u64,
    pub posts: u64,
}

impl ContentCounts {
    /// The entries shown on the home page, computed counts first, then the configured figures.
    #[must_use]
    pub fn into_entries(self, settings: &StatsSettings) -> Vec<StatEntry> {
        vec![
            StatEntry::new("Artworks Created", self.artworks, "+"),
            StatEntry::new("Exhibitions", self.exhibitions, ""),
            StatEntry::new("Series", self.series, ""),
            StatEntry::new("Journal Posts", self.posts, ""),
            StatEntry::new("Years Active", settings.years_active, ""),
            StatEntry::new("Awards Won", settings.awards_won, ""),
        ]
    }
}

/// The result of resynchronizing one series from its artworks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub series_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub updated: bool,
}

impl SyncOutcome {
    /// The series was rewritten from `image_count` images.
    #[must_use]
    #[inline]
    pub fn updated(series_title: String, image_count: usize) -> Self {
        Self {
            series_title,
            image_count: Some(image_count),
            error: None,
            updated: true,
        }
    }

    /// No artwork references the series, it was left as is.
    #[must_use]
    #[inline]
    pub fn untouched(series_title: String) -> Self {
        Self {
            series_title,
            image_count: Some(0),
            error: None,
            updated: false,
        }
    }

    #[must_use]
    #[inline]
    pub fn failed(series_title: String, error: String) -> Self {
        Self {
            series_title,
            image_count: None,
            error: Some(error),
            updated: false,
        }
    }
}
