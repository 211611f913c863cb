//! Search results and the sub-resources nested under them

use serde::{Deserialize, Serialize};

use super::types::{Category, ItemKey, SubItemKey};

/// A season bundled with a series search result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season_number: u32,
    #[serde(default)]
    pub monitored: bool,
    #[serde(default)]
    pub total_episode_count: u32,
    #[serde(default)]
    pub episode_file_count: u32,
}

impl SeasonSummary {
    pub fn is_specials(&self) -> bool {
        self.season_number == 0
    }

    /// Every episode of a non-empty season has a file on disk
    pub fn in_library(&self) -> bool {
        self.total_episode_count > 0 && self.episode_file_count >= self.total_episode_count
    }
}

/// An album of an artist, fetched on first expansion
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub album_id: i64,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub in_library: bool,
    #[serde(default)]
    pub monitored: bool,
    #[serde(default)]
    pub track_file_count: u32,
    #[serde(default)]
    pub total_track_count: u32,
}

/// Category-specific part of a search result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ItemDetails {
    Film {
        #[serde(default)]
        title_slug: String,
    },
    Series {
        #[serde(default)]
        title_slug: String,
        #[serde(default)]
        seasons: Vec<SeasonSummary>,
    },
    Artist {},
}

/// A single search result
///
/// Never mutated once received; a new search response replaces the whole list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub in_library: bool,
    /// Id the backend tracks this item under, when it already knows it
    #[serde(default)]
    pub library_id: Option<i64>,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl CatalogItem {
    pub fn category(&self) -> Category {
        match self.details {
            ItemDetails::Film { .. } => Category::Film,
            ItemDetails::Series { .. } => Category::Series,
            ItemDetails::Artist {} => Category::Artist,
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.category(), self.id)
    }

    pub fn title_slug(&self) -> &str {
        match &self.details {
            ItemDetails::Film { title_slug } | ItemDetails::Series { title_slug, .. } => title_slug,
            ItemDetails::Artist {} => "",
        }
    }

    /// Seasons embedded in a series result; empty for other categories
    pub fn seasons(&self) -> &[SeasonSummary] {
        match &self.details {
            ItemDetails::Series { seasons, .. } => seasons,
            _ => &[],
        }
    }

    pub fn season(&self, season_number: u32) -> Option<&SeasonSummary> {
        self.seasons().iter().find(|s| s.season_number == season_number)
    }

    pub fn season_key(&self, season_number: u32) -> SubItemKey {
        SubItemKey::Season { series_id: self.id, season_number }
    }

    /// Whether expanding this item needs a fetch; seasons arrive with the result
    pub fn has_lazy_children(&self) -> bool {
        self.category() == Category::Artist
    }
}

/// One entry of a backend download queue
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub media_id: Option<i64>,
    /// Percent complete, 0 to 100
    #[serde(default)]
    pub progress: f32,
    #[serde(default)]
    pub time_left: String,
    #[serde(default)]
    pub status: String,
}
