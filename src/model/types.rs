//! Core type definitions for the catalog

use std::fmt;

use serde::{Deserialize, Serialize};

/// Media kind a tab searches and requests against
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Film,
    Series,
    Artist,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Film, Category::Series, Category::Artist];

    pub fn next(self) -> Self {
        match self {
            Category::Film => Category::Series,
            Category::Series => Category::Artist,
            Category::Artist => Category::Film,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Category::Film => Category::Artist,
            Category::Series => Category::Film,
            Category::Artist => Category::Series,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Film => "Movies",
            Category::Series => "TV Shows",
            Category::Artist => "Music",
        }
    }

    /// Parses the short names used on the command line and in config files.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "film" | "films" | "movie" | "movies" => Some(Category::Film),
            "series" | "tv" | "show" | "shows" => Some(Category::Series),
            "artist" | "artists" | "music" => Some(Category::Artist),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of a top-level search result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub category: Category,
    pub id: i64,
}

impl ItemKey {
    pub fn new(category: Category, id: i64) -> Self {
        Self { category, id }
    }
}

/// Identity of a nested sub-resource (season of a series, album of an artist)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubItemKey {
    Season { series_id: i64, season_number: u32 },
    Album { artist_id: i64, album_id: i64 },
}

impl SubItemKey {
    /// Key of the search result this sub-item belongs to
    pub fn parent(self) -> ItemKey {
        match self {
            SubItemKey::Season { series_id, .. } => ItemKey::new(Category::Series, series_id),
            SubItemKey::Album { artist_id, .. } => ItemKey::new(Category::Artist, artist_id),
        }
    }
}

/// Key under which a request lifecycle is tracked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKey {
    Item(ItemKey),
    SubItem(SubItemKey),
}

impl From<ItemKey> for RequestKey {
    fn from(key: ItemKey) -> Self {
        RequestKey::Item(key)
    }
}

impl From<SubItemKey> for RequestKey {
    fn from(key: SubItemKey) -> Self {
        RequestKey::SubItem(key)
    }
}

/// Lifecycle of a single request
///
/// `Idle -> Requesting -> {Requested | InLibrary | Error}`. The terminal
/// states only go away when the result set they belong to is invalidated.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Requesting,
    Requested,
    InLibrary,
    Error(String),
}

impl RequestStatus {
    pub fn is_requesting(&self) -> bool {
        matches!(self, RequestStatus::Requesting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Requested | RequestStatus::InLibrary | RequestStatus::Error(_)
        )
    }

    pub fn label(&self) -> &str {
        match self {
            RequestStatus::Idle => "Request",
            RequestStatus::Requesting => "Requesting...",
            RequestStatus::Requested => "Requested",
            RequestStatus::InLibrary => "In Library",
            RequestStatus::Error(message) => message,
        }
    }
}
