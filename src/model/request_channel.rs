//! Contract of the asynchronous transport to the library-management backends

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ChannelResult;

use super::content::{AlbumSummary, CatalogItem, QueueItem};
use super::types::Category;

/// Error code a backend answers with when the target is already tracked
pub const ALREADY_EXISTS: &str = "already_exists";

/// Monitoring flag for one season inside a series request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRequest {
    pub season_number: u32,
    pub monitored: bool,
}

/// Payload of an acquisition request.
///
/// Series requests carry the monitoring flag of every known season: the
/// backend replaces its monitoring state wholesale on each call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaRequest {
    #[serde(rename_all = "camelCase")]
    Film {
        id: i64,
        title: String,
        title_slug: String,
    },
    #[serde(rename_all = "camelCase")]
    Series {
        id: i64,
        title: String,
        title_slug: String,
        seasons: Vec<SeasonRequest>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        library_id: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    Artist { artist_id: i64, title: String },
    #[serde(rename_all = "camelCase")]
    Album { artist_id: i64, album_id: i64 },
}

impl MediaRequest {
    /// Season numbers flagged as monitored, in payload order
    pub fn monitored_seasons(&self) -> Vec<u32> {
        match self {
            MediaRequest::Series { seasons, .. } => seasons
                .iter()
                .filter(|s| s.monitored)
                .map(|s| s.season_number)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Backend answer to a [`MediaRequest`]
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RequestOutcome {
    pub fn accepted() -> Self {
        Self { success: true, ..Self::default() }
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::rejected(ALREADY_EXISTS, message)
    }

    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_code: Some(code.into()),
            message: Some(message.into()),
        }
    }

    pub fn is_already_present(&self) -> bool {
        !self.success && self.error_code.as_deref() == Some(ALREADY_EXISTS)
    }
}

/// Asynchronous call/response transport used by the controller.
///
/// Implementations never need to support cancellation: results the
/// controller no longer cares about are dropped on arrival.
#[async_trait]
pub trait RequestChannel: Send + Sync {
    /// Look up `query` in the catalog of one category
    async fn search(&self, category: Category, query: &str) -> ChannelResult<Vec<CatalogItem>>;

    async fn submit(&self, request: &MediaRequest) -> ChannelResult<RequestOutcome>;

    async fn fetch_albums(&self, artist_id: i64) -> ChannelResult<Vec<AlbumSummary>>;

    async fn fetch_queue(&self) -> ChannelResult<Vec<QueueItem>>;
}
