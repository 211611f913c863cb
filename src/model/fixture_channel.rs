//! In-memory [`RequestChannel`] backed by a JSON catalog fixture

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::error::ChannelResult;

use super::content::{AlbumSummary, CatalogItem, QueueItem};
use super::request_channel::{MediaRequest, RequestChannel, RequestOutcome};
use super::types::Category;

/// On-disk shape of a fixture file
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FixtureCatalog {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub albums: HashMap<i64, Vec<AlbumSummary>>,
    #[serde(default)]
    pub queue: Vec<QueueItem>,
    #[serde(default)]
    pub sensors: HashMap<String, String>,
}

/// Serves searches and accepts requests against a fixed catalog, remembering
/// what was requested so a repeat request answers `already_exists`.
pub struct FixtureChannel {
    catalog: RwLock<FixtureCatalog>,
    latency: Duration,
}

impl FixtureChannel {
    pub fn new(catalog: FixtureCatalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            latency: Duration::ZERO,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: FixtureCatalog = serde_json::from_str(json).context("invalid fixture JSON")?;
        Ok(Self::new(catalog))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Delays every call, to make loading states visible
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn sensors(&self) -> HashMap<String, String> {
        self.catalog.read().await.sensors.clone()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn mark_item(catalog: &mut FixtureCatalog, category: Category, id: i64) -> RequestOutcome {
        let Some(item) = catalog
            .items
            .iter_mut()
            .find(|i| i.category() == category && i.id == id)
        else {
            return RequestOutcome::rejected("not_found", format!("{category} {id} not found"));
        };

        if item.in_library {
            return RequestOutcome::already_exists(format!("{} is already in the library", item.title));
        }
        item.in_library = true;
        RequestOutcome::accepted()
    }

    fn mark_album(catalog: &mut FixtureCatalog, artist_id: i64, album_id: i64) -> RequestOutcome {
        let Some(album) = catalog
            .albums
            .get_mut(&artist_id)
            .and_then(|albums| albums.iter_mut().find(|a| a.album_id == album_id))
        else {
            return RequestOutcome::rejected("not_found", format!("album {album_id} not found"));
        };

        if album.in_library {
            return RequestOutcome::already_exists(format!("{} is already in the library", album.title));
        }
        album.in_library = true;
        album.monitored = true;
        RequestOutcome::accepted()
    }
}

#[async_trait]
impl RequestChannel for FixtureChannel {
    async fn search(&self, category: Category, query: &str) -> ChannelResult<Vec<CatalogItem>> {
        self.simulate_latency().await;
        let needle = query.to_lowercase();
        let catalog = self.catalog.read().await;
        Ok(catalog
            .items
            .iter()
            .filter(|item| item.category() == category)
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn submit(&self, request: &MediaRequest) -> ChannelResult<RequestOutcome> {
        self.simulate_latency().await;
        let mut catalog = self.catalog.write().await;
        let outcome = match request {
            MediaRequest::Film { id, .. } => Self::mark_item(&mut catalog, Category::Film, *id),
            MediaRequest::Series { id, .. } => Self::mark_item(&mut catalog, Category::Series, *id),
            MediaRequest::Artist { artist_id, .. } => {
                Self::mark_item(&mut catalog, Category::Artist, *artist_id)
            }
            MediaRequest::Album { artist_id, album_id } => {
                Self::mark_album(&mut catalog, *artist_id, *album_id)
            }
        };
        tracing::debug!(?request, success = outcome.success, "Fixture handled request");
        Ok(outcome)
    }

    async fn fetch_albums(&self, artist_id: i64) -> ChannelResult<Vec<AlbumSummary>> {
        self.simulate_latency().await;
        let catalog = self.catalog.read().await;
        Ok(catalog.albums.get(&artist_id).cloned().unwrap_or_default())
    }

    async fn fetch_queue(&self) -> ChannelResult<Vec<QueueItem>> {
        self.simulate_latency().await;
        Ok(self.catalog.read().await.queue.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "items": [
            {"id": 1, "title": "Avengers: Endgame", "category": "film", "title_slug": "avengers-endgame"},
            {"id": 2, "title": "The Avengers", "category": "film", "in_library": true},
            {"id": 3, "title": "Avenue 5", "category": "series", "seasons": [{"season_number": 1}]},
            {"id": 4, "title": "Aventura", "category": "artist"}
        ],
        "albums": {
            "4": [{"album_id": 40, "title": "We Broke the Rules"}]
        },
        "sensors": {"sensor.requestarr_radarr_movies": "2"}
    }"#;

    #[tokio::test]
    async fn search_filters_by_category_and_title() {
        let channel = FixtureChannel::from_json(FIXTURE).unwrap();

        let films = channel.search(Category::Film, "AVEN").await.unwrap();
        assert_eq!(films.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2]);

        let series = channel.search(Category::Series, "aven").await.unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].seasons().len(), 1);
    }

    #[tokio::test]
    async fn repeated_request_reports_already_exists() {
        let channel = FixtureChannel::from_json(FIXTURE).unwrap();
        let request = MediaRequest::Film {
            id: 1,
            title: "Avengers: Endgame".to_string(),
            title_slug: "avengers-endgame".to_string(),
        };

        assert!(channel.submit(&request).await.unwrap().success);
        assert!(channel.submit(&request).await.unwrap().is_already_present());
    }

    #[tokio::test]
    async fn album_requests_mark_album_monitored() {
        let channel = FixtureChannel::from_json(FIXTURE).unwrap();
        let request = MediaRequest::Album { artist_id: 4, album_id: 40 };

        assert!(channel.submit(&request).await.unwrap().success);
        let albums = channel.fetch_albums(4).await.unwrap();
        assert!(albums[0].in_library && albums[0].monitored);
        assert!(channel.fetch_albums(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_target_is_rejected_with_message() {
        let channel = FixtureChannel::from_json(FIXTURE).unwrap();
        let outcome = channel
            .submit(&MediaRequest::Artist { artist_id: 404, title: "Nobody".to_string() })
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.error_code.as_deref(), Some("not_found"));
        assert_eq!(channel.sensors().await.len(), 1);
    }
}
