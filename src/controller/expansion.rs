//! Expanding search results and lazily fetching artist albums

use crate::model::{AlbumSummary, CatalogEvent, ItemKey};

use super::CatalogController;

impl CatalogController {
    /// Toggles the expanded flag of a result. Expanding an artist for the
    /// first time in this result set fetches its albums; series seasons are
    /// already embedded and never fetched.
    ///
    /// Returns the new expanded state.
    pub async fn expand(&self, key: ItemKey) -> bool {
        let expanded = {
            let mut model = self.model.lock().await;
            let expanded = model.expansions.toggle(key);
            model.notify(CatalogEvent::ExpansionChanged(key));
            expanded
        };

        if expanded {
            self.ensure_fetched(key).await;
        }
        expanded
    }

    /// Fetches the albums of an artist result unless they were fetched (or
    /// are being fetched) already. No-op for other categories.
    pub async fn ensure_fetched(&self, key: ItemKey) {
        let ticket = {
            let mut model = self.model.lock().await;
            let Some(item) = model.find_item(&key) else {
                return;
            };
            if !item.has_lazy_children() {
                return;
            }
            let Some(ticket) = model.expansions.begin_fetch(key.id) else {
                tracing::trace!(artist_id = key.id, "Albums already cached");
                return;
            };
            model.notify(CatalogEvent::ExpansionChanged(key));
            ticket
        };

        crate::log_channel_request!("fetch_albums", artist_id = key.id);
        let result = self.channel.fetch_albums(key.id).await;
        crate::log_channel_result!("fetch_albums", result);
        let albums = result.unwrap_or_default();
        let count = albums.len();

        let mut model = self.model.lock().await;
        if model.expansions.finish_fetch(ticket, albums) {
            tracing::debug!(artist_id = key.id, albums = count, "Albums cached");
            model.notify(CatalogEvent::ExpansionChanged(key));
        }
    }

    pub async fn is_expanded(&self, key: ItemKey) -> bool {
        self.model.lock().await.expansions.is_expanded(&key)
    }

    /// Albums cached for an artist; `None` until the first fetch completes
    pub async fn albums(&self, artist_id: i64) -> Option<Vec<AlbumSummary>> {
        self.model
            .lock()
            .await
            .expansions
            .albums(artist_id)
            .map(<[AlbumSummary]>::to_vec)
    }

    pub async fn albums_loading(&self, artist_id: i64) -> bool {
        self.model.lock().await.expansions.is_loading(artist_id)
    }
}
