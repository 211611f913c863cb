//! Acquisition requests for search results and their seasons/albums

use crate::model::{
    CatalogEvent, ItemKey, MediaRequest, RequestKey, RequestStatus, SubItemKey, album_payload,
    item_payload, season_payload,
};

use super::CatalogController;

impl CatalogController {
    /// Requests a whole search result: the film, every known season of a
    /// series, or an artist with all of its future albums.
    ///
    /// Returns the status the key ends up in. A call made while the same key
    /// is still `Requesting` is ignored and returns `Requesting`.
    pub async fn request_item(&self, key: ItemKey) -> RequestStatus {
        let payload = {
            let model = self.model.lock().await;
            model.find_item(&key).and_then(item_payload)
        };
        self.submit(RequestKey::Item(key), payload).await
    }

    /// Requests a single season or album
    pub async fn request_sub_item(&self, key: SubItemKey) -> RequestStatus {
        let payload = {
            let model = self.model.lock().await;
            let parent = model.find_item(&key.parent());
            match key {
                SubItemKey::Season { season_number, .. } => {
                    parent.and_then(|series| season_payload(series, season_number))
                }
                SubItemKey::Album { artist_id, album_id } => parent
                    .zip(model.find_album(artist_id, album_id))
                    .and_then(|(artist, album)| album_payload(artist, album)),
            }
        };
        self.submit(RequestKey::SubItem(key), payload).await
    }

    async fn submit(&self, key: RequestKey, payload: Option<MediaRequest>) -> RequestStatus {
        let Some(payload) = payload else {
            tracing::warn!(?key, "Request target is not part of the current results");
            return self.model.lock().await.ledger.status(&key);
        };

        let ticket = {
            let mut model = self.model.lock().await;
            let Some(ticket) = model.ledger.begin(key) else {
                tracing::debug!(?key, "Request already in flight, ignoring");
                return RequestStatus::Requesting;
            };
            model.notify(CatalogEvent::StatusChanged(key));
            ticket
        };

        crate::log_channel_request!("submit", ?key, monitored = ?payload.monitored_seasons());
        let result = self.channel.submit(&payload).await;
        crate::log_channel_result!("submit", result);

        let mut model = self.model.lock().await;
        match model.ledger.resolve(ticket, result) {
            Some(status) => {
                tracing::info!(?key, ?status, "Request finished");
                model.notify(CatalogEvent::StatusChanged(key));
                status
            }
            None => {
                tracing::debug!(?key, "Dropping request outcome for replaced results");
                model.ledger.status(&key)
            }
        }
    }
}
