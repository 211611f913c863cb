//! Download queue refresh

use crate::model::{ItemKey, QueueItem};

use super::CatalogController;

impl CatalogController {
    /// Replaces the held queue with the backend's current one. An unreachable
    /// backend yields an empty queue.
    pub async fn refresh_queue(&self) -> usize {
        crate::log_channel_request!("fetch_queue");
        let result = self.channel.fetch_queue().await;
        crate::log_channel_result!("fetch_queue", result);
        let queue = result.unwrap_or_default();
        let count = queue.len();

        self.model.lock().await.set_queue(queue);
        count
    }

    /// Queue entry downloading the given search result, if any
    pub async fn queue_entry_for(&self, key: ItemKey) -> Option<QueueItem> {
        let model = self.model.lock().await;
        let item = model.find_item(&key)?;
        model.queue_entry_for(item).cloned()
    }
}
