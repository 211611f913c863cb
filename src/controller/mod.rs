//! Controller module - Catalog operations and channel coordination
//!
//! This module contains the controller a presentation layer calls. It owns the
//! catalog state, talks to the request channel and publishes changes.
//! It is organized into submodules by responsibility:
//!
//! - `search`: Query input, debounce and category switching
//! - `requests`: Item and sub-item acquisition requests
//! - `expansion`: Expanding results and fetching their albums
//! - `queue`: Download queue refresh
//! - `input`: Text command handling for the terminal driver

mod search;
mod requests;
mod expansion;
mod queue;
mod input;

pub use input::{Command, CommandOutcome};

use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};

use crate::config::CardConfig;
use crate::model::{
    CatalogEvent, CatalogItem, CatalogModel, CatalogSnapshot, ItemKey, QueueItem, RequestChannel,
    RequestKey, RequestStatus,
};

/// Entry point for one widget instance.
///
/// Cloning is cheap; every clone drives the same state. The state lock is
/// never held while a channel call is outstanding.
#[derive(Clone)]
pub struct CatalogController {
    pub(crate) model: Arc<Mutex<CatalogModel>>,
    pub(crate) channel: Arc<dyn RequestChannel>,
}

impl CatalogController {
    pub fn new(config: &CardConfig, channel: Arc<dyn RequestChannel>) -> Self {
        let model = CatalogModel::new(
            config.default_category,
            config.debounce(),
            config.min_query_len,
        );
        Self {
            model: Arc::new(Mutex::new(model)),
            channel,
        }
    }

    pub async fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.model.lock().await.subscribe()
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.model.lock().await.snapshot()
    }

    /// Raw ledger status for `key`
    pub async fn status(&self, key: impl Into<RequestKey>) -> RequestStatus {
        self.model.lock().await.ledger.status(&key.into())
    }

    /// Ledger status, or `InLibrary` when an untouched key is already in the library
    pub async fn effective_status(&self, key: impl Into<RequestKey>) -> RequestStatus {
        self.model.lock().await.effective_status(&key.into())
    }

    pub async fn item(&self, key: ItemKey) -> Option<CatalogItem> {
        self.model.lock().await.find_item(&key).cloned()
    }

    pub async fn queue(&self) -> Vec<QueueItem> {
        self.model.lock().await.queue().to_vec()
    }
}
