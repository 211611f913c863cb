//! State owned by one catalog widget, with change notification

use std::time::Duration;

use tokio::sync::broadcast;

use super::cache::ExpansionCache;
use super::content::{AlbumSummary, CatalogItem, QueueItem};
use super::ledger::RequestLedger;
use super::search::SearchSession;
use super::types::{Category, ItemKey, RequestKey, RequestStatus, SubItemKey};

const EVENT_CAPACITY: usize = 64;

/// Change notifications for whatever renders the widget
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogEvent {
    CategoryChanged(Category),
    LoadingChanged(bool),
    ResultsChanged,
    StatusChanged(RequestKey),
    ExpansionChanged(ItemKey),
    QueueChanged,
}

/// Owned copy of what a presentation layer needs to draw the result list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub category: Category,
    pub query: String,
    pub loading: bool,
    pub results: Vec<CatalogItem>,
}

pub struct CatalogModel {
    pub search: SearchSession,
    pub ledger: RequestLedger,
    pub expansions: ExpansionCache,
    queue: Vec<QueueItem>,
    events: broadcast::Sender<CatalogEvent>,
}

impl CatalogModel {
    pub fn new(category: Category, debounce: Duration, min_query_len: usize) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            search: SearchSession::new(category, debounce, min_query_len),
            ledger: RequestLedger::new(),
            expansions: ExpansionCache::new(),
            queue: Vec::new(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    pub fn notify(&self, event: CatalogEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            category: self.search.category(),
            query: self.search.query().to_string(),
            loading: self.search.is_loading(),
            results: self.search.results().to_vec(),
        }
    }

    /// Drops every status and expansion tied to the current result set.
    /// Called in the same critical section that replaces the results.
    pub fn invalidate_result_set(&mut self) {
        self.ledger.clear();
        self.expansions.clear();
        self.notify(CatalogEvent::ResultsChanged);
    }

    pub fn find_item(&self, key: &ItemKey) -> Option<&CatalogItem> {
        self.search.results().iter().find(|item| item.key() == *key)
    }

    pub fn find_album(&self, artist_id: i64, album_id: i64) -> Option<&AlbumSummary> {
        self.expansions.album(artist_id, album_id)
    }

    /// Ledger status, falling back to what the metadata already says
    pub fn effective_status(&self, key: &RequestKey) -> RequestStatus {
        let status = self.ledger.status(key);
        if status != RequestStatus::Idle {
            return status;
        }

        let known_in_library = match *key {
            RequestKey::Item(item_key) => self.find_item(&item_key).is_some_and(|i| i.in_library),
            RequestKey::SubItem(SubItemKey::Season { series_id, season_number }) => self
                .find_item(&ItemKey::new(Category::Series, series_id))
                .and_then(|series| series.season(season_number))
                .is_some_and(|season| season.in_library()),
            RequestKey::SubItem(SubItemKey::Album { artist_id, album_id }) => self
                .find_album(artist_id, album_id)
                .is_some_and(|album| album.in_library),
        };

        if known_in_library { RequestStatus::InLibrary } else { RequestStatus::Idle }
    }

    pub fn queue(&self) -> &[QueueItem] {
        &self.queue
    }

    pub fn set_queue(&mut self, queue: Vec<QueueItem>) {
        self.queue = queue;
        self.notify(CatalogEvent::QueueChanged);
    }

    pub fn queue_entry_for(&self, item: &CatalogItem) -> Option<&QueueItem> {
        let library_id = item.library_id?;
        self.queue
            .iter()
            .find(|q| q.category == item.category() && q.media_id == Some(library_id))
    }
}
