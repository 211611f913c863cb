#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use requestarr_card::model::{
    AlbumSummary, CatalogItem, Category, ItemDetails, MediaRequest, QueueItem, RequestChannel,
    RequestOutcome, SeasonSummary,
};
use requestarr_card::{CardConfig, CatalogController, ChannelError, ChannelResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Search(Category, String),
    Submit(MediaRequest),
    FetchAlbums(i64),
    FetchQueue,
}

/// RequestChannel whose answers, latency and failures are set up per test
#[derive(Default)]
pub struct ScriptedChannel {
    searches: HashMap<(Category, String), Vec<CatalogItem>>,
    search_delays: HashMap<String, Duration>,
    failing_searches: HashSet<String>,
    outcome: Option<RequestOutcome>,
    submit_delay: Duration,
    submit_fails: bool,
    submit_hangs: bool,
    albums: HashMap<i64, Vec<AlbumSummary>>,
    album_delay: Duration,
    albums_fail: bool,
    queue: Vec<QueueItem>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_results(mut self, category: Category, query: &str, items: Vec<CatalogItem>) -> Self {
        self.searches.insert((category, query.to_string()), items);
        self
    }

    pub fn search_delay(mut self, query: &str, delay: Duration) -> Self {
        self.search_delays.insert(query.to_string(), delay);
        self
    }

    pub fn failing_search(mut self, query: &str) -> Self {
        self.failing_searches.insert(query.to_string());
        self
    }

    pub fn outcome(mut self, outcome: RequestOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    pub fn failing_submits(mut self) -> Self {
        self.submit_fails = true;
        self
    }

    pub fn hanging_submits(mut self) -> Self {
        self.submit_hangs = true;
        self
    }

    pub fn albums(mut self, artist_id: i64, albums: Vec<AlbumSummary>) -> Self {
        self.albums.insert(artist_id, albums);
        self
    }

    pub fn album_delay(mut self, delay: Duration) -> Self {
        self.album_delay = delay;
        self
    }

    pub fn failing_albums(mut self) -> Self {
        self.albums_fail = true;
        self
    }

    pub fn queue(mut self, queue: Vec<QueueItem>) -> Self {
        self.queue = queue;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<(Category, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Search(category, query) => Some((category, query)),
                _ => None,
            })
            .collect()
    }

    pub fn submitted(&self) -> Vec<MediaRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Submit(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn album_fetches(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::FetchAlbums(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl RequestChannel for ScriptedChannel {
    async fn search(&self, category: Category, query: &str) -> ChannelResult<Vec<CatalogItem>> {
        self.record(Call::Search(category, query.to_string()));
        pause(self.search_delays.get(query).copied().unwrap_or_default()).await;

        if self.failing_searches.contains(query) {
            return Err(ChannelError::Connection("connection refused".to_string()));
        }
        Ok(self
            .searches
            .get(&(category, query.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn submit(&self, request: &MediaRequest) -> ChannelResult<RequestOutcome> {
        self.record(Call::Submit(request.clone()));
        if self.submit_hangs {
            std::future::pending::<()>().await;
        }
        pause(self.submit_delay).await;

        if self.submit_fails {
            return Err(ChannelError::Timeout);
        }
        Ok(self.outcome.clone().unwrap_or_else(RequestOutcome::accepted))
    }

    async fn fetch_albums(&self, artist_id: i64) -> ChannelResult<Vec<AlbumSummary>> {
        self.record(Call::FetchAlbums(artist_id));
        pause(self.album_delay).await;

        if self.albums_fail {
            return Err(ChannelError::Backend {
                code: "500".to_string(),
                message: "Lidarr exploded".to_string(),
            });
        }
        Ok(self.albums.get(&artist_id).cloned().unwrap_or_default())
    }

    async fn fetch_queue(&self) -> ChannelResult<Vec<QueueItem>> {
        self.record(Call::FetchQueue);
        Ok(self.queue.clone())
    }
}

pub fn controller_with(channel: &Arc<ScriptedChannel>) -> CatalogController {
    CatalogController::new(&CardConfig::default(), channel.clone())
}

/// Past the default debounce, with room for zero-latency responses
pub const SETTLE: Duration = Duration::from_millis(400);

pub async fn settle() {
    tokio::time::sleep(SETTLE).await;
}

pub fn film(id: i64, title: &str) -> CatalogItem {
    CatalogItem {
        id,
        title: title.to_string(),
        year: Some(2012),
        overview: Some(format!("{title} overview")),
        poster_url: None,
        in_library: false,
        library_id: None,
        details: ItemDetails::Film {
            title_slug: title.to_lowercase().replace(' ', "-"),
        },
    }
}

pub fn series(id: i64, title: &str, seasons: &[u32]) -> CatalogItem {
    CatalogItem {
        id,
        title: title.to_string(),
        year: Some(2019),
        overview: None,
        poster_url: None,
        in_library: false,
        library_id: None,
        details: ItemDetails::Series {
            title_slug: title.to_lowercase().replace(' ', "-"),
            seasons: seasons
                .iter()
                .map(|&season_number| SeasonSummary {
                    season_number,
                    monitored: false,
                    total_episode_count: 8,
                    episode_file_count: 0,
                })
                .collect(),
        },
    }
}

pub fn artist(id: i64, title: &str) -> CatalogItem {
    CatalogItem {
        id,
        title: title.to_string(),
        year: None,
        overview: None,
        poster_url: None,
        in_library: false,
        library_id: None,
        details: ItemDetails::Artist {},
    }
}

pub fn album(album_id: i64, title: &str) -> AlbumSummary {
    AlbumSummary {
        album_id,
        title: title.to_string(),
        year: Some(2000),
        in_library: false,
        monitored: false,
        track_file_count: 0,
        total_track_count: 10,
    }
}
