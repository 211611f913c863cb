//! Model module - Catalog state and data types
//!
//! This module contains the state the controller mutates and the contract of
//! the transport it talks to. It is organized into submodules by responsibility:
//!
//! - `types`: Category, identity keys and request status
//! - `content`: Search results, seasons, albums, queue entries
//! - `search`: Debounced, sequence-guarded search session
//! - `ledger`: Request lifecycles and request payload builders
//! - `cache`: Expansion flags and memoized album lists
//! - `stats`: Library counters from the sensor snapshot
//! - `request_channel`: The asynchronous backend transport contract
//! - `fixture_channel`: In-memory transport over a JSON fixture
//! - `catalog_model`: The composed state with change notification

mod types;
mod content;
mod search;
mod ledger;
mod cache;
mod stats;
mod request_channel;
mod fixture_channel;
mod catalog_model;

// Re-export all public types for convenient access
pub use types::{Category, ItemKey, RequestKey, RequestStatus, SubItemKey};

pub use content::{AlbumSummary, CatalogItem, ItemDetails, QueueItem, SeasonSummary};

pub use search::{CategorySwitch, QueryChange, SearchDispatch, SearchSession};

pub use ledger::{
    CONNECTION_ERROR, GENERIC_REQUEST_ERROR, RequestLedger, SubmitTicket, album_payload,
    item_payload, item_payload_builder, season_payload, status_from_result,
};

pub use cache::{AlbumEntry, ExpansionCache, FetchTicket};

pub use stats::LibraryStats;

pub use request_channel::{
    ALREADY_EXISTS, MediaRequest, RequestChannel, RequestOutcome, SeasonRequest,
};

pub use fixture_channel::{FixtureCatalog, FixtureChannel};

pub use catalog_model::{CatalogEvent, CatalogModel, CatalogSnapshot};
