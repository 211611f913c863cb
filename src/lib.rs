//! Catalog search and request state for a media-request dashboard widget.
//!
//! A [`CatalogController`] debounces search input, keeps only the newest
//! search response, tracks the lifecycle of every acquisition request and
//! lazily fetches the albums of artist results. The backend is reached
//! through any [`RequestChannel`](model::RequestChannel) implementation.

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;

pub use config::CardConfig;
pub use controller::{CatalogController, Command, CommandOutcome};
pub use error::{ChannelError, ChannelResult};
