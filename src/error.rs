//! Errors raised by a [`RequestChannel`](crate::model::RequestChannel)

use thiserror::Error;

/// Transport-level failure of a channel call.
///
/// Backend refusals that still produce a response (for example an item that
/// already exists) are not errors; they come back as a
/// [`RequestOutcome`](crate::model::RequestOutcome).
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out")]
    Timeout,

    #[error("backend rejected call ({code}): {message}")]
    Backend { code: String, message: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ChannelError {
    fn from(err: serde_json::Error) -> Self {
        ChannelError::Decode(err.to_string())
    }
}

pub type ChannelResult<T> = std::result::Result<T, ChannelError>;
