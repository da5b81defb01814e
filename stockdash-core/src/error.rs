//! Structured error type for the fetch-and-transform pipeline.
//!
//! Every variant renders to the exact text the dashboard shows in its error
//! panel, so `to_string()` is the error state.

use thiserror::Error;

/// Text shown when an error renders to an empty message.
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch stock data";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// The proxy answered with its `{ "error": ... }` envelope.
    #[error("{0}")]
    Proxy(String),

    /// The upstream embedded `chart.error` in its payload. Displays the
    /// description verbatim.
    #[error("{description}")]
    Upstream { code: String, description: String },

    #[error("network error: {0}")]
    Network(String),

    /// The proxy answered with a non-success status and no recognizable body.
    #[error("proxy returned HTTP {status}")]
    Http { status: u16 },

    #[error("malformed quote payload: {0}")]
    MalformedPayload(String),

    #[error("{0}")]
    Other(String),
}

impl DataError {
    /// Short category tag for the status bar and error history.
    pub fn category(&self) -> &'static str {
        match self {
            DataError::Proxy(_) | DataError::Http { .. } => "PROXY",
            DataError::Upstream { .. } => "UPSTREAM",
            DataError::Network(_) => "NET",
            DataError::MalformedPayload(_) => "DATA",
            DataError::Other(_) => "ERR",
        }
    }
}
