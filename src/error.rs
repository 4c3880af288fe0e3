// src/error.rs
// =============================================================================
// Typed errors for everything that can go wrong during a crawl.
//
// - FetchError: one seed URL could not be downloaded. Recovered per URL.
// - ResolutionError: one href could not be turned into an absolute URL.
//   Recovered per reference.
// - SinkError: the output file could not be opened or written. Fatal.
// - CrawlError: what `run` surfaces when the whole run has to stop.
//
// We use `thiserror` here instead of `anyhow` so callers can match on the
// variant (the pipeline needs to know the HTTP status, the orchestrator needs
// to know a sink failure is fatal).
// =============================================================================

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to fetch one page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The seed is not a syntactically valid absolute URL
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The seed contains a tab or line break, which the output format cannot hold
    #[error("URL '{}' contains a tab or line break", .url.escape_debug())]
    ControlCharacter { url: String },

    /// Connection, DNS, TLS or redirect failure
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// The response body could not be read or decoded as text
    #[error("could not read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The URL this error belongs to.
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::ControlCharacter { url }
            | FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }

    /// HTTP status, if the failure happened after a response arrived.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport { source, .. } | FetchError::Body { source, .. } => {
                source.status()
            }
            FetchError::InvalidUrl { .. } | FetchError::ControlCharacter { .. } => None,
        }
    }
}

/// An href that cannot be resolved against its page.
#[derive(Debug, Error)]
#[error("cannot resolve '{reference}' against {base}: {source}")]
pub struct ResolutionError {
    pub reference: String,
    pub base: String,
    #[source]
    pub source: url::ParseError,
}

/// Failure of the shared output file. Nothing can be persisted after this.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot open output file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write to output: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors that stop a whole run.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
