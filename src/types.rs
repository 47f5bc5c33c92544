use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Substituted for the display date when a feed entry carries no
/// parsable published timestamp.
pub const DATE_UNKNOWN: &str = "date unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    /// Empty string when the feed provides no summary.
    pub summary: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// Per-run derived form of a feed entry, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedEntry {
    pub original: FeedEntry,
    pub translated_title: String,
    pub translated_summary: String,
    pub display_date: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("feed fetch failed: {0}")]
    FeedFetch(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed parse error: {0}")]
    Parse(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("write error: {0}")]
    Write(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Failure of a single translation call. Never crosses the port boundary:
/// it is converted into an inline sentinel string instead of aborting the run.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("empty response from provider")]
    EmptyResponse,
}
