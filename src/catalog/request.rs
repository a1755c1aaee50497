//! Fetch requests emitted by the browser state machine.

use crate::model::{FetchError, ResultPage};
use std::fmt;

/// Which feed the browser is showing.
///
/// Sum type enforces exactly one mode: trending when the settled query is
/// blank, search otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedMode {
    /// Provider's default trending feed.
    Trending,
    /// Results for a non-empty, trimmed query.
    Search(String),
}

impl FeedMode {
    /// Derive the mode from raw query text. Whitespace-only text is trending.
    pub fn from_query(query: &str) -> Self {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            FeedMode::Trending
        } else {
            FeedMode::Search(trimmed.to_string())
        }
    }

    /// True for [`FeedMode::Trending`].
    pub fn is_trending(&self) -> bool {
        matches!(self, FeedMode::Trending)
    }

    /// Query text in search mode.
    pub fn query(&self) -> Option<&str> {
        match self {
            FeedMode::Trending => None,
            FeedMode::Search(q) => Some(q),
        }
    }
}

impl fmt::Display for FeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedMode::Trending => write!(f, "trending"),
            FeedMode::Search(q) => write!(f, "search \"{q}\""),
        }
    }
}

/// Whether a completed page replaces the list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// Fresh trending/search load at offset 0.
    Replace,
    /// "Load more" at the next offset.
    Append,
}

/// Identifies one issued request.
///
/// Tokens increase monotonically; only the completion carrying the in-flight
/// token is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Token of the first request a browser issues.
    pub fn first() -> Self {
        Self(1)
    }

    /// The token issued after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw value, for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A catalog request to execute off the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Identifies this request among superseded ones.
    pub token: RequestToken,
    /// Feed to read from.
    pub mode: FeedMode,
    /// Page size.
    pub limit: usize,
    /// Absolute position of the first requested item.
    pub offset: usize,
    /// Whether the page replaces or extends the list.
    pub kind: LoadKind,
}

impl FetchRequest {
    /// Bundle a request.
    pub fn new(token: RequestToken, mode: FeedMode, limit: usize, offset: usize, kind: LoadKind) -> Self {
        Self {
            token,
            mode,
            limit,
            offset,
            kind,
        }
    }
}

/// Result of executing a [`FetchRequest`], posted back to the UI thread.
#[derive(Debug, Clone)]
pub struct FetchCompletion {
    /// The request as issued.
    pub request: FetchRequest,
    /// Page on success.
    pub result: Result<ResultPage, FetchError>,
}
