//! Remote media catalog.
//!
//! This module provides the catalog side of the application:
//! - [`Catalog`] - the two read-only operations the browser needs
//! - [`GiphyClient`] - HTTP implementation against the GIPHY v1 API
//! - [`envelope`] - typed schema for the provider's JSON envelope
//! - [`FetchWorker`] - runs requests off the UI thread and posts completions back

use crate::model::{FetchError, ResultPage};

pub mod envelope;
pub mod giphy;
pub mod request;
pub mod worker;

pub use giphy::GiphyClient;
pub use request::{FeedMode, FetchCompletion, FetchRequest, LoadKind, RequestToken};
pub use worker::FetchWorker;

/// Number of items requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Read-only access to a GIF/sticker catalog.
///
/// Implementations must be shareable across the worker threads that execute
/// requests.
pub trait Catalog: Send + Sync {
    /// Provider-ordered trending feed.
    fn trending(&self, limit: usize, offset: usize) -> Result<ResultPage, FetchError>;

    /// Provider-ordered results for a non-empty, trimmed query.
    fn search(&self, query: &str, limit: usize, offset: usize) -> Result<ResultPage, FetchError>;
}

/// Execute a request against a catalog in the request's mode.
pub fn execute(catalog: &dyn Catalog, request: &FetchRequest) -> Result<ResultPage, FetchError> {
    match &request.mode {
        FeedMode::Trending => catalog.trending(request.limit, request.offset),
        FeedMode::Search(query) => catalog.search(query, request.limit, request.offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemId, ResultItem};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCatalog {
        calls: Mutex<Vec<String>>,
    }

    impl Catalog for RecordingCatalog {
        fn trending(&self, limit: usize, offset: usize) -> Result<ResultPage, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("trending:{limit}:{offset}"));
            Ok(vec![ResultItem::new(ItemId::new("t"), "", "", "")])
        }

        fn search(&self, query: &str, limit: usize, offset: usize) -> Result<ResultPage, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("search:{query}:{limit}:{offset}"));
            Ok(vec![])
        }
    }

    #[test]
    fn execute_routes_trending_requests() {
        let catalog = RecordingCatalog::default();
        let request = FetchRequest::new(RequestToken::first(), FeedMode::Trending, 24, 48, LoadKind::Append);

        let page = execute(&catalog, &request).unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(*catalog.calls.lock().unwrap(), vec!["trending:24:48"]);
    }

    #[test]
    fn execute_routes_search_requests_with_query() {
        let catalog = RecordingCatalog::default();
        let request = FetchRequest::new(
            RequestToken::first(),
            FeedMode::Search("pizza".to_string()),
            24,
            0,
            LoadKind::Replace,
        );

        execute(&catalog, &request).unwrap();

        assert_eq!(*catalog.calls.lock().unwrap(), vec!["search:pizza:24:0"]);
    }
}
