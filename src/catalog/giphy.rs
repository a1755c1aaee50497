//! GIPHY v1 HTTP client.

use super::envelope::{Envelope, ErrorBody};
use super::Catalog;
use crate::model::{FetchError, FetchOperation, ResultPage};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.giphy.com/v1";

const TRENDING_PATH: &str = "gifs/trending";
const SEARCH_PATH: &str = "stickers/search";

/// Blocking GIPHY client.
///
/// Cheap to share: the underlying `reqwest` client pools connections and is
/// `Send + Sync`.
#[derive(Debug, Clone)]
pub struct GiphyClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl GiphyClient {
    /// Build a client for `base_url` (no trailing slash needed).
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the TLS backend cannot be initialised.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(concat!("gifgrid/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get_page(
        &self,
        operation: FetchOperation,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<ResultPage, FetchError> {
        let url = self.endpoint(path);
        debug!(%url, ?operation, "catalog request");

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .map_err(|e| FetchError::Transport {
                operation,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies are best-effort; the status code alone is enough.
            let detail = response.json::<ErrorBody>().ok().and_then(ErrorBody::message);
            return Err(FetchError::Status {
                operation,
                status: status.as_u16(),
                detail,
            });
        }

        let envelope: Envelope = response.json().map_err(|e| FetchError::Decode {
            operation,
            reason: e.to_string(),
        })?;

        Ok(envelope.into_page())
    }
}

impl Catalog for GiphyClient {
    fn trending(&self, limit: usize, offset: usize) -> Result<ResultPage, FetchError> {
        self.get_page(
            FetchOperation::Trending,
            TRENDING_PATH,
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
    }

    fn search(&self, query: &str, limit: usize, offset: usize) -> Result<ResultPage, FetchError> {
        self.get_page(
            FetchOperation::Search,
            SEARCH_PATH,
            &[
                ("q", query.to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ],
        )
    }
}
