//! Search/pagination state machine (pure).
//!
//! `Browser` owns the query text, the result list, the paging offset and the
//! loading/error state. Every external event is a method call that returns
//! the fetch to perform, if any; nothing here does I/O except through the
//! [`LastSearch`] adapter and the clipboard handed in by the caller.
//!
//! Mode is derived from the settled query alone: blank means trending,
//! anything else is a search for the trimmed text.

use super::debounce::{Debounced, DEFAULT_DEBOUNCE};
use super::timer::{earliest, OneShot};
use crate::catalog::{FeedMode, FetchCompletion, FetchRequest, LoadKind, RequestToken, DEFAULT_PAGE_SIZE};
use crate::clipboard::ClipboardSink;
use crate::model::{ItemId, ResultItem};
use crate::persistence::{LastSearch, StorageChange};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long the "Copied!" badge stays on an item.
pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_millis(1200);

/// How long a copy failure message stays visible.
pub const DEFAULT_ERROR_FLASH: Duration = Duration::from_millis(1500);

/// Message shown when the clipboard write fails.
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy link";

/// Tunables fixed for the life of a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    /// Items per request.
    pub page_size: usize,
    /// Quiet period before the query settles.
    pub debounce: Duration,
    /// How long the copied badge stays on an item.
    pub copy_feedback: Duration,
    /// How long a copy failure message stays.
    pub error_flash: Duration,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            copy_feedback: DEFAULT_COPY_FEEDBACK,
            error_flash: DEFAULT_ERROR_FLASH,
        }
    }
}

// ===== PagingState =====

/// Offset-based paging position in the current feed.
///
/// `offset` is always a multiple of `page_size`: it counts pages requested
/// in the current mode, which can run ahead of the item count when a page
/// comes back short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingState {
    offset: usize,
    page_size: usize,
}

impl PagingState {
    /// Paging at offset 0.
    pub fn new(page_size: usize) -> Self {
        Self {
            offset: 0,
            page_size,
        }
    }

    /// Offset of the last page loaded.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Offset "load more" asks for.
    pub fn next_offset(&self) -> usize {
        self.offset + self.page_size
    }

    fn reset(&mut self) {
        self.offset = 0;
    }

    fn advance(&mut self) {
        self.offset = self.next_offset();
    }
}

// ===== Browser =====

/// The browser's complete state.
#[derive(Debug)]
pub struct Browser {
    settings: BrowserSettings,
    query: String,
    debounced: Debounced<String>,
    /// Trimmed settled query; decides the mode.
    settled: String,
    /// A fresh load has succeeded; "load more" has a feed to extend.
    loaded: bool,
    items: Vec<ResultItem>,
    paging: PagingState,
    next_token: RequestToken,
    in_flight: Option<RequestToken>,
    error: Option<String>,
    error_flash: OneShot<String>,
    copied: Option<ItemId>,
    copied_timer: OneShot<()>,
    last_search: LastSearch,
}

impl Browser {
    /// Idle browser with no items. Call [`bootstrap`](Self::bootstrap) next.
    pub fn new(last_search: LastSearch, settings: BrowserSettings) -> Self {
        Self {
            debounced: Debounced::new(String::new(), settings.debounce),
            paging: PagingState::new(settings.page_size),
            settings,
            query: String::new(),
            settled: String::new(),
            loaded: false,
            items: Vec::new(),
            next_token: RequestToken::first(),
            in_flight: None,
            error: None,
            error_flash: OneShot::new(),
            copied: None,
            copied_timer: OneShot::new(),
            last_search,
        }
    }

    // ===== Transitions =====

    /// Start-up transition.
    ///
    /// An explicit `initial_query`, else the persisted last search, is placed
    /// in the query line and settles through the debounce like typed input.
    /// With neither, the trending feed is requested immediately.
    pub fn bootstrap(&mut self, initial_query: Option<&str>, now: Instant) -> Option<FetchRequest> {
        let restored = initial_query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .or_else(|| Some(self.last_search.get().to_string()).filter(|q| !q.is_empty()));

        match restored {
            Some(query) => {
                info!(query = %query, "restoring search");
                self.items.clear();
                self.paging.reset();
                self.set_query(query, now);
                None
            }
            None => Some(self.issue(FeedMode::Trending, 0, LoadKind::Replace)),
        }
    }

    /// The query line changed.
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.query = query.into();
        self.debounced.observe(self.query.clone(), now);
    }

    /// Fire due timers. Returns the fetch to start when the query settled on
    /// a new value.
    pub fn tick(&mut self, now: Instant) -> Option<FetchRequest> {
        if self.copied_timer.poll(now).is_some() {
            self.copied = None;
        }

        if let Some(message) = self.error_flash.poll(now) {
            // Only clear the message this timer was scheduled for.
            if self.error.as_deref() == Some(message.as_str()) {
                self.error = None;
            }
        }

        let settled = self.debounced.poll(now)?;
        self.on_settled(&settled)
    }

    fn on_settled(&mut self, raw: &str) -> Option<FetchRequest> {
        let trimmed = raw.trim();
        if trimmed == self.settled {
            return None;
        }
        self.settled = trimmed.to_string();

        let mode = FeedMode::from_query(trimmed);
        match &mode {
            FeedMode::Trending => self.last_search.clear(),
            FeedMode::Search(query) => self.last_search.set(query),
        }
        debug!(mode = %mode, "query settled");
        Some(self.issue(mode, 0, LoadKind::Replace))
    }

    /// Request the next page in the current mode.
    ///
    /// Ignored while a fetch is in flight, and before any feed has loaded.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if self.is_loading() {
            debug!("load more ignored: fetch in flight");
            return None;
        }

        if !self.loaded {
            debug!("load more ignored: no feed loaded yet");
            return None;
        }

        Some(self.issue(self.mode(), self.paging.next_offset(), LoadKind::Append))
    }

    fn issue(&mut self, mode: FeedMode, offset: usize, kind: LoadKind) -> FetchRequest {
        let token = self.next_token;
        self.next_token = token.next();
        self.in_flight = Some(token);
        self.error = None;
        self.error_flash.cancel();

        FetchRequest::new(token, mode, self.settings.page_size, offset, kind)
    }

    /// Apply a finished fetch.
    ///
    /// Completions of superseded requests are dropped. Returns `true` if the
    /// state changed.
    pub fn complete(&mut self, completion: FetchCompletion) -> bool {
        let FetchCompletion { request, result } = completion;

        if self.in_flight != Some(request.token) {
            debug!(
                token = request.token.get(),
                mode = %request.mode,
                "discarding superseded fetch"
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                debug!(
                    mode = %request.mode,
                    offset = request.offset,
                    count = page.len(),
                    "fetch succeeded"
                );
                match request.kind {
                    LoadKind::Replace => {
                        self.items = page;
                        self.paging.reset();
                        self.loaded = true;
                    }
                    LoadKind::Append => {
                        self.items.extend(page);
                        self.paging.advance();
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, mode = %request.mode, "fetch failed");
                self.error = Some(e.to_string());
            }
        }

        true
    }

    /// Copy the URL of the item at `index`.
    ///
    /// On success the item is marked copied until the feedback timer fires;
    /// a later copy replaces the mark and restarts the timer. On failure a
    /// transient error message is shown. Returns `true` if the copy succeeded.
    pub fn copy_item(&mut self, index: usize, clipboard: &mut dyn ClipboardSink, now: Instant) -> bool {
        let Some(item) = self.items.get(index) else {
            return false;
        };
        let id = item.id().clone();

        match clipboard.write_text(item.copy_url()) {
            Ok(()) => {
                info!(id = %id, "copied item URL");
                self.copied = Some(id);
                self.copied_timer.schedule(now, self.settings.copy_feedback, ());
                true
            }
            Err(e) => {
                warn!(error = %e, id = %id, "copy failed");
                self.error = Some(COPY_FAILED_MESSAGE.to_string());
                self.error_flash
                    .schedule(now, self.settings.error_flash, COPY_FAILED_MESSAGE.to_string());
                false
            }
        }
    }

    /// Another instance changed the shared store.
    pub fn apply_storage_change(&mut self, change: &StorageChange) -> bool {
        self.last_search.apply_change(change)
    }

    /// Cancel every pending timer. Called on teardown.
    pub fn shutdown(&mut self) {
        self.debounced.cancel();
        self.copied_timer.cancel();
        self.error_flash.cancel();
    }

    /// Earliest instant at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([
            self.debounced.deadline(),
            self.copied_timer.deadline(),
            self.error_flash.deadline(),
        ])
    }

    // ===== Queries =====

    /// Raw query line text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Trimmed settled query.
    pub fn settled_query(&self) -> &str {
        &self.settled
    }

    /// Current mode, derived from the settled query.
    pub fn mode(&self) -> FeedMode {
        FeedMode::from_query(&self.settled)
    }

    /// Whether any fresh load has succeeded, enabling "load more".
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    /// Loaded items in provider order.
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// Current paging position.
    pub fn paging(&self) -> PagingState {
        self.paging
    }

    /// Shorthand for `paging().offset()`.
    pub fn offset(&self) -> usize {
        self.paging.offset()
    }

    /// A fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Typed input that has not settled yet.
    pub fn is_settling(&self) -> bool {
        self.debounced.is_settling()
    }

    /// Message of the last failed fetch or copy, until cleared.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A finished fetch produced nothing to show. Not an error.
    pub fn no_results(&self) -> bool {
        !self.is_loading() && self.items.is_empty()
    }

    /// Item showing the copied badge.
    pub fn copied_id(&self) -> Option<&ItemId> {
        self.copied.as_ref()
    }

    /// Persisted last search, as mirrored in memory.
    pub fn last_search(&self) -> &str {
        self.last_search.get()
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
