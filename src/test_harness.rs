//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing by wrapping
//! TuiApp<TestBackend> with a scripted catalog, a recording clipboard and a
//! virtual clock.

use crate::catalog::{Catalog, FeedMode, FetchWorker};
use crate::clipboard::ClipboardSink;
use crate::model::{ClipboardError, FetchError, FetchOperation, ItemId, ResultItem, ResultPage};
use crate::persistence::{LastSearch, MemoryStore, DEFAULT_LAST_SEARCH_KEY};
use crate::state::{AppState, Browser, BrowserSettings};
use crate::view::TuiApp;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Convert a ratatui buffer to a string representation.
///
/// Captures the visual output character by character, preserving layout.
/// Empty trailing lines are removed.
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

// ===== FakeCatalog =====

/// In-process catalog with generated pages.
///
/// Trending items are `trend-<n>`, search items `<query>-<n>`, where `n` is the
/// absolute position in the feed. Individual queries can be scripted to
/// return fewer items or fail.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    calls: Mutex<Vec<(FeedMode, usize)>>,
    sizes: Mutex<HashMap<String, usize>>,
    failures: Mutex<HashMap<String, u16>>,
}

impl FakeCatalog {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Limit the total number of results for `query`.
    pub(crate) fn set_total(&self, query: &str, total: usize) {
        self.lock_sizes().insert(query.to_string(), total);
    }

    /// Make requests for `query` fail with HTTP `status`.
    pub(crate) fn fail_with_status(&self, query: &str, status: u16) {
        self.lock_failures().insert(query.to_string(), status);
    }

    /// Every (mode, offset) requested so far, in order.
    pub(crate) fn calls(&self) -> Vec<(FeedMode, usize)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn lock_sizes(&self) -> std::sync::MutexGuard<'_, HashMap<String, usize>> {
        self.sizes.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_failures(&self) -> std::sync::MutexGuard<'_, HashMap<String, u16>> {
        self.failures.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn page(
        &self,
        operation: FetchOperation,
        key: &str,
        prefix: &str,
        limit: usize,
        offset: usize,
    ) -> Result<ResultPage, FetchError> {
        if let Some(status) = self.lock_failures().get(key) {
            return Err(FetchError::Status {
                operation,
                status: *status,
                detail: None,
            });
        }

        let total = self.lock_sizes().get(key).copied().unwrap_or(usize::MAX);
        let end = offset.saturating_add(limit).min(total);
        Ok((offset..end.max(offset))
            .map(|n| {
                ResultItem::new(
                    ItemId::new(format!("{prefix}-{n}")),
                    format!("{prefix} {n}"),
                    format!("https://media.test/{prefix}/{n}/200w.gif"),
                    format!("https://media.test/{prefix}/{n}/giphy.gif"),
                )
            })
            .collect())
    }
}

impl Catalog for FakeCatalog {
    fn trending(&self, limit: usize, offset: usize) -> Result<ResultPage, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((FeedMode::Trending, offset));
        }
        self.page(FetchOperation::Trending, "", "trend", limit, offset)
    }

    fn search(&self, query: &str, limit: usize, offset: usize) -> Result<ResultPage, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((FeedMode::Search(query.to_string()), offset));
        }
        self.page(FetchOperation::Search, query, query, limit, offset)
    }
}

// ===== RecordingClipboard =====

/// Clipboard that records writes and can be switched to failing.
#[derive(Clone, Default)]
pub(crate) struct RecordingClipboard {
    written: Rc<RefCell<Vec<String>>>,
    failing: Rc<Cell<bool>>,
}

impl RecordingClipboard {
    pub(crate) fn written(&self) -> Vec<String> {
        self.written.borrow().clone()
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl ClipboardSink for RecordingClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.failing.get() {
            return Err(ClipboardError("no clipboard in test".to_string()));
        }
        self.written.borrow_mut().push(text.to_string());
        Ok(())
    }
}

// ===== AcceptanceTestHarness =====

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend>. Time only moves when the test calls
/// [`advance`](Self::advance); fetches run on real worker threads and are
/// awaited with [`settle`](Self::settle).
pub(crate) struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    catalog: Arc<FakeCatalog>,
    clipboard: RecordingClipboard,
    store: MemoryStore,
    now: Instant,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Harness with an empty store and an 80x24 terminal.
    pub(crate) fn new() -> Self {
        Self::with_store(MemoryStore::new(), 80, 24)
    }

    /// Harness whose store already holds `last_search`.
    pub(crate) fn with_last_search(last_search: &str) -> Self {
        let mut store = MemoryStore::new();
        crate::persistence::KeyValueStore::set(&mut store, DEFAULT_LAST_SEARCH_KEY, last_search)
            .expect("memory store write");
        Self::with_store(store, 80, 24)
    }

    pub(crate) fn with_store(store: MemoryStore, width: u16, height: u16) -> Self {
        let catalog = FakeCatalog::new();
        let clipboard = RecordingClipboard::default();
        let terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");

        let last_search = LastSearch::new(Box::new(store.clone()), DEFAULT_LAST_SEARCH_KEY);
        let browser = Browser::new(last_search, BrowserSettings::default());
        let worker = FetchWorker::new(catalog.clone());

        let app = TuiApp::new_for_test(terminal, browser, worker, Box::new(clipboard.clone()));

        Self {
            app,
            catalog,
            clipboard,
            store,
            now: Instant::now(),
            running: true,
        }
    }

    /// Bootstrap the app and wait for the first fetch, if any.
    pub(crate) fn start(&mut self) {
        self.app.start(None, self.now);
        self.settle();
    }

    /// Bootstrap with an explicit initial query.
    pub(crate) fn start_with_query(&mut self, query: &str) {
        self.app.start(Some(query), self.now);
        self.settle();
    }

    /// Move the virtual clock forward and run due timers.
    ///
    /// Any fetch started by a timer is awaited before returning.
    pub(crate) fn advance(&mut self, by: Duration) {
        self.now += by;
        self.app.pump_test(self.now);
        self.settle();
    }

    /// Block until no fetch is in flight.
    pub(crate) fn settle(&mut self) {
        while self.app.browser().is_loading() {
            match self.app.worker().wait(Duration::from_secs(5)) {
                Some(completion) => {
                    self.app.complete_test(completion);
                }
                None => panic!("fetch did not complete within 5s"),
            }
        }
    }

    /// Send a key with no modifiers. Returns true if the app quit.
    pub(crate) fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    pub(crate) fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }
        let quit = self.app.handle_key_test(KeyEvent::new(key, mods), self.now);
        if quit {
            self.running = false;
        }
        quit
    }

    /// Type each character of `text` at the current virtual time.
    pub(crate) fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            let mods = if ch.is_ascii_uppercase() {
                KeyModifiers::SHIFT
            } else {
                KeyModifiers::NONE
            };
            self.send_key_with_mods(KeyCode::Char(ch), mods);
        }
    }

    pub(crate) fn state(&self) -> &AppState {
        self.app.app_state()
    }

    pub(crate) fn browser(&self) -> &Browser {
        self.app.browser()
    }

    pub(crate) fn catalog(&self) -> &FakeCatalog {
        &self.catalog
    }

    pub(crate) fn clipboard(&self) -> &RecordingClipboard {
        &self.clipboard
    }

    pub(crate) fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    /// Render a frame and return the screen as text.
    pub(crate) fn render_to_string(&mut self) -> String {
        self.app.render_test().expect("render");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
