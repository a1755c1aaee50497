//! TUI rendering and terminal management (impure shell)
//!
//! `TuiApp` owns the terminal and every I/O handle: the fetch worker, the
//! store watcher and the clipboard. It turns terminal events, fetch
//! completions, store changes and timer deadlines into calls on the pure
//! [`Browser`] and [`AppState`], then redraws.

pub mod constants;
mod grid;
mod help;
mod layout;
mod search_input;
mod styles;

pub use grid::{grid_columns, truncate_to_width, ResultGrid, COPIED_BADGE};
pub use layout::{render_layout, LOADING_TEXT, LOAD_MORE_HINT, NO_RESULTS_TEXT};
pub use search_input::SearchBar;
pub use styles::{ColorConfig, Styles};

use crate::catalog::{FetchRequest, FetchWorker};
use crate::clipboard::ClipboardSink;
use crate::config::KeyBindings;
use crate::model::KeyAction;
use crate::persistence::StoreWatcher;
use crate::state::{handle_grid_action, search_input_handler, AppState, Browser, FocusPane, SearchInput};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Longest the loop sleeps before checking fetches and the store watcher.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    browser: Browser,
    app_state: AppState,
    worker: FetchWorker,
    watcher: Option<StoreWatcher>,
    clipboard: Box<dyn ClipboardSink>,
    key_bindings: KeyBindings,
    styles: Styles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        browser: Browser,
        worker: FetchWorker,
        watcher: Option<StoreWatcher>,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::with_terminal(terminal, browser, worker, watcher, clipboard))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Sleeps until the next terminal event, the
    /// next timer deadline, or `POLL_INTERVAL`, whichever comes first.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let now = Instant::now();
            let timeout = self
                .browser
                .next_deadline()
                .map_or(POLL_INTERVAL, |deadline| {
                    deadline.saturating_duration_since(now).min(POLL_INTERVAL)
                });

            let mut dirty = false;
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key_at(key, Instant::now()) {
                            info!("quit requested");
                            self.browser.shutdown();
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        debug!("Handling resize to {}x{}", width, height);
                        dirty = true;
                    }
                    _ => {}
                }
            }

            dirty |= self.pump(Instant::now());

            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_terminal(
        terminal: Terminal<B>,
        browser: Browser,
        worker: FetchWorker,
        watcher: Option<StoreWatcher>,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            terminal,
            browser,
            app_state: AppState::new(),
            worker,
            watcher,
            clipboard,
            key_bindings: KeyBindings::default(),
            styles: Styles::default(),
        }
    }

    /// Restore the last search (or `initial_query`) and start the first fetch.
    pub fn start(&mut self, initial_query: Option<&str>, now: Instant) {
        let request = self.browser.bootstrap(initial_query, now);
        self.app_state.input = SearchInput::with_text(self.browser.query());
        if !self.browser.query().is_empty() {
            self.app_state.focus_grid();
        }
        self.dispatch(request);
    }

    fn dispatch(&self, request: Option<FetchRequest>) {
        if let Some(request) = request {
            self.worker.dispatch(request);
        }
    }

    /// Apply everything that happened since the last call: finished fetches,
    /// external store changes and due timers.
    ///
    /// Returns true if the screen needs a redraw.
    fn pump(&mut self, now: Instant) -> bool {
        let mut dirty = false;

        for completion in self.worker.poll() {
            dirty |= self.browser.complete(completion);
        }

        // The watcher also reports this process's own writes; LastSearch
        // ignores a change equal to its mirror, so those are no-ops.
        if let Some(watcher) = self.watcher.as_mut() {
            for change in watcher.poll_changes() {
                dirty |= self.browser.apply_storage_change(&change);
            }
        }

        let had_timers = self.browser.next_deadline().is_some_and(|d| d <= now);
        let request = self.browser.tick(now);
        dirty |= had_timers;
        self.dispatch(request);

        dirty
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        // Ctrl+C always quits, even while typing
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app_state.help_visible {
            return self.handle_help_key(key);
        }

        match self.app_state.focus {
            FocusPane::Search => {
                self.handle_search_key(key, now);
                false
            }
            FocusPane::Grid => self.handle_grid_key(key, now),
        }
    }

    /// While help is open only closing it or quitting does anything.
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        match self.key_bindings.get(key) {
            Some(KeyAction::Quit) => true,
            Some(KeyAction::ToggleHelp) => {
                self.app_state.toggle_help();
                false
            }
            _ => {
                if key.code == KeyCode::Esc {
                    self.app_state.toggle_help();
                }
                false
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        let input = self.app_state.input.clone();

        let edited = match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                search_input_handler::handle_char_input(input, ch)
            }
            KeyCode::Backspace => search_input_handler::handle_backspace(input),
            KeyCode::Delete => search_input_handler::handle_delete(input),
            KeyCode::Left => search_input_handler::handle_cursor_left(input),
            KeyCode::Right => search_input_handler::handle_cursor_right(input),
            KeyCode::Home => search_input_handler::handle_home(input),
            KeyCode::End => search_input_handler::handle_end(input),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                search_input_handler::clear_input(input)
            }
            KeyCode::Esc if !input.text.is_empty() => search_input_handler::clear_input(input),
            KeyCode::Esc | KeyCode::Tab | KeyCode::Enter | KeyCode::Down => {
                self.app_state.focus_grid();
                return;
            }
            _ => return,
        };

        let text_changed = edited.text != self.app_state.input.text;
        self.app_state.input = edited;
        if text_changed {
            self.browser.set_query(self.app_state.input.text.clone(), now);
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::ToggleHelp => self.app_state.toggle_help(),
            KeyAction::FocusSearch => self.app_state.focus_search(),
            KeyAction::LoadMore => {
                let request = self.browser.load_more();
                self.dispatch(request);
            }
            KeyAction::CopyUrl => {
                self.browser
                    .copy_item(self.app_state.selected, self.clipboard.as_mut(), now);
            }
            KeyAction::MoveLeft
            | KeyAction::MoveRight
            | KeyAction::MoveUp
            | KeyAction::MoveDown
            | KeyAction::FirstItem
            | KeyAction::LastItem => {
                self.app_state = handle_grid_action(
                    self.app_state.clone(),
                    action,
                    self.browser.items().len(),
                );
            }
        }

        false
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        self.app_state.clamp_selection(self.browser.items().len());

        let mut columns = self.app_state.columns;
        let (browser, app_state, styles) = (&self.browser, &self.app_state, self.styles);
        self.terminal.draw(|frame| {
            columns = render_layout(frame, browser, app_state, styles);
        })?;
        self.app_state.set_columns(columns);

        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing over any backend, with plain styles.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        browser: Browser,
        worker: FetchWorker,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let mut app = Self::with_terminal(terminal, browser, worker, None, clipboard);
        app.styles = Styles::new(ColorConfig::new(false));
        app
    }

    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn browser(&self) -> &Browser {
        &self.browser
    }

    pub(crate) fn worker(&self) -> &FetchWorker {
        &self.worker
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent, now: Instant) -> bool {
        self.handle_key_at(key, now)
    }

    /// Apply a completion directly, as `pump` would.
    pub(crate) fn complete_test(&mut self, completion: crate::catalog::FetchCompletion) -> bool {
        self.browser.complete(completion)
    }

    pub(crate) fn pump_test(&mut self, now: Instant) -> bool {
        self.pump(now)
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application.
///
/// Handles terminal setup, runs the event loop, and restores the terminal on
/// exit even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(
    browser: Browser,
    worker: FetchWorker,
    watcher: Option<StoreWatcher>,
    clipboard: Box<dyn ClipboardSink>,
    initial_query: Option<&str>,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(browser, worker, watcher, clipboard)?;
    app.start(initial_query, Instant::now());

    let result = app.run();
    let restored = restore_terminal();

    first_error(result, restored)
}

/// The event loop's error wins over a teardown error; teardown still runs.
fn first_error(result: Result<(), TuiError>, restored: Result<(), TuiError>) -> Result<(), TuiError> {
    result.and(restored)
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
