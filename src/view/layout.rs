//! Screen layout: search bar, optional error line, result grid, status bar.
//!
//! Pure rendering over `Browser` and `AppState`; the caller owns the terminal.

use super::constants::{ERROR_LINE_HEIGHT, SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT};
use super::grid::{grid_columns, ResultGrid};
use super::help::render_help_overlay;
use super::search_input::SearchBar;
use super::styles::Styles;
use crate::catalog::FeedMode;
use crate::state::{AppState, Browser, FocusPane};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Shown in the grid area while the first page of a feed is loading.
pub const LOADING_TEXT: &str = "Loading...";
/// Shown in the grid area when a finished fetch returned nothing.
pub const NO_RESULTS_TEXT: &str = "No results";
/// Status bar hint when another page can be requested.
pub const LOAD_MORE_HINT: &str = "Load more [m]";

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Search bar, including its border.
    pub search: Rect,
    /// Error line, only when there is an error.
    pub error: Option<Rect>,
    /// Result grid.
    pub grid: Rect,
    /// One-line status bar.
    pub status: Rect,
}

/// Split `area` into the screen regions.
pub fn calculate_areas(area: Rect, has_error: bool) -> ScreenAreas {
    let error_height = if has_error { ERROR_LINE_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SEARCH_INPUT_HEIGHT),
            Constraint::Length(error_height),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    ScreenAreas {
        search: chunks[0],
        error: has_error.then_some(chunks[1]),
        grid: chunks[2],
        status: chunks[3],
    }
}

/// Render one frame. Returns the number of grid columns laid out, which
/// vertical selection moves step by.
pub fn render_layout(frame: &mut Frame, browser: &Browser, state: &AppState, styles: Styles) -> usize {
    let areas = calculate_areas(frame.area(), browser.error().is_some());

    frame.render_widget(
        SearchBar::new(&state.input, styles)
            .focused(state.focus == FocusPane::Search)
            .settling(browser.is_settling()),
        areas.search,
    );

    if let (Some(area), Some(message)) = (areas.error, browser.error()) {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(message.to_string(), styles.error))),
            area,
        );
    }

    render_grid_area(frame, areas.grid, browser, state, styles);
    render_status_bar(frame, areas.status, browser, styles);

    if state.help_visible {
        render_help_overlay(frame, styles);
    }

    grid_columns(areas.grid.width)
}

fn render_grid_area(frame: &mut Frame, area: Rect, browser: &Browser, state: &AppState, styles: Styles) {
    if browser.items().is_empty() {
        let message = if browser.is_loading() {
            LOADING_TEXT
        } else if browser.no_results() && !browser.is_settling() {
            NO_RESULTS_TEXT
        } else {
            return;
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, styles.muted)).alignment(Alignment::Center),
            area,
        );
        return;
    }

    let selected = (state.focus == FocusPane::Grid).then_some(state.selected);
    frame.render_widget(
        ResultGrid::new(browser.items(), styles)
            .selected(selected)
            .copied(browser.copied_id()),
        area,
    );
}

/// Left: current feed and item count. Right: loading or load-more hint.
fn render_status_bar(frame: &mut Frame, area: Rect, browser: &Browser, styles: Styles) {
    let feed = match browser.mode() {
        FeedMode::Trending => "Trending".to_string(),
        FeedMode::Search(query) => format!("Search: \"{query}\""),
    };
    let left = Line::from(vec![
        Span::styled(feed, styles.accent),
        Span::styled(format!("  {} items", browser.items().len()), styles.muted),
        Span::styled("  ? help", styles.muted),
    ]);

    let right = if browser.is_loading() {
        Some(Span::raw(LOADING_TEXT))
    } else if browser.has_loaded() && !browser.items().is_empty() {
        Some(Span::styled(LOAD_MORE_HINT, styles.key))
    } else {
        None
    };

    frame.render_widget(Paragraph::new(left), area);
    if let Some(span) = right {
        frame.render_widget(Paragraph::new(Line::from(span)).alignment(Alignment::Right), area);
    }
}
