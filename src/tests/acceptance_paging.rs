//! "Load more" and grid navigation.

use crate::catalog::FeedMode;
use crate::test_harness::AcceptanceTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Started harness with focus on the grid and columns laid out.
fn on_grid() -> AcceptanceTestHarness {
    let mut harness = AcceptanceTestHarness::new();
    harness.start();
    harness.send_key(KeyCode::Tab);
    harness.render_to_string();
    harness
}

#[test]
fn load_more_appends_next_trending_page() {
    let mut harness = on_grid();

    harness.send_key(KeyCode::Char('m'));
    harness.settle();

    assert_eq!(
        harness.catalog().calls(),
        vec![(FeedMode::Trending, 0), (FeedMode::Trending, 24)]
    );
    assert_eq!(harness.browser().items().len(), 48);
    assert_eq!(harness.browser().offset(), 24);
    assert_eq!(harness.browser().items()[24].id().as_str(), "trend-24");
}

#[test]
fn load_more_continues_the_search_feed() {
    let mut harness = AcceptanceTestHarness::new();
    harness.start();
    harness.type_text("cats");
    harness.advance(DEBOUNCE);
    harness.send_key(KeyCode::Tab);

    harness.send_key(KeyCode::Char('m'));
    harness.settle();
    harness.send_key(KeyCode::Char('m'));
    harness.settle();

    let calls = harness.catalog().calls();
    assert_eq!(
        calls[1..],
        [
            (FeedMode::Search("cats".to_string()), 0),
            (FeedMode::Search("cats".to_string()), 24),
            (FeedMode::Search("cats".to_string()), 48),
        ]
    );
    assert_eq!(harness.browser().items().len(), 72);
}

#[test]
fn new_search_resets_paging() {
    let mut harness = on_grid();
    harness.send_key(KeyCode::Char('m'));
    harness.settle();

    harness.send_key(KeyCode::Char('/'));
    harness.type_text("dogs");
    harness.advance(DEBOUNCE);

    assert_eq!(harness.browser().offset(), 0);
    assert_eq!(harness.browser().items().len(), 24);
    assert_eq!(harness.browser().items()[0].id().as_str(), "dogs-0");
}

#[test]
fn load_more_failure_keeps_offset() {
    let mut harness = AcceptanceTestHarness::new();
    harness.start();
    harness.type_text("flaky");
    harness.advance(DEBOUNCE);
    harness.send_key(KeyCode::Tab);

    harness.catalog().fail_with_status("flaky", 503);
    harness.send_key(KeyCode::Char('m'));
    harness.settle();

    assert_eq!(harness.browser().offset(), 0);
    assert_eq!(harness.browser().items().len(), 24);
    assert_eq!(harness.browser().error(), Some("Failed to search stickers: 503"));
}

#[test]
fn status_bar_offers_load_more_when_idle() {
    let mut harness = on_grid();
    let screen = harness.render_to_string();
    assert!(screen.contains("Load more [m]"), "{screen}");
}

#[test]
fn arrows_move_selection_by_cell_and_row() {
    let mut harness = on_grid();
    // 80 columns fit three cells per row.
    assert_eq!(harness.state().columns, 3);

    harness.send_key(KeyCode::Right);
    assert_eq!(harness.state().selected, 1);

    harness.send_key(KeyCode::Char('j'));
    assert_eq!(harness.state().selected, 4);

    harness.send_key(KeyCode::Up);
    assert_eq!(harness.state().selected, 1);

    harness.send_key(KeyCode::Char('h'));
    harness.send_key(KeyCode::Char('h'));
    assert_eq!(harness.state().selected, 0);
}

#[test]
fn first_and_last_item_jumps() {
    let mut harness = on_grid();

    harness.send_key_with_mods(KeyCode::Char('G'), KeyModifiers::SHIFT);
    assert_eq!(harness.state().selected, 23);

    harness.send_key(KeyCode::Char('g'));
    assert_eq!(harness.state().selected, 0);
}

#[test]
fn selection_scrolls_grid() {
    let mut harness = on_grid();

    harness.send_key(KeyCode::End);
    let screen = harness.render_to_string();

    assert!(screen.contains("trend 23"), "{screen}");
    assert!(!screen.contains("trend 0 "), "{screen}");
}

#[test]
fn selection_is_clamped_after_shorter_results() {
    let mut harness = on_grid();
    harness.catalog().set_total("few", 2);
    harness.send_key(KeyCode::End);

    harness.send_key(KeyCode::Tab);
    harness.type_text("few");
    harness.advance(DEBOUNCE);
    harness.render_to_string();

    assert_eq!(harness.state().selected, 1);
}
