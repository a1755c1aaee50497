//! Internal test modules - whitebox tests with crate access
//!
//! Acceptance tests drive the full TUI through `AcceptanceTestHarness`:
//! keystrokes in, rendered screen and catalog calls out.

mod acceptance_paging;
