//! gifgrid
//!
//! TUI application for browsing GIPHY stickers and copying their links.
//!
//! Follows a Pure Core / Impure Shell layout: `state` holds the pure
//! search/pagination machine, while `catalog`, `persistence`, `clipboard`
//! and `view` do the I/O.

pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
