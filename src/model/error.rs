//! Error types for gifgrid.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Startup failures that abort the process
//!   - [`ConfigError`](crate::config::ConfigError) - unreadable or invalid configuration
//!   - [`LoggingError`](crate::logging::LoggingError) - log file setup
//!   - [`FetchError`] - HTTP client construction
//!   - `std::io::Error` - terminal setup/teardown
//!   - [`TuiError`](crate::view::TuiError) - event loop failures
//! - [`FetchError`] - catalog request failures, shown in the status line
//! - [`PersistenceError`] - storage failures, swallowed by the last-search adapter
//! - [`ClipboardError`] - copy failures, shown as a transient message
//!
//! # Recovery Strategy
//!
//! Once the UI is running nothing is fatal: fetch and clipboard failures become a
//! user-visible message, persistence failures degrade to "no persistence".

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Returned from startup code in `main`; every variant aborts the process with
/// a message on stderr.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is incomplete.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The catalog client could not be constructed.
    #[error("Catalog client error: {0}")]
    Fetch(#[from] FetchError),

    /// Terminal setup or teardown failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The event loop stopped on an error.
    #[error("TUI error: {0}")]
    Tui(#[from] crate::view::TuiError),
}

// ===== FetchError =====

/// Which catalog operation a request performed.
///
/// Only used to build human-readable messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOperation {
    /// `GET gifs/trending`
    Trending,
    /// `GET stickers/search`
    Search,
}

impl fmt::Display for FetchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOperation::Trending => write!(f, "fetch trending"),
            FetchOperation::Search => write!(f, "search stickers"),
        }
    }
}

/// Errors from a trending or search request.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("Failed to {operation}: {status}{}", detail_suffix(.detail))]
    Status {
        /// Operation that failed.
        operation: FetchOperation,
        /// HTTP status code.
        status: u16,
        /// Server-provided message, when the error body carried one.
        detail: Option<String>,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Failed to {operation}: {reason}")]
    Transport {
        /// Operation that failed.
        operation: FetchOperation,
        /// Library-provided reason.
        reason: String,
    },

    /// The response body was not a valid catalog envelope.
    #[error("Failed to {operation}: unexpected response ({reason})")]
    Decode {
        /// Operation that failed.
        operation: FetchOperation,
        /// Parser error details.
        reason: String,
    },

    /// The HTTP client itself could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(msg) if !msg.trim().is_empty() => format!(" ({})", msg.trim()),
        _ => String::new(),
    }
}

// ===== PersistenceError =====

/// Errors from the key/value store backing the last search.
///
/// These never reach the user: [`LastSearch`](crate::persistence::LastSearch)
/// logs and swallows them.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading, writing or renaming the store file failed.
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        /// Store file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not a JSON object of strings.
    #[error("Storage file {path} is corrupt: {reason}")]
    Corrupt {
        /// Store file path.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// The change watcher could not be started.
    #[error("Failed to watch {path}: {reason}")]
    Watch {
        /// Watched directory.
        path: PathBuf,
        /// Watcher error details.
        reason: String,
    },

    /// The store refused the operation (used by in-memory test doubles).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// ===== ClipboardError =====

/// Copying a URL to the clipboard failed through every available mechanism.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);
