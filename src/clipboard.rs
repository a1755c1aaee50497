//! Clipboard access.
//!
//! The native clipboard (`arboard`) is tried first. Terminals reached over SSH
//! or without a display server have no native clipboard, so the fallback asks
//! the terminal emulator itself to set the selection with an OSC 52 escape.

use crate::model::ClipboardError;
use base64::Engine;
use std::io::Write;
use tracing::{debug, warn};

/// Something that can receive copied text.
pub trait ClipboardSink {
    /// Place `text` on the clipboard.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// OSC 52 "set clipboard" escape sequence for `text`.
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

enum Native {
    Untried,
    Ready(arboard::Clipboard),
    Unavailable,
    Disabled,
}

/// System clipboard with terminal fallback.
///
/// The `arboard` handle is created on first use and kept for the life of the
/// process: on X11 the copied text is only served while the handle lives.
pub struct SystemClipboard<W: Write> {
    native: Native,
    terminal: W,
}

impl SystemClipboard<std::io::Stdout> {
    /// Native clipboard with OSC 52 on stdout as the fallback.
    pub fn new() -> Self {
        Self {
            native: Native::Untried,
            terminal: std::io::stdout(),
        }
    }
}

impl Default for SystemClipboard<std::io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> SystemClipboard<W> {
    /// Terminal-only clipboard writing escapes to `terminal`.
    pub fn terminal_only(terminal: W) -> Self {
        Self {
            native: Native::Disabled,
            terminal,
        }
    }

    fn native(&mut self) -> Option<&mut arboard::Clipboard> {
        if let Native::Untried = self.native {
            self.native = match arboard::Clipboard::new() {
                Ok(clipboard) => Native::Ready(clipboard),
                Err(e) => {
                    debug!(error = %e, "native clipboard unavailable, using OSC 52");
                    Native::Unavailable
                }
            };
        }

        match &mut self.native {
            Native::Ready(clipboard) => Some(clipboard),
            _ => None,
        }
    }

    fn write_osc52(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.terminal
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| self.terminal.flush())
            .map_err(|e| ClipboardError(e.to_string()))
    }
}

impl<W: Write> ClipboardSink for SystemClipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(native) = self.native() {
            match native.set_text(text.to_owned()) {
                Ok(()) => return Ok(()),
                Err(e) => warn!(error = %e, "native clipboard write failed, using OSC 52"),
            }
        }

        self.write_osc52(text)
    }
}
