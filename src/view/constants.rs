//! Layout dimension constants for TUI rendering.

/// Height of the search bar in lines (border + content).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the error line, shown only while an error is set.
pub const ERROR_LINE_HEIGHT: u16 = 1;

/// Minimum width of one grid cell, borders included.
///
/// The grid fits as many columns of at least this width as the area allows,
/// then stretches them to fill the row.
pub const MIN_CELL_WIDTH: u16 = 24;

/// Height of one grid cell: top border, title, detail line, bottom border.
pub const CELL_HEIGHT: u16 = 4;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 70;
