//! Result grid widget.
//!
//! Items are laid out left to right in fixed-height cells. The grid scrolls by
//! whole rows so the selected cell is always visible.

use super::constants::{CELL_HEIGHT, MIN_CELL_WIDTH};
use super::styles::Styles;
use crate::model::{ItemId, ResultItem};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Badge drawn on the most recently copied item.
pub const COPIED_BADGE: &str = "Copied!";

const UNTITLED: &str = "(untitled)";

/// Columns that fit in `width` cells.
pub fn grid_columns(width: u16) -> usize {
    usize::from((width / MIN_CELL_WIDTH).max(1))
}

/// Fully visible rows in `height` lines.
pub fn visible_rows(height: u16) -> usize {
    usize::from((height / CELL_HEIGHT).max(1))
}

/// First row to draw so that `selected` is on screen.
pub fn first_visible_row(selected: usize, columns: usize, rows: usize) -> usize {
    let selected_row = selected / columns.max(1);
    selected_row.saturating_sub(rows.max(1) - 1)
}

/// Shorten `text` to at most `max_width` display columns, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Grid of result cells.
pub struct ResultGrid<'a> {
    items: &'a [ResultItem],
    selected: Option<usize>,
    copied: Option<&'a ItemId>,
    styles: Styles,
}

impl<'a> ResultGrid<'a> {
    /// Grid over `items` with nothing selected.
    pub fn new(items: &'a [ResultItem], styles: Styles) -> Self {
        Self {
            items,
            selected: None,
            copied: None,
            styles,
        }
    }

    /// Highlight the cell at `index`.
    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    /// Show the copied badge on the item with this id.
    pub fn copied(mut self, id: Option<&'a ItemId>) -> Self {
        self.copied = id;
        self
    }

    fn render_cell(&self, item: &ResultItem, is_selected: bool, area: Rect, buf: &mut Buffer) {
        let border = if is_selected {
            self.styles.selected
        } else {
            self.styles.border
        };
        let inner_width = usize::from(area.width.saturating_sub(2));

        let title = if item.title().is_empty() {
            Span::styled(UNTITLED, self.styles.muted)
        } else {
            let style = if is_selected {
                self.styles.selected
            } else {
                ratatui::style::Style::default()
            };
            Span::styled(truncate_to_width(item.title(), inner_width), style)
        };

        let detail = if self.copied == Some(item.id()) {
            Span::styled(COPIED_BADGE, self.styles.copied)
        } else {
            Span::styled(truncate_to_width(item.id().as_str(), inner_width), self.styles.muted)
        };

        Paragraph::new(vec![Line::from(title), Line::from(detail)])
            .block(Block::default().borders(Borders::ALL).border_style(border))
            .render(area, buf);
    }
}

impl Widget for ResultGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.items.is_empty() || area.width == 0 || area.height == 0 {
            return;
        }

        let columns = grid_columns(area.width);
        let rows = visible_rows(area.height);
        let first_row = first_visible_row(self.selected.unwrap_or(0), columns, rows);
        let cell_width = area.width / columns as u16;

        let start = (first_row * columns).min(self.items.len());
        let end = (start + rows * columns).min(self.items.len());

        for (offset, item) in self.items[start..end].iter().enumerate() {
            let row = (offset / columns) as u16;
            let col = (offset % columns) as u16;
            let y = area.y + row * CELL_HEIGHT;
            if y + CELL_HEIGHT > area.bottom() {
                break;
            }

            let cell = Rect::new(area.x + col * cell_width, y, cell_width, CELL_HEIGHT);
            self.render_cell(item, self.selected == Some(start + offset), cell, buf);
        }
    }
}
