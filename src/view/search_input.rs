//! Search bar widget.

use super::styles::Styles;
use crate::state::SearchInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Placeholder shown while the line is empty and unfocused.
pub const PLACEHOLDER: &str = "Search stickers…";

/// The search line, with a block cursor when focused.
pub struct SearchBar<'a> {
    input: &'a SearchInput,
    focused: bool,
    settling: bool,
    styles: Styles,
}

impl<'a> SearchBar<'a> {
    /// Unfocused bar showing `input`.
    pub fn new(input: &'a SearchInput, styles: Styles) -> Self {
        Self {
            input,
            focused: false,
            settling: false,
            styles,
        }
    }

    /// Highlight the border and show the cursor.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Typed text has not settled into a search yet.
    pub fn settling(mut self, settling: bool) -> Self {
        self.settling = settling;
        self
    }

    fn content(&self) -> Line<'a> {
        let text = &self.input.text;

        if !self.focused {
            return if text.is_empty() {
                Line::from(Span::styled(PLACEHOLDER, self.styles.muted))
            } else {
                Line::from(text.as_str())
            };
        }

        let before: String = text.chars().take(self.input.cursor).collect();
        let mut rest = text.chars().skip(self.input.cursor);
        let cursor_char = rest.next().map_or_else(|| " ".to_string(), String::from);
        let after: String = rest.collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(cursor_char, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(after),
        ])
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.settling { " Search … " } else { " Search " };
        let border = if self.focused {
            self.styles.focused_border
        } else {
            self.styles.border
        };

        Paragraph::new(self.content())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::buffer_to_string;

    fn render(bar: SearchBar<'_>) -> String {
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 3));
        bar.render(buf.area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn unfocused_empty_shows_placeholder() {
        let input = SearchInput::default();
        let out = render(SearchBar::new(&input, Styles::default()));
        assert!(out.contains(PLACEHOLDER), "{out}");
    }

    #[test]
    fn focused_shows_text_without_placeholder() {
        let input = SearchInput::with_text("cats");
        let out = render(SearchBar::new(&input, Styles::default()).focused(true));
        assert!(out.contains("cats"), "{out}");
        assert!(!out.contains(PLACEHOLDER), "{out}");
    }

    #[test]
    fn cursor_cell_is_reversed() {
        let input = SearchInput {
            text: "cats".to_string(),
            cursor: 1,
        };
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 3));
        SearchBar::new(&input, Styles::default())
            .focused(true)
            .render(buf.area, &mut buf);

        // Border at x=0, text starts at x=1; cursor sits on the 'a'.
        let cell = &buf[(2, 1)];
        assert_eq!(cell.symbol(), "a");
        assert!(cell.modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn settling_marks_title() {
        let input = SearchInput::with_text("ca");
        let out = render(SearchBar::new(&input, Styles::default()).settling(true));
        assert!(out.contains("Search …"), "{out}");
    }
}
