//! Colors for the grid, status bar and overlays.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Whether colors are enabled.
///
/// Disabled when the `NO_COLOR` environment variable is set to any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colors on unless `NO_COLOR` is set.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Explicit setting, ignoring the environment.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether styles may use color.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Styles =====

/// Resolved styles for one frame.
///
/// With colors disabled every style still carries its modifiers, so the
/// selection and the copied badge stay distinguishable on monochrome terminals.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    /// Border of the focused pane.
    pub focused_border: Style,
    /// Border of unfocused panes.
    pub border: Style,
    /// Selected grid cell.
    pub selected: Style,
    /// "Copied!" badge.
    pub copied: Style,
    /// Secondary text: ids, counts, placeholder.
    pub muted: Style,
    /// Error line.
    pub error: Style,
    /// Feed name in the status bar.
    pub accent: Style,
    /// Key names in the help overlay.
    pub key: Style,
}

impl Styles {
    /// Styles for `config`; plain when colors are off.
    pub fn new(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                focused_border: Style::default().fg(Color::Cyan),
                border: Style::default().fg(Color::DarkGray),
                selected: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                copied: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::DarkGray),
                error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                accent: Style::default().fg(Color::Magenta),
                key: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                focused_border: Style::default().add_modifier(Modifier::BOLD),
                border: Style::default(),
                selected: Style::default().add_modifier(Modifier::REVERSED),
                copied: Style::default().add_modifier(Modifier::BOLD),
                muted: Style::default().add_modifier(Modifier::DIM),
                error: Style::default().add_modifier(Modifier::BOLD),
                accent: Style::default(),
                key: Style::default().add_modifier(Modifier::BOLD),
            }
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new(ColorConfig::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_colors_use_no_foreground() {
        let styles = Styles::new(ColorConfig::new(false));
        assert_eq!(styles.error.fg, None);
        assert_eq!(styles.selected.fg, None);
        assert!(styles.selected.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn enabled_colors_highlight_errors_in_red() {
        let styles = Styles::new(ColorConfig::new(true));
        assert_eq!(styles.error.fg, Some(Color::Red));
    }
}
