//! Theme configuration for the TUI.
//!
//! Two states, light and dark, over a fixed set of color roles. Light is
//! the initial state; terminal background detection is available as an
//! opt-in via [`Theme::auto_detect()`].

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;
use serde::Deserialize;

/// Which of the two theme states is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

/// Color and style theme for the TUI.
///
/// Use [`Theme::light()`]/[`Theme::dark()`] explicitly, or
/// [`Theme::auto_detect()`] for selection based on terminal background.
/// [`Theme::toggle()`] flips between the two states.
#[derive(Debug, Clone)]
pub struct Theme {
    /// The active state.
    pub mode: ThemeMode,
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for card name headings.
    pub heading: Color,
    /// Dimmed color for labels and secondary text.
    pub muted: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Color for load failure messages.
    pub error: Color,
    /// Style for the header bar title.
    pub header: Style,
    /// Style for the selected card's border.
    pub selected: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            highlight: Color::Blue,
            heading: Color::Black,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            error: Color::Red,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            highlight: Color::Cyan,
            heading: Color::White,
            muted: Color::Gray,
            border: Color::Gray,
            error: Color::Red,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Flip to the other theme state.
    pub fn toggle(&mut self) {
        *self = match self.mode {
            ThemeMode::Light => Self::dark(),
            ThemeMode::Dark => Self::light(),
        };
    }
}

/// Configured theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Light theme (the initial state).
    #[default]
    Light,
    Dark,
    /// Detect from the terminal background.
    Auto,
}

impl ThemeChoice {
    /// Resolve the choice to a concrete theme.
    pub fn theme(self) -> Theme {
        match self {
            ThemeChoice::Light => Theme::light(),
            ThemeChoice::Dark => Theme::dark(),
            ThemeChoice::Auto => Theme::auto_detect(),
        }
    }
}

impl std::str::FromStr for ThemeChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeChoice::Light),
            "dark" => Ok(ThemeChoice::Dark),
            "auto" => Ok(ThemeChoice::Auto),
            other => Err(format!(
                "unknown theme '{}' (expected 'light', 'dark' or 'auto')",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_between_two_states() {
        let mut theme = Theme::light();
        assert_eq!(theme.mode, ThemeMode::Light);

        theme.toggle();
        assert_eq!(theme.mode, ThemeMode::Dark);
        assert_eq!(theme.highlight, Theme::dark().highlight);

        theme.toggle();
        assert_eq!(theme.mode, ThemeMode::Light);
        assert_eq!(theme.highlight, Theme::light().highlight);
    }

    #[test]
    fn test_even_toggle_count_restores_initial_state() {
        let mut theme = Theme::light();
        for _ in 0..6 {
            theme.toggle();
        }
        assert_eq!(theme.mode, ThemeMode::Light);
        assert_eq!(theme.heading, Theme::light().heading);
        assert_eq!(theme.border, Theme::light().border);
    }

    #[test]
    fn test_theme_choice_from_str() {
        assert_eq!("light".parse::<ThemeChoice>().unwrap(), ThemeChoice::Light);
        assert_eq!("dark".parse::<ThemeChoice>().unwrap(), ThemeChoice::Dark);
        assert_eq!("auto".parse::<ThemeChoice>().unwrap(), ThemeChoice::Auto);
        assert!("solarized".parse::<ThemeChoice>().is_err());
    }
}
