//! Theming with automatic color degradation

mod color;

pub use color::{AnsiColor, Color};

use crate::terminal::TerminalCapabilities;

/// Border style for the slide frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    None,
    Single,
    Rounded,
    Ascii,
}

/// Theme defining the carousel's palette and chrome
#[derive(Debug, Clone)]
pub struct Theme {
    pub text_fg: Color,
    pub label_fg: Color,

    /// Call-to-action control colors
    pub cta_fg: Color,
    pub cta_bg: Color,

    /// Navigation chevrons
    pub chevron_fg: Color,

    /// Dot indicators
    pub indicator_active_fg: Color,
    pub indicator_fg: Color,

    pub border_color: Color,
    pub border_style: BorderStyle,

    /// Status line (used by host applications)
    pub status_fg: Color,
    pub status_bg: Color,

    caps: TerminalCapabilities,
}

impl Theme {
    /// Create a theme for the given terminal capabilities
    pub fn new(caps: TerminalCapabilities) -> Self {
        Theme {
            text_fg: Color::white(),
            label_fg: Color::dark_gray(),

            cta_fg: Color::black(),
            cta_bg: Color::rgb(235, 235, 235),

            chevron_fg: Color::rgb(220, 220, 220),

            indicator_active_fg: Color::white(),
            indicator_fg: Color::rgb(110, 110, 110),

            border_color: Color::dark_gray(),
            border_style: BorderStyle::Rounded,

            status_fg: Color::white(),
            status_bg: Color::rgb(58, 48, 68),

            caps,
        }
    }

    /// The capabilities this theme degrades against
    pub fn capabilities(&self) -> &TerminalCapabilities {
        &self.caps
    }

    pub fn text_style(&self) -> String {
        self.text_fg.degrade(&self.caps)
    }

    pub fn label_style(&self) -> String {
        format!("{}\x1b[2m", self.label_fg.degrade(&self.caps))
    }

    pub fn cta_style(&self) -> String {
        format!(
            "{}{}\x1b[1m",
            self.cta_fg.degrade(&self.caps),
            self.cta_bg.bg(&self.caps)
        )
    }

    pub fn chevron_style(&self) -> String {
        format!("{}\x1b[1m", self.chevron_fg.degrade(&self.caps))
    }

    pub fn indicator_style(&self, active: bool) -> String {
        if active {
            format!("{}\x1b[1m", self.indicator_active_fg.degrade(&self.caps))
        } else {
            self.indicator_fg.degrade(&self.caps)
        }
    }

    pub fn border_style_code(&self) -> String {
        self.border_color.degrade(&self.caps)
    }

    pub fn status_style(&self) -> String {
        format!(
            "{}{}",
            self.status_fg.degrade(&self.caps),
            self.status_bg.bg(&self.caps)
        )
    }

    /// Get border characters for the configured border style
    pub fn border_chars(&self) -> BorderChars {
        match self.border_style {
            BorderStyle::None => BorderChars::none(),
            BorderStyle::Single => BorderChars::single(),
            BorderStyle::Rounded => BorderChars::rounded(),
            BorderStyle::Ascii => BorderChars::ascii(),
        }
    }
}

/// Border characters for drawing the slide frame
#[derive(Debug, Clone)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderChars {
    pub fn none() -> Self {
        BorderChars {
            horizontal: ' ',
            vertical: ' ',
            top_left: ' ',
            top_right: ' ',
            bottom_left: ' ',
            bottom_right: ' ',
        }
    }

    pub fn single() -> Self {
        BorderChars {
            horizontal: '─',
            vertical: '│',
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
        }
    }

    pub fn rounded() -> Self {
        BorderChars {
            horizontal: '─',
            vertical: '│',
            top_left: '╭',
            top_right: '╮',
            bottom_left: '╰',
            bottom_right: '╯',
        }
    }

    pub fn ascii() -> Self {
        BorderChars {
            horizontal: '-',
            vertical: '|',
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let caps = TerminalCapabilities::detect();
        let theme = Theme::new(caps);

        assert!(!theme.cta_style().is_empty());
        assert!(!theme.indicator_style(true).is_empty());
    }

    #[test]
    fn test_indicator_styles_differ() {
        let caps = TerminalCapabilities::detect();
        let theme = Theme::new(caps);

        assert_ne!(theme.indicator_style(true), theme.indicator_style(false));
    }
}
