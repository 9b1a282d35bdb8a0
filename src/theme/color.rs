//! Color types with automatic degradation support

use crate::terminal::TerminalCapabilities;

/// Color representation with automatic degradation support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// True color RGB
    Rgb(u8, u8, u8),
    /// 16-color ANSI
    Ansi16(AnsiColor),
}

/// 16-color ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Create a color from RGB values
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    pub fn white() -> Self {
        Color::Rgb(255, 255, 255)
    }

    pub fn black() -> Self {
        Color::Rgb(0, 0, 0)
    }

    pub fn dark_gray() -> Self {
        Color::Rgb(128, 128, 128)
    }

    /// Foreground escape sequence degraded to the terminal's capabilities
    pub fn degrade(&self, caps: &TerminalCapabilities) -> String {
        let (r, g, b) = self.to_rgb();
        if caps.truecolor {
            format!("\x1b[38;2;{};{};{}m", r, g, b)
        } else if caps.colors_256 {
            format!("\x1b[38;5;{}m", rgb_to_256(r, g, b))
        } else {
            format!("\x1b[{}m", rgb_to_ansi16(r, g, b).fg_code())
        }
    }

    /// Background escape sequence degraded to the terminal's capabilities
    pub fn bg(&self, caps: &TerminalCapabilities) -> String {
        let (r, g, b) = self.to_rgb();
        if caps.truecolor {
            format!("\x1b[48;2;{};{};{}m", r, g, b)
        } else if caps.colors_256 {
            format!("\x1b[48;5;{}m", rgb_to_256(r, g, b))
        } else {
            format!("\x1b[{}m", rgb_to_ansi16(r, g, b).fg_code() + 10)
        }
    }

    fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Ansi16(a) => a.to_rgb(),
        }
    }
}

impl AnsiColor {
    pub(crate) fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            AnsiColor::Black => (0, 0, 0),
            AnsiColor::Red => (170, 0, 0),
            AnsiColor::Green => (0, 170, 0),
            AnsiColor::Yellow => (170, 85, 0),
            AnsiColor::Blue => (0, 0, 170),
            AnsiColor::Magenta => (170, 0, 170),
            AnsiColor::Cyan => (0, 170, 170),
            AnsiColor::White => (170, 170, 170),
            AnsiColor::BrightBlack => (85, 85, 85),
            AnsiColor::BrightRed => (255, 85, 85),
            AnsiColor::BrightGreen => (85, 255, 85),
            AnsiColor::BrightYellow => (255, 255, 85),
            AnsiColor::BrightBlue => (85, 85, 255),
            AnsiColor::BrightMagenta => (255, 85, 255),
            AnsiColor::BrightCyan => (85, 255, 255),
            AnsiColor::BrightWhite => (255, 255, 255),
        }
    }

    /// SGR foreground code; background is this plus ten
    pub(crate) fn fg_code(self) -> u8 {
        match self {
            AnsiColor::Black => 30,
            AnsiColor::Red => 31,
            AnsiColor::Green => 32,
            AnsiColor::Yellow => 33,
            AnsiColor::Blue => 34,
            AnsiColor::Magenta => 35,
            AnsiColor::Cyan => 36,
            AnsiColor::White => 37,
            AnsiColor::BrightBlack => 90,
            AnsiColor::BrightRed => 91,
            AnsiColor::BrightGreen => 92,
            AnsiColor::BrightYellow => 93,
            AnsiColor::BrightBlue => 94,
            AnsiColor::BrightMagenta => 95,
            AnsiColor::BrightCyan => 96,
            AnsiColor::BrightWhite => 97,
        }
    }
}

/// Convert RGB to 256-color palette index
pub(crate) fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    // Grays map onto the 24-step gray ramp
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return ((r - 8) / 10) + 232;
    }

    let r_idx = (r as u16 * 5 / 255) as u8;
    let g_idx = (g as u16 * 5 / 255) as u8;
    let b_idx = (b as u16 * 5 / 255) as u8;

    16 + 36 * r_idx + 6 * g_idx + b_idx
}

/// Convert RGB to the closest ANSI 16 color
pub(crate) fn rgb_to_ansi16(r: u8, g: u8, b: u8) -> AnsiColor {
    let brightness = (r as u32 + g as u32 + b as u32) / 3;

    if brightness < 32 {
        return AnsiColor::Black;
    }

    let bright = brightness > 128;
    let cutoff = if bright { 150 } else { 100 };

    match dominant_channel(r, g, b) {
        Some(Channel::Red) => pick(bright, AnsiColor::BrightRed, AnsiColor::Red),
        Some(Channel::Green) => pick(bright, AnsiColor::BrightGreen, AnsiColor::Green),
        Some(Channel::Blue) => pick(bright, AnsiColor::BrightBlue, AnsiColor::Blue),
        None => {
            if bright && r > 200 && g > 200 && b > 200 {
                AnsiColor::BrightWhite
            } else if r > cutoff && g > cutoff {
                pick(bright, AnsiColor::BrightYellow, AnsiColor::Yellow)
            } else if r > cutoff && b > cutoff {
                pick(bright, AnsiColor::BrightMagenta, AnsiColor::Magenta)
            } else if g > cutoff && b > cutoff {
                pick(bright, AnsiColor::BrightCyan, AnsiColor::Cyan)
            } else if bright {
                AnsiColor::White
            } else {
                AnsiColor::BrightBlack
            }
        }
    }
}

fn pick(bright: bool, when_bright: AnsiColor, when_dark: AnsiColor) -> AnsiColor {
    if bright {
        when_bright
    } else {
        when_dark
    }
}

enum Channel {
    Red,
    Green,
    Blue,
}

fn dominant_channel(r: u8, g: u8, b: u8) -> Option<Channel> {
    if r > g && r > b {
        Some(Channel::Red)
    } else if g > r && g > b {
        Some(Channel::Green)
    } else if b > r && b > g {
        Some(Channel::Blue)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(truecolor: bool, colors_256: bool) -> TerminalCapabilities {
        TerminalCapabilities {
            kitty_graphics: false,
            sixel: false,
            truecolor,
            colors_256,
            in_multiplexer: false,
        }
    }

    #[test]
    fn test_rgb_to_256() {
        assert_eq!(rgb_to_256(255, 255, 255), 231);
        assert_eq!(rgb_to_256(0, 0, 0), 16);

        let gray_idx = rgb_to_256(128, 128, 128);
        assert!((232..=255).contains(&gray_idx));
    }

    #[test]
    fn test_truecolor_passthrough() {
        let code = Color::white().degrade(&caps(true, true));
        assert!(code.contains("38;2;255;255;255"));
    }

    #[test]
    fn test_degrades_to_256() {
        let code = Color::rgb(200, 30, 30).degrade(&caps(false, true));
        assert!(code.starts_with("\x1b[38;5;"));
    }

    #[test]
    fn test_degrades_to_ansi16() {
        // Average brightness 86 lands in the dark half of the palette
        let code = Color::rgb(200, 30, 30).degrade(&caps(false, false));
        assert_eq!(code, "\x1b[31m");

        let code = Color::rgb(255, 85, 85).degrade(&caps(false, false));
        assert_eq!(code, "\x1b[91m");
    }

    #[test]
    fn test_bg_codes() {
        let code = Color::black().bg(&caps(false, false));
        assert_eq!(code, "\x1b[40m");
    }
}
