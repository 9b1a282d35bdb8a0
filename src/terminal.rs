//! Terminal abstraction - geometry, capabilities, and context

use anyhow::{Context, Result};

/// Terminal geometry and sizing information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    /// Terminal width in columns (characters)
    pub cols: u16,
    /// Terminal height in rows (lines)
    pub rows: u16,
    /// Estimated character width in pixels
    pub char_width: u16,
    /// Estimated character height in pixels
    pub char_height: u16,
}

/// Estimated monospace cell width in pixels
///
/// Also the scale the carousel uses to convert pointer columns into swipe
/// units, so the 50-unit swipe threshold keeps its original meaning.
pub const CHAR_WIDTH_PX: u16 = 10;

/// Estimated monospace cell height in pixels
pub const CHAR_HEIGHT_PX: u16 = 20;

impl TerminalGeometry {
    /// Get current terminal geometry
    pub fn detect() -> Result<Self> {
        let (cols, rows) = crossterm::terminal::size().context("Failed to get terminal size")?;

        Ok(TerminalGeometry {
            cols,
            rows,
            char_width: CHAR_WIDTH_PX,
            char_height: CHAR_HEIGHT_PX,
        })
    }

    /// Build geometry from known dimensions (used in tests and headless mode)
    pub fn with_size(cols: u16, rows: u16) -> Self {
        TerminalGeometry {
            cols,
            rows,
            char_width: CHAR_WIDTH_PX,
            char_height: CHAR_HEIGHT_PX,
        }
    }

    /// Estimated pixel dimensions of the whole terminal
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        (
            self.cols as u32 * self.char_width as u32,
            self.rows as u32 * self.char_height as u32,
        )
    }
}

/// Terminal capability detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// Supports Kitty graphics protocol
    pub kitty_graphics: bool,
    /// Supports Sixel graphics
    pub sixel: bool,
    /// Supports 24-bit true color
    pub truecolor: bool,
    /// Supports 256 colors
    pub colors_256: bool,
    /// Inside tmux/screen multiplexer
    pub in_multiplexer: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities from the environment
    pub fn detect() -> Self {
        let term = std::env::var("TERM").unwrap_or_default();
        let colorterm = std::env::var("COLORTERM").unwrap_or_default();
        let kitty_window = std::env::var("KITTY_WINDOW_ID").is_ok();

        let kitty_graphics = kitty_window || term.contains("kitty");
        let sixel = term.contains("mlterm")
            || term.contains("xterm")
            || std::env::var("TERM_PROGRAM")
                .unwrap_or_default()
                .contains("iTerm");
        let truecolor =
            colorterm.contains("truecolor") || colorterm.contains("24bit") || kitty_window;
        let colors_256 = term.contains("256") || truecolor;

        TerminalCapabilities {
            kitty_graphics,
            sixel,
            truecolor,
            colors_256,
            in_multiplexer: std::env::var("TMUX").is_ok(),
        }
    }

    /// Kitty graphics inside tmux need DCS passthrough wrapping
    pub fn needs_passthrough(&self) -> bool {
        self.kitty_graphics && self.in_multiplexer
    }
}

/// Complete terminal context combining geometry and capabilities
#[derive(Debug, Clone)]
pub struct TerminalContext {
    pub geometry: TerminalGeometry,
    pub capabilities: TerminalCapabilities,
}

impl TerminalContext {
    /// Create a new terminal context by detecting the current environment
    pub fn detect() -> Result<Self> {
        Ok(TerminalContext {
            geometry: TerminalGeometry::detect()?,
            capabilities: TerminalCapabilities::detect(),
        })
    }

    /// Build a context with fixed geometry (used by the headless renderer)
    pub fn headless(cols: u16, rows: u16) -> Self {
        TerminalContext {
            geometry: TerminalGeometry::with_size(cols, rows),
            capabilities: TerminalCapabilities {
                kitty_graphics: false,
                sixel: false,
                truecolor: true,
                colors_256: true,
                in_multiplexer: false,
            },
        }
    }

    /// Refresh geometry (e.g., after a terminal resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        self.geometry = TerminalGeometry::detect()?;
        Ok(())
    }

    /// Get character dimensions
    pub fn char_dimensions(&self) -> (u16, u16) {
        (self.geometry.cols, self.geometry.rows)
    }
}
