//! Graphics backend abstraction - image output over multiple protocols

mod blocks;
mod kitty;
mod sixel;

use crate::terminal::TerminalCapabilities;
use anyhow::Result;
use std::io::Write;

/// Buffer capacity for per-line output batching
const LINE_BUFFER_CAPACITY: usize = 512;

/// Image rendering backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsBackend {
    /// Kitty graphics protocol
    Kitty,
    /// Sixel graphics
    Sixel,
    /// Unicode block characters (universal fallback)
    Blocks,
}

impl GraphicsBackend {
    /// Pick the best backend the terminal supports
    pub fn from_capabilities(caps: &TerminalCapabilities) -> Self {
        if caps.kitty_graphics {
            GraphicsBackend::Kitty
        } else if caps.sixel {
            GraphicsBackend::Sixel
        } else {
            GraphicsBackend::Blocks
        }
    }

    /// Detect the best available backend from the environment
    pub fn detect() -> Self {
        Self::from_capabilities(&TerminalCapabilities::detect())
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            GraphicsBackend::Kitty => "Kitty Graphics",
            GraphicsBackend::Sixel => "Sixel",
            GraphicsBackend::Blocks => "Unicode Blocks",
        }
    }
}

/// Image renderer for the selected backend
///
/// Owns the scratch buffers used to assemble escape sequences so repeated
/// renders do not reallocate.
pub struct ImageRenderer {
    backend: GraphicsBackend,
    /// Wrap graphics sequences in DCS passthrough (tmux/screen)
    passthrough: bool,
    /// Scratch buffer for one output line or protocol chunk
    line_buffer: String,
}

impl ImageRenderer {
    /// Create an image renderer
    pub fn new(backend: GraphicsBackend, passthrough: bool) -> Self {
        ImageRenderer {
            backend,
            passthrough,
            line_buffer: String::with_capacity(LINE_BUFFER_CAPACITY),
        }
    }

    /// Get the active backend
    pub fn backend(&self) -> GraphicsBackend {
        self.backend
    }

    /// Render RGB pixels at the given cell position, scaled into the given
    /// cell box where the protocol supports scaling
    pub fn render_rgb<W: Write>(
        &mut self,
        writer: &mut W,
        pixels: &[u8],
        width: u32,
        height: u32,
        col: u16,
        row: u16,
        cell_box: (u16, u16),
    ) -> Result<()> {
        match self.backend {
            GraphicsBackend::Kitty => {
                self.render_kitty(writer, pixels, width, height, col, row, cell_box)
            }
            GraphicsBackend::Sixel => self.render_sixel(writer, pixels, width, height, col, row),
            GraphicsBackend::Blocks => {
                self.render_blocks(writer, pixels, width, height, col, row, cell_box)
            }
        }
    }

    /// Delete previously transmitted images (Kitty only; other backends
    /// overdraw in place)
    pub fn delete_images<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        if self.backend != GraphicsBackend::Kitty {
            return Ok(());
        }

        let delete_cmd = "\x1b_Ga=d,d=I,i=1,q=2\x1b\\";
        if self.passthrough {
            self.write_passthrough(writer, delete_cmd)?;
        } else {
            write!(writer, "{}", delete_cmd)?;
        }

        Ok(())
    }

    /// Wrap a graphics sequence in tmux DCS passthrough and emit it
    pub(super) fn write_passthrough<W: Write>(&self, writer: &mut W, payload: &str) -> Result<()> {
        let escaped = payload.replace('\x1b', "\x1b\x1b");
        write!(writer, "\x1bPtmux;{}\x1b\\", escaped)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(kitty: bool, sixel: bool) -> TerminalCapabilities {
        TerminalCapabilities {
            kitty_graphics: kitty,
            sixel,
            truecolor: true,
            colors_256: true,
            in_multiplexer: false,
        }
    }

    #[test]
    fn test_backend_selection_order() {
        assert_eq!(
            GraphicsBackend::from_capabilities(&caps(true, true)),
            GraphicsBackend::Kitty
        );
        assert_eq!(
            GraphicsBackend::from_capabilities(&caps(false, true)),
            GraphicsBackend::Sixel
        );
        assert_eq!(
            GraphicsBackend::from_capabilities(&caps(false, false)),
            GraphicsBackend::Blocks
        );
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(GraphicsBackend::Kitty.name(), "Kitty Graphics");
        assert_eq!(GraphicsBackend::Sixel.name(), "Sixel");
        assert_eq!(GraphicsBackend::Blocks.name(), "Unicode Blocks");
    }

    #[test]
    fn test_delete_images_is_kitty_only() {
        let mut out = Vec::new();
        let mut renderer = ImageRenderer::new(GraphicsBackend::Blocks, false);
        renderer.delete_images(&mut out).unwrap();
        assert!(out.is_empty());

        let mut renderer = ImageRenderer::new(GraphicsBackend::Kitty, false);
        renderer.delete_images(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("a=d"));
    }

    #[test]
    fn test_passthrough_escaping() {
        let mut out = Vec::new();
        let renderer = ImageRenderer::new(GraphicsBackend::Kitty, true);
        renderer.write_passthrough(&mut out, "\x1b_Gx\x1b\\").unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1bPtmux;"));
        assert!(text.contains("\x1b\x1b_Gx"));
    }
}
