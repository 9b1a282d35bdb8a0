//! Rendering backend - terminal output, graphics dispatch, cursor management

use crate::graphics::{GraphicsBackend, ImageRenderer};
use crate::terminal::TerminalContext;
use anyhow::Result;
use std::io::{self, BufWriter, Write};

/// Buffer capacity for write batching (16KB)
const WRITE_BUFFER_CAPACITY: usize = 16 * 1024;

/// Buffered terminal renderer handling text, styling, and image output
///
/// Output is batched internally; call `flush()` (or `end_frame()`) after a
/// group of operations to display it.
pub struct Renderer {
    writer: BufWriter<Box<dyn Write>>,
    context: TerminalContext,
    image_renderer: ImageRenderer,
    in_alt_screen: bool,
}

impl Renderer {
    /// Create a renderer for the current terminal, detecting the best
    /// graphics backend
    pub fn new() -> Result<Self> {
        let context = TerminalContext::detect()?;
        let backend = GraphicsBackend::from_capabilities(&context.capabilities);
        Self::build(context, backend)
    }

    /// Create a renderer with a specific graphics backend
    pub fn with_backend(backend: GraphicsBackend) -> Result<Self> {
        let context = TerminalContext::detect()?;
        Self::build(context, backend)
    }

    fn build(context: TerminalContext, backend: GraphicsBackend) -> Result<Self> {
        let passthrough = context.capabilities.in_multiplexer;

        eprintln!("Graphics backend: {}", backend.name());

        let stdout: Box<dyn Write> = Box::new(io::stdout());
        Ok(Renderer {
            writer: BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, stdout),
            context,
            image_renderer: ImageRenderer::new(backend, passthrough),
            in_alt_screen: false,
        })
    }

    /// Create a renderer that discards all output
    ///
    /// Component render paths can run against this in tests without a
    /// terminal attached.
    pub fn headless() -> Self {
        let sink: Box<dyn Write> = Box::new(io::sink());
        Renderer {
            writer: BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, sink),
            context: TerminalContext::headless(80, 24),
            image_renderer: ImageRenderer::new(GraphicsBackend::Blocks, false),
            in_alt_screen: false,
        }
    }

    /// Get the active graphics backend
    pub fn graphics_backend(&self) -> GraphicsBackend {
        self.image_renderer.backend()
    }

    /// Get the current terminal context
    pub fn context(&self) -> &TerminalContext {
        &self.context
    }

    /// Refresh terminal geometry (call after resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        self.context.refresh_geometry()
    }

    /// Enter alternative screen buffer (flushes immediately)
    pub fn enter_alt_screen(&mut self) -> Result<()> {
        if !self.in_alt_screen {
            write!(self.writer, "\x1b[?1049h")?;
            self.writer.flush()?;
            self.in_alt_screen = true;
        }
        Ok(())
    }

    /// Exit alternative screen buffer (flushes immediately)
    pub fn exit_alt_screen(&mut self) -> Result<()> {
        if self.in_alt_screen {
            write!(self.writer, "\x1b[?1049l")?;
            self.writer.flush()?;
            self.in_alt_screen = false;
        }
        Ok(())
    }

    /// Check if the renderer is in alternative screen mode
    pub fn in_alt_screen(&self) -> bool {
        self.in_alt_screen
    }

    /// Clear the screen
    pub fn clear(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[2J")?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    #[inline]
    pub fn move_cursor(&mut self, col: u16, row: u16) -> Result<()> {
        write!(self.writer, "\x1b[{};{}H", row + 1, col + 1)?;
        Ok(())
    }

    /// Hide cursor (buffered)
    pub fn hide_cursor(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[?25l")?;
        Ok(())
    }

    /// Show cursor (buffered)
    pub fn show_cursor(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[?25h")?;
        Ok(())
    }

    /// Write text at the current cursor position
    #[inline]
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        write!(self.writer, "{}", text)?;
        Ok(())
    }

    /// Write text with ANSI color/style codes, resetting afterwards
    #[inline]
    pub fn write_styled(&mut self, text: &str, style: &str) -> Result<()> {
        write!(self.writer, "{}{}\x1b[0m", style, text)?;
        Ok(())
    }

    /// Write a repeated character
    #[inline]
    pub fn write_repeated(&mut self, ch: char, count: usize) -> Result<()> {
        for _ in 0..count {
            write!(self.writer, "{}", ch)?;
        }
        Ok(())
    }

    /// Render an RGB image at a cell position, scaled into a cell box
    pub fn render_image(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        col: u16,
        row: u16,
        cell_box: (u16, u16),
    ) -> Result<()> {
        self.image_renderer
            .render_rgb(&mut self.writer, pixels, width, height, col, row, cell_box)
    }

    /// Delete all graphics images tracked by this renderer
    ///
    /// Call before rendering new images so stale frames do not persist.
    pub fn clear_images(&mut self) -> Result<()> {
        self.image_renderer.delete_images(&mut self.writer)
    }

    /// Begin a render frame: hide the cursor and drop stale images
    pub fn begin_frame(&mut self) -> Result<()> {
        self.hide_cursor()?;
        self.clear_images()?;
        Ok(())
    }

    /// End a render frame: show the cursor and flush buffered output
    pub fn end_frame(&mut self) -> Result<()> {
        self.show_cursor()?;
        self.flush()?;
        Ok(())
    }

    /// Flush the output buffer to the terminal
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        // Restore terminal state even when unwinding
        let _ = self.exit_alt_screen();
        let _ = self.show_cursor();
        let _ = self.writer.flush();
    }
}

/// Helpers to encode pixel buffers as PNG
pub mod image_helpers {
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    /// Encode an RGB8 buffer to PNG
    pub fn rgb_to_png(width: u32, height: u32, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        let img = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, data.to_vec())
            .ok_or_else(|| anyhow::anyhow!("Invalid RGB buffer dimensions"))?;

        let mut png_data = Vec::new();
        img.write_to(&mut Cursor::new(&mut png_data), image::ImageFormat::Png)?;
        Ok(png_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_renderer_accepts_output() {
        let mut renderer = Renderer::headless();
        renderer.move_cursor(3, 4).unwrap();
        renderer.write_text("hello").unwrap();
        renderer.write_styled("world", "\x1b[1m").unwrap();
        renderer.flush().unwrap();
    }

    #[test]
    fn test_headless_image_render() {
        let mut renderer = Renderer::headless();
        let pixels = [200u8; 4 * 4 * 3];
        renderer.render_image(&pixels, 4, 4, 0, 0, (2, 1)).unwrap();
        renderer.end_frame().unwrap();
    }

    #[test]
    fn test_image_helpers() {
        let data = vec![255, 0, 0, 255, 0, 0, 255, 0, 0, 255, 0, 0];

        let png = image_helpers::rgb_to_png(2, 2, &data).unwrap();
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_image_helpers_rejects_bad_dimensions() {
        assert!(image_helpers::rgb_to_png(10, 10, &[0u8; 3]).is_err());
    }
}
