//! Sixel graphics rendering backend

use super::ImageRenderer;
use anyhow::Result;
use std::fmt::Write as FmtWrite;
use std::io::Write;

impl ImageRenderer {
    /// Render via Sixel graphics
    pub(super) fn render_sixel<W: Write>(
        &mut self,
        writer: &mut W,
        pixels: &[u8],
        width: u32,
        height: u32,
        col: u16,
        row: u16,
    ) -> Result<()> {
        anyhow::ensure!(
            pixels.len() >= (width * height * 3) as usize,
            "RGB buffer too small for {}x{} image",
            width,
            height
        );

        write!(writer, "\x1b[{};{}H", row + 1, col + 1)?;

        let sixel_data = encode_sixel(pixels, width, height);

        if self.passthrough {
            self.write_passthrough(writer, &sixel_data)?;
        } else {
            write!(writer, "{}", sixel_data)?;
        }

        Ok(())
    }
}

/// Encode RGB pixels to sixel (simplified per-pixel-register encoder)
fn encode_sixel(pixels: &[u8], width: u32, height: u32) -> String {
    let mut output = String::new();

    output.push_str("\x1bPq");

    // One sixel band covers six pixel rows; sample the band's top row
    for y in (0..height).step_by(6) {
        for x in 0..width {
            let idx = ((y * width + x) * 3) as usize;
            let (r, g, b) = (pixels[idx], pixels[idx + 1], pixels[idx + 2]);

            // Sixel color space is percent-based
            write!(
                output,
                "#1;2;{};{};{}",
                r as u32 * 100 / 255,
                g as u32 * 100 / 255,
                b as u32 * 100 / 255
            )
            .ok();
            output.push_str("#1?");
        }
        output.push_str("$-");
    }

    output.push_str("\x1b\\");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixel_envelope() {
        let pixels = [128u8; 12 * 3]; // 4x3 gray image
        let data = encode_sixel(&pixels, 4, 3);
        assert!(data.starts_with("\x1bPq"));
        assert!(data.ends_with("\x1b\\"));
    }

    #[test]
    fn test_sixel_undersized_buffer_rejected() {
        let mut renderer = ImageRenderer::new(crate::graphics::GraphicsBackend::Sixel, false);
        let mut out = Vec::new();
        let result = renderer.render_sixel(&mut out, &[0u8; 3], 4, 4, 0, 0);
        assert!(result.is_err());
    }
}
