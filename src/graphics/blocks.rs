//! Unicode block character rendering backend (universal fallback)

use super::ImageRenderer;
use anyhow::Result;
use std::io::Write;

/// Density ramp from dark to bright
const BLOCKS: [char; 8] = [' ', '░', '░', '▒', '▒', '▓', '▓', '█'];

impl ImageRenderer {
    /// Render using Unicode block characters
    ///
    /// Each cell averages its source pixel region and maps the brightness
    /// onto a density ramp. Output is batched per line.
    pub(super) fn render_blocks<W: Write>(
        &mut self,
        writer: &mut W,
        pixels: &[u8],
        width: u32,
        height: u32,
        col: u16,
        row: u16,
        cell_box: (u16, u16),
    ) -> Result<()> {
        let (cell_cols, cell_rows) = (cell_box.0 as u32, cell_box.1 as u32);
        if cell_cols == 0 || cell_rows == 0 || width == 0 || height == 0 {
            return Ok(());
        }

        let step_x = (width / cell_cols).max(1);
        let step_y = (height / cell_rows).max(1);

        for cy in 0..cell_rows {
            self.line_buffer.clear();

            for cx in 0..cell_cols {
                let x0 = cx * step_x;
                let y0 = cy * step_y;

                if x0 >= width || y0 >= height {
                    self.line_buffer.push(' ');
                    continue;
                }

                let brightness = region_brightness(pixels, width, height, x0, y0, step_x, step_y);
                let block_idx = (brightness / 32).min(7) as usize;
                self.line_buffer.push(BLOCKS[block_idx]);
            }

            write!(
                writer,
                "\x1b[{};{}H{}",
                row as u32 + cy + 1,
                col + 1,
                self.line_buffer
            )?;
        }

        Ok(())
    }
}

/// Average brightness of a pixel region, 0-255
fn region_brightness(
    pixels: &[u8],
    width: u32,
    height: u32,
    x0: u32,
    y0: u32,
    region_w: u32,
    region_h: u32,
) -> u32 {
    let x1 = (x0 + region_w).min(width);
    let y1 = (y0 + region_h).min(height);

    let mut sum = 0u64;
    let mut count = 0u64;

    for y in y0..y1 {
        for x in x0..x1 {
            let idx = ((y * width + x) * 3) as usize;
            if idx + 2 < pixels.len() {
                let r = pixels[idx] as u64;
                let g = pixels[idx + 1] as u64;
                let b = pixels[idx + 2] as u64;
                sum += (r + g + b) / 3;
                count += 1;
            }
        }
    }

    if count == 0 {
        0
    } else {
        (sum / count) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::GraphicsBackend;

    #[test]
    fn test_region_brightness_extremes() {
        let white = [255u8; 4 * 4 * 3];
        assert_eq!(region_brightness(&white, 4, 4, 0, 0, 4, 4), 255);

        let black = [0u8; 4 * 4 * 3];
        assert_eq!(region_brightness(&black, 4, 4, 0, 0, 4, 4), 0);
    }

    #[test]
    fn test_blocks_output_dimensions() {
        let mut renderer = ImageRenderer::new(GraphicsBackend::Blocks, false);
        let mut out = Vec::new();

        let pixels = [255u8; 8 * 8 * 3];
        renderer
            .render_blocks(&mut out, &pixels, 8, 8, 0, 0, (4, 2))
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        // Two positioned lines of four full blocks each
        assert_eq!(text.matches('█').count(), 8);
        assert!(text.contains("\x1b[1;1H"));
        assert!(text.contains("\x1b[2;1H"));
    }

    #[test]
    fn test_blocks_zero_box_is_noop() {
        let mut renderer = ImageRenderer::new(GraphicsBackend::Blocks, false);
        let mut out = Vec::new();
        renderer
            .render_blocks(&mut out, &[255u8; 12], 2, 2, 0, 0, (0, 5))
            .unwrap();
        assert!(out.is_empty());
    }
}
