//! Kitty graphics protocol rendering backend

use super::ImageRenderer;
use anyhow::Result;
use std::fmt::Write as FmtWrite;
use std::io::Write;

/// Kitty protocol payload chunk size (protocol maximum is 4096)
const CHUNK_SIZE: usize = 4096;

/// Image id used for all transmissions; lets delete-by-id clear stale frames
const IMAGE_ID: u32 = 1;

impl ImageRenderer {
    /// Render via the Kitty graphics protocol: PNG-encode, base64, transmit
    /// in chunks with cell-box scaling
    pub(super) fn render_kitty<W: Write>(
        &mut self,
        writer: &mut W,
        pixels: &[u8],
        width: u32,
        height: u32,
        col: u16,
        row: u16,
        cell_box: (u16, u16),
    ) -> Result<()> {
        let png = crate::render::image_helpers::rgb_to_png(width, height, pixels)?;
        let encoded = encode_base64(&png);
        let (cols, rows) = cell_box;

        write!(writer, "\x1b[{};{}H", row + 1, col + 1)?;

        let total_chunks = encoded.len().div_ceil(CHUNK_SIZE).max(1);
        for (i, chunk) in encoded.as_bytes().chunks(CHUNK_SIZE).enumerate() {
            let more = if i + 1 == total_chunks { 0 } else { 1 };

            self.line_buffer.clear();
            if i == 0 {
                write!(
                    self.line_buffer,
                    "\x1b_Ga=T,f=100,t=d,i={},c={},r={},C=1,q=2,m={};",
                    IMAGE_ID, cols, rows, more
                )
                .ok();
            } else {
                write!(self.line_buffer, "\x1b_Gm={};", more).ok();
            }

            // Base64 output is ASCII, safe to append as str
            self.line_buffer.push_str(std::str::from_utf8(chunk)?);
            self.line_buffer.push_str("\x1b\\");

            if self.passthrough {
                self.write_passthrough(writer, &self.line_buffer)?;
            } else {
                write!(writer, "{}", self.line_buffer)?;
            }
        }

        Ok(())
    }
}

/// Encode raw bytes to base64 with a pre-sized buffer
fn encode_base64(data: &[u8]) -> String {
    let mut encoded = String::with_capacity(data.len().div_ceil(3) * 4);
    base64::Engine::encode_string(
        &base64::engine::general_purpose::STANDARD,
        data,
        &mut encoded,
    );
    encoded
}
