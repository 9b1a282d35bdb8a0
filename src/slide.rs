//! Slide values - the immutable content a carousel cycles through

use anyhow::Result;
use image::GenericImageView;

/// Pixel data for one slide
#[derive(Debug, Clone)]
enum PixelData {
    /// Raw RGB bytes (3 bytes per pixel)
    Rgb(Vec<u8>),
    /// Raw RGBA bytes (4 bytes per pixel)
    Rgba(Vec<u8>),
    /// Pre-encoded PNG data
    Png(Vec<u8>),
}

/// A slide's image with known pixel dimensions
///
/// The carousel never loads or fetches anything; hosts hand it pixels in
/// whichever of these forms they already have.
#[derive(Debug, Clone)]
pub struct SlideImage {
    data: PixelData,
    width: u32,
    height: u32,
}

impl SlideImage {
    /// Create an image from raw RGB data
    pub fn from_rgb(data: Vec<u8>, width: u32, height: u32) -> Self {
        SlideImage {
            data: PixelData::Rgb(data),
            width,
            height,
        }
    }

    /// Create an image from raw RGBA data
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        SlideImage {
            data: PixelData::Rgba(data),
            width,
            height,
        }
    }

    /// Create an image from PNG data (dimensions read from the header)
    pub fn from_png(data: Vec<u8>) -> Result<Self> {
        let img = image::load_from_memory(&data)?;
        let (width, height) = img.dimensions();
        Ok(SlideImage {
            data: PixelData::Png(data),
            width,
            height,
        })
    }

    /// Image dimensions in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the raw RGB data, converting from other formats if necessary
    pub fn to_rgb(&self) -> Result<Vec<u8>> {
        match &self.data {
            PixelData::Rgb(data) => Ok(data.clone()),
            PixelData::Rgba(data) => {
                let mut rgb = Vec::with_capacity((self.width * self.height * 3) as usize);
                for chunk in data.chunks(4) {
                    if chunk.len() >= 3 {
                        rgb.extend_from_slice(&chunk[..3]);
                    }
                }
                Ok(rgb)
            }
            PixelData::Png(data) => {
                let img = image::load_from_memory(data)?;
                Ok(img.to_rgb8().into_raw())
            }
        }
    }
}

/// One item of carousel content: an image, a call-to-action, and a link
///
/// Slides are supplied once at carousel construction and never mutated.
/// The id is the stable rendering key and must be unique within a deck.
#[derive(Debug, Clone)]
pub struct Slide {
    id: u32,
    image: SlideImage,
    cta_label: String,
    link: String,
}

impl Slide {
    /// Create a slide
    pub fn new(
        id: u32,
        image: SlideImage,
        cta_label: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Slide {
            id,
            image,
            cta_label: cta_label.into(),
            link: link.into(),
        }
    }

    /// Stable rendering key
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The slide's image
    pub fn image(&self) -> &SlideImage {
        &self.image
    }

    /// Call-to-action label
    pub fn cta_label(&self) -> &str {
        &self.cta_label
    }

    /// Link target (may be a placeholder)
    pub fn link(&self) -> &str {
        &self.link
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_passthrough() {
        let data = vec![1, 2, 3, 4, 5, 6];
        let img = SlideImage::from_rgb(data.clone(), 2, 1);
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.to_rgb().unwrap(), data);
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let rgba = vec![1, 2, 3, 255, 4, 5, 6, 255];
        let img = SlideImage::from_rgba(rgba, 2, 1);
        assert_eq!(img.to_rgb().unwrap(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_png_roundtrip() {
        let pixels = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 128, 128, 128];
        let png = crate::render::image_helpers::rgb_to_png(2, 2, &pixels).unwrap();

        let img = SlideImage::from_png(png).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.to_rgb().unwrap(), pixels);
    }

    #[test]
    fn test_invalid_png_rejected() {
        assert!(SlideImage::from_png(vec![0, 1, 2, 3]).is_err());
    }

    #[test]
    fn test_slide_accessors() {
        let slide = Slide::new(
            7,
            SlideImage::from_rgb(vec![0; 3], 1, 1),
            "Explore Now",
            "#",
        );
        assert_eq!(slide.id(), 7);
        assert_eq!(slide.cta_label(), "Explore Now");
        assert_eq!(slide.link(), "#");
        assert_eq!(slide.image().dimensions(), (1, 1));
    }
}
