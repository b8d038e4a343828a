//! Dense RGB image buffers.

use crate::error::GeometryError;

/// An image with RGB pixel data.
///
/// Pixels are stored in row-major order, 3 bytes per pixel. Every transform
/// consumes a buffer by reference and produces a fresh one; buffers are never
/// mutated in place across a transform boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length is width * height * 3.
    pub pixels: Vec<u8>,
}

impl RgbBuffer {
    /// Create a new buffer, checking that the pixel data matches the
    /// stated dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, GeometryError> {
        if pixels.len() != (width as usize) * (height as usize) * 3 {
            return Err(GeometryError::BufferMismatch { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a zero-filled (black) buffer of the given dimensions.
    pub fn zeros(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 3],
        }
    }

    /// Create a buffer from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for resampling via the image crate.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 3) as usize
    }

    /// Read the pixel at (x, y). Callers must stay in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = self.index(x, y);
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Write the pixel at (x, y). Callers must stay in bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let idx = self.index(x, y);
        self.pixels[idx] = rgb[0];
        self.pixels[idx + 1] = rgb[1];
        self.pixels[idx + 2] = rgb[2];
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let pixels = vec![0u8; 100 * 50 * 3];
        let img = RgbBuffer::new(100, 50, pixels).unwrap();

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixel_count(), 5000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let err = RgbBuffer::new(10, 10, vec![0u8; 7]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::BufferMismatch {
                width: 10,
                height: 10
            }
        );
    }

    #[test]
    fn test_zeros_is_black() {
        let img = RgbBuffer::zeros(4, 3);
        assert_eq!(img.pixels.len(), 4 * 3 * 3);
        assert!(img.pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_pixel_roundtrip() {
        let mut img = RgbBuffer::zeros(5, 5);
        img.set_pixel(2, 3, [10, 20, 30]);
        assert_eq!(img.pixel(2, 3), [10, 20, 30]);
        assert_eq!(img.pixel(3, 2), [0, 0, 0]);
    }

    #[test]
    fn test_rgb_image_roundtrip() {
        let mut img = RgbBuffer::zeros(8, 6);
        img.set_pixel(1, 1, [255, 128, 0]);

        let converted = img.to_rgb_image().unwrap();
        let back = RgbBuffer::from_rgb_image(converted);
        assert_eq!(back, img);
    }
}
