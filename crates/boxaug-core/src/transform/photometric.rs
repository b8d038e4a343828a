//! Pixel-only photometric filters: brightness, contrast, saturation.
//!
//! These touch no coordinates at all; boxes pass through unchanged. They
//! share the geometric transforms' capability so that a pipeline can mix
//! both kinds freely.
//!
//! Factor semantics follow the usual convention: 1.0 is a no-op, values
//! below 1.0 reduce the effect, values above 1.0 amplify it. Brightness
//! multiplies; contrast blends toward the image's mean luminance;
//! saturation blends toward the per-pixel grayscale value.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::buffer::RgbBuffer;
use crate::error::{ConfigError, GeometryError};
use crate::transform::{check_range, sample_uniform, Transform};

/// ITU-R BT.601 luminance weights.
#[inline]
fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

fn check_factor_range(min: f64, max: f64) -> Result<(), ConfigError> {
    check_range(min, max)?;
    if min <= 0.0 {
        return Err(ConfigError::NonPositiveFactor(min));
    }
    Ok(())
}

/// Map every sample through `f` into a new buffer, leaving boxes alone.
fn map_pixels(image: &RgbBuffer, f: impl Fn(f32, f32, f32) -> [f32; 3]) -> RgbBuffer {
    let mut output = image.clone();
    for chunk in output.pixels.chunks_exact_mut(3) {
        let out = f(chunk[0] as f32, chunk[1] as f32, chunk[2] as f32);
        chunk[0] = out[0].clamp(0.0, 255.0).round() as u8;
        chunk[1] = out[1].clamp(0.0, 255.0).round() as u8;
        chunk[2] = out[2].clamp(0.0, 255.0).round() as u8;
    }
    output
}

/// Multiply all samples by a factor sampled from the configured range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brightness {
    factor_min: f64,
    factor_max: f64,
}

impl Brightness {
    pub fn new(factor_min: f64, factor_max: f64) -> Result<Self, ConfigError> {
        check_factor_range(factor_min, factor_max)?;
        Ok(Self {
            factor_min,
            factor_max,
        })
    }
}

impl Transform for Brightness {
    fn apply(
        &self,
        image: &RgbBuffer,
        boxes: &[BoundingBox],
        rng: &mut dyn RngCore,
    ) -> Result<(RgbBuffer, Vec<BoundingBox>), GeometryError> {
        let factor = sample_uniform(rng, self.factor_min, self.factor_max) as f32;
        let output = map_pixels(image, |r, g, b| [r * factor, g * factor, b * factor]);
        Ok((output, boxes.to_vec()))
    }
}

/// Blend toward the mean luminance of the whole image by a factor sampled
/// from the configured range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contrast {
    factor_min: f64,
    factor_max: f64,
}

impl Contrast {
    pub fn new(factor_min: f64, factor_max: f64) -> Result<Self, ConfigError> {
        check_factor_range(factor_min, factor_max)?;
        Ok(Self {
            factor_min,
            factor_max,
        })
    }
}

impl Transform for Contrast {
    fn apply(
        &self,
        image: &RgbBuffer,
        boxes: &[BoundingBox],
        rng: &mut dyn RngCore,
    ) -> Result<(RgbBuffer, Vec<BoundingBox>), GeometryError> {
        let factor = sample_uniform(rng, self.factor_min, self.factor_max) as f32;

        let mut sum = 0.0f64;
        for chunk in image.pixels.chunks_exact(3) {
            sum += luminance(chunk[0] as f32, chunk[1] as f32, chunk[2] as f32) as f64;
        }
        let mean = if image.pixel_count() > 0 {
            (sum / image.pixel_count() as f64) as f32
        } else {
            0.0
        };

        let output = map_pixels(image, |r, g, b| {
            [
                mean + factor * (r - mean),
                mean + factor * (g - mean),
                mean + factor * (b - mean),
            ]
        });
        Ok((output, boxes.to_vec()))
    }
}

/// Blend toward per-pixel grayscale by a factor sampled from the
/// configured range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Saturation {
    factor_min: f64,
    factor_max: f64,
}

impl Saturation {
    pub fn new(factor_min: f64, factor_max: f64) -> Result<Self, ConfigError> {
        check_factor_range(factor_min, factor_max)?;
        Ok(Self {
            factor_min,
            factor_max,
        })
    }
}

impl Transform for Saturation {
    fn apply(
        &self,
        image: &RgbBuffer,
        boxes: &[BoundingBox],
        rng: &mut dyn RngCore,
    ) -> Result<(RgbBuffer, Vec<BoundingBox>), GeometryError> {
        let factor = sample_uniform(rng, self.factor_min, self.factor_max) as f32;
        let output = map_pixels(image, |r, g, b| {
            let gray = luminance(r, g, b);
            [
                gray + factor * (r - gray),
                gray + factor * (g - gray),
                gray + factor * (b - gray),
            ]
        });
        Ok((output, boxes.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_image() -> RgbBuffer {
        let mut img = RgbBuffer::zeros(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                img.set_pixel(x, y, [100, 150, 200]);
            }
        }
        img
    }

    fn sample_boxes() -> Vec<BoundingBox> {
        vec![BoundingBox::new(0.0, 0.0, 2.0, 2.0, 1).unwrap()]
    }

    #[test]
    fn test_factor_validation() {
        assert!(Brightness::new(0.8, 1.2).is_ok());
        assert_eq!(
            Brightness::new(0.0, 1.2).unwrap_err(),
            ConfigError::NonPositiveFactor(0.0)
        );
        assert!(Contrast::new(1.5, 1.0).is_err());
        assert!(Saturation::new(-0.5, 0.5).is_err());
    }

    #[test]
    fn test_unit_factor_is_identity() {
        let img = test_image();
        let mut rng = StdRng::seed_from_u64(0);

        let (out, boxes) = Brightness::new(1.0, 1.0)
            .unwrap()
            .apply(&img, &sample_boxes(), &mut rng)
            .unwrap();
        assert_eq!(out.pixels, img.pixels);
        assert_eq!(boxes, sample_boxes());

        let (out, _) = Saturation::new(1.0, 1.0)
            .unwrap()
            .apply(&img, &[], &mut rng)
            .unwrap();
        assert_eq!(out.pixels, img.pixels);
    }

    #[test]
    fn test_brightness_scales_and_clamps() {
        let img = test_image();
        let mut rng = StdRng::seed_from_u64(1);

        let (out, _) = Brightness::new(1.5, 1.5)
            .unwrap()
            .apply(&img, &[], &mut rng)
            .unwrap();
        // 100 * 1.5 = 150, 200 * 1.5 = 300 clamps to 255
        assert_eq!(out.pixel(0, 0), [150, 225, 255]);
    }

    #[test]
    fn test_contrast_pulls_toward_mean() {
        let img = test_image();
        let mut rng = StdRng::seed_from_u64(2);

        let (out, _) = Contrast::new(0.5, 0.5)
            .unwrap()
            .apply(&img, &[], &mut rng)
            .unwrap();
        let p = out.pixel(0, 0);
        // Channel spread shrinks around the mean luminance (~140.8)
        assert!(p[0] > 100 && p[0] < 144);
        assert!(p[2] < 200 && p[2] > 144);
    }

    #[test]
    fn test_zero_saturation_is_grayscale() {
        let img = test_image();
        let mut rng = StdRng::seed_from_u64(3);

        let (out, _) = Saturation::new(1e-9, 1e-9)
            .unwrap()
            .apply(&img, &[], &mut rng)
            .unwrap();
        let p = out.pixel(0, 0);
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
    }

    #[test]
    fn test_boxes_pass_through_unchanged() {
        let img = test_image();
        let boxes = sample_boxes();
        let mut rng = StdRng::seed_from_u64(4);

        for t in [
            Box::new(Brightness::new(0.5, 1.5).unwrap()) as Box<dyn Transform>,
            Box::new(Contrast::new(0.5, 1.5).unwrap()),
            Box::new(Saturation::new(0.5, 1.5).unwrap()),
        ] {
            let (_, out_boxes) = t.apply(&img, &boxes, &mut rng).unwrap();
            assert_eq!(out_boxes, boxes);
        }
    }
}
