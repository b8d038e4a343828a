//! Scaling with a fixed-size output canvas.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::buffer::RgbBuffer;
use crate::clip::{ClipRect, RetentionPolicy};
use crate::error::{ConfigError, GeometryError};
use crate::raster::{paste_on_canvas, resize_exact};
use crate::transform::{check_range, sample_uniform, Transform};

/// Boxes pushed off the canvas by upscaling are dropped below 20%
/// retained area.
const SCALE_ALPHA: f64 = 0.2;

/// Resize the image by factors sampled per axis, then paste the result
/// onto a zero canvas of the original dimensions at offset (0, 0):
/// upscaled content is cropped, downscaled content is padded.
///
/// With `diff` set, the x and y factors are sampled independently;
/// otherwise one sample from the x range drives both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    scale_x_min: f64,
    scale_x_max: f64,
    scale_y_min: f64,
    scale_y_max: f64,
    diff: bool,
    retention: RetentionPolicy,
}

impl Scale {
    pub fn new(
        x_range: (f64, f64),
        y_range: (f64, f64),
        diff: bool,
    ) -> Result<Self, ConfigError> {
        check_range(x_range.0, x_range.1)?;
        check_range(y_range.0, y_range.1)?;
        for bound in [x_range.0, x_range.1, y_range.0, y_range.1] {
            if bound <= 0.0 {
                return Err(ConfigError::NonPositiveScale(bound));
            }
        }
        Ok(Self {
            scale_x_min: x_range.0,
            scale_x_max: x_range.1,
            scale_y_min: y_range.0,
            scale_y_max: y_range.1,
            diff,
            retention: RetentionPolicy::new(SCALE_ALPHA)?,
        })
    }

    /// A scale by fixed x/y factors.
    pub fn fixed(scale_x: f64, scale_y: f64) -> Result<Self, ConfigError> {
        Self::new((scale_x, scale_x), (scale_y, scale_y), true)
    }
}

impl Transform for Scale {
    fn apply(
        &self,
        image: &RgbBuffer,
        boxes: &[BoundingBox],
        rng: &mut dyn RngCore,
    ) -> Result<(RgbBuffer, Vec<BoundingBox>), GeometryError> {
        let scale_x = sample_uniform(rng, self.scale_x_min, self.scale_x_max);
        let scale_y = if self.diff {
            sample_uniform(rng, self.scale_y_min, self.scale_y_max)
        } else {
            scale_x
        };

        let (w, h) = (image.width, image.height);
        let new_w = ((w as f64 * scale_x).round() as u32).max(1);
        let new_h = ((h as f64 * scale_y).round() as u32).max(1);

        let resized = resize_exact(image, new_w, new_h)?;
        let output = paste_on_canvas(&resized, w, h, 0, 0);

        let scaled: Vec<BoundingBox> = boxes.iter().map(|b| b.scaled(scale_x, scale_y)).collect();
        let kept = self
            .retention
            .clip_and_filter(&scaled, ClipRect::of_image(w, h));

        Ok((output, kept))
    }
}
