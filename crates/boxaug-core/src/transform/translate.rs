//! Translation with a fixed-size output canvas.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::buffer::RgbBuffer;
use crate::clip::{ClipRect, RetentionPolicy};
use crate::error::{ConfigError, GeometryError};
use crate::raster::paste_on_canvas;
use crate::transform::{check_range, sample_uniform, Transform};

/// Boxes shifted mostly off the canvas are dropped below 25% retained
/// area.
const TRANSLATE_ALPHA: f64 = 0.25;

/// Shift pixel content by fractions of the image dimensions sampled from
/// configured ranges. Vacated regions are black; content shifted past an
/// edge is cropped.
///
/// Fractions must lie strictly inside (-1, 1): a full-image shift would
/// leave no content at all. With `diff` set, the x and y fractions are
/// sampled independently; otherwise one sample from the x range drives
/// both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Translate {
    translate_x_min: f64,
    translate_x_max: f64,
    translate_y_min: f64,
    translate_y_max: f64,
    diff: bool,
    retention: RetentionPolicy,
}

impl Translate {
    pub fn new(
        x_range: (f64, f64),
        y_range: (f64, f64),
        diff: bool,
    ) -> Result<Self, ConfigError> {
        check_range(x_range.0, x_range.1)?;
        check_range(y_range.0, y_range.1)?;
        for bound in [x_range.0, x_range.1, y_range.0, y_range.1] {
            if bound <= -1.0 || bound >= 1.0 {
                return Err(ConfigError::TranslationOutOfRange(bound));
            }
        }
        Ok(Self {
            translate_x_min: x_range.0,
            translate_x_max: x_range.1,
            translate_y_min: y_range.0,
            translate_y_max: y_range.1,
            diff,
            retention: RetentionPolicy::new(TRANSLATE_ALPHA)?,
        })
    }

    /// A translation by fixed x/y fractions.
    pub fn fixed(shift_x: f64, shift_y: f64) -> Result<Self, ConfigError> {
        Self::new((shift_x, shift_x), (shift_y, shift_y), true)
    }
}

impl Transform for Translate {
    fn apply(
        &self,
        image: &RgbBuffer,
        boxes: &[BoundingBox],
        rng: &mut dyn RngCore,
    ) -> Result<(RgbBuffer, Vec<BoundingBox>), GeometryError> {
        let fraction_x = sample_uniform(rng, self.translate_x_min, self.translate_x_max);
        let fraction_y = if self.diff {
            sample_uniform(rng, self.translate_y_min, self.translate_y_max)
        } else {
            fraction_x
        };

        let (w, h) = (image.width, image.height);
        let shift_x = (fraction_x * w as f64) as i64;
        let shift_y = (fraction_y * h as f64) as i64;

        let output = paste_on_canvas(image, w, h, shift_x, shift_y);
        let shifted: Vec<BoundingBox> = boxes
            .iter()
            .map(|b| b.shifted(shift_x as f64, shift_y as f64))
            .collect();
        let kept = self
            .retention
            .clip_and_filter(&shifted, ClipRect::of_image(w, h));

        Ok((output, kept))
    }
}
