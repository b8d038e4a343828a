//! Arbitrary-angle rotation with canvas expansion and box re-derivation.
//!
//! This is the hard case of box-consistent augmentation: after rotating,
//! an axis-aligned box must be re-derived as the enclosing rectangle of
//! its four rotated corners. The image is rotated with canvas expansion
//! (so nothing is clipped), then rescaled back to the original dimensions,
//! and box coordinates follow both steps exactly.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::buffer::RgbBuffer;
use crate::clip::{ClipRect, RetentionPolicy};
use crate::error::{ConfigError, GeometryError};
use crate::geometry::transform_boxes;
use crate::raster::{resize_exact, rotate_expand};
use crate::transform::{check_range, sample_uniform, Transform};

/// Boxes that keep less than a quarter of their area after the rotated
/// content is squeezed back into the original frame are dropped.
const ROTATE_ALPHA: f64 = 0.25;

/// Rotate the image by an angle sampled from `[angle_min, angle_max]`
/// degrees, keeping boxes consistent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotate {
    angle_min: f64,
    angle_max: f64,
    retention: RetentionPolicy,
}

impl Rotate {
    pub fn new(angle_min: f64, angle_max: f64) -> Result<Self, ConfigError> {
        check_range(angle_min, angle_max)?;
        Ok(Self {
            angle_min,
            angle_max,
            retention: RetentionPolicy::new(ROTATE_ALPHA)?,
        })
    }

    /// A rotation by one fixed angle.
    pub fn fixed(angle: f64) -> Result<Self, ConfigError> {
        Self::new(angle, angle)
    }
}

impl Transform for Rotate {
    fn apply(
        &self,
        image: &RgbBuffer,
        boxes: &[BoundingBox],
        rng: &mut dyn RngCore,
    ) -> Result<(RgbBuffer, Vec<BoundingBox>), GeometryError> {
        let angle = sample_uniform(rng, self.angle_min, self.angle_max);
        let (w, h) = (image.width, image.height);

        // Rotate image and box corners with the identical matrix
        let (rotated, matrix) = rotate_expand(image, angle);
        let rotated_boxes = transform_boxes(boxes, &matrix);

        // Squeeze the expanded canvas back down to the original frame
        let scale_x = rotated.width as f64 / w as f64;
        let scale_y = rotated.height as f64 / h as f64;
        let output = resize_exact(&rotated, w, h)?;

        let rescaled: Vec<BoundingBox> = rotated_boxes
            .iter()
            .map(|b| b.scaled(1.0 / scale_x, 1.0 / scale_y))
            .collect();

        let kept = self
            .retention
            .clip_and_filter(&rescaled, ClipRect::of_image(w, h));

        Ok((output, kept))
    }
}
