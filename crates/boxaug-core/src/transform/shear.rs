//! Horizontal shear.
//!
//! The box math is derived for positive shear factors only: with
//! `x' = x + s*y` and `s > 0`, the leftmost transformed corner is the
//! top-left and the rightmost is the bottom-right, so
//! `xmin' = xmin + s*ymin` and `xmax' = xmax + s*ymax`. A negative factor
//! is handled by the algebraic equivalence
//! `shear(-s) == flip . shear(+s) . flip`, kept explicit so it can be
//! tested on its own.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::buffer::RgbBuffer;
use crate::clip::{ClipRect, RetentionPolicy};
use crate::error::{ConfigError, GeometryError};
use crate::geometry::{mirror_horizontal, Affine2};
use crate::raster::{flip_horizontal, resize_exact, warp_affine};
use crate::transform::{check_range, sample_uniform, Transform};

/// Shear the image horizontally by a factor sampled from
/// `[shear_min, shear_max]`, keeping boxes consistent.
///
/// The sheared image widens by `|s| * height`; image and boxes are then
/// rescaled back to the original width, so output dimensions match input
/// dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shear {
    shear_min: f64,
    shear_max: f64,
    // Alpha 0: the final clip only clamps rounding spill, never drops by
    // retained area.
    retention: RetentionPolicy,
}

impl Shear {
    pub fn new(shear_min: f64, shear_max: f64) -> Result<Self, ConfigError> {
        check_range(shear_min, shear_max)?;
        Ok(Self {
            shear_min,
            shear_max,
            retention: RetentionPolicy::new(0.0)?,
        })
    }

    /// A shear by one fixed factor.
    pub fn fixed(factor: f64) -> Result<Self, ConfigError> {
        Self::new(factor, factor)
    }
}

impl Transform for Shear {
    fn apply(
        &self,
        image: &RgbBuffer,
        boxes: &[BoundingBox],
        rng: &mut dyn RngCore,
    ) -> Result<(RgbBuffer, Vec<BoundingBox>), GeometryError> {
        let factor = sample_uniform(rng, self.shear_min, self.shear_max);
        let (w, h) = (image.width, image.height);

        let flipped = factor < 0.0;
        let (mut img, mut bxs) = if flipped {
            (flip_horizontal(image), mirror_horizontal(boxes, w as f64))
        } else {
            (image.clone(), boxes.to_vec())
        };

        let s = factor.abs();
        if s > 0.0 {
            let new_w = (((w as f64) + s * h as f64).round() as u32).max(w);
            img = warp_affine(&img, &Affine2::shear_x(s), new_w, h);
            bxs = bxs
                .iter()
                .map(|b| {
                    BoundingBox::from_parts(
                        b.xmin + s * b.ymin,
                        b.ymin,
                        b.xmax + s * b.ymax,
                        b.ymax,
                        b.class_id,
                    )
                })
                .collect();
        }

        if flipped {
            let sheared_w = img.width as f64;
            img = flip_horizontal(&img);
            bxs = mirror_horizontal(&bxs, sheared_w);
        }

        // Rescale the widened result back to the original width
        let fx = w as f64 / img.width as f64;
        let output = resize_exact(&img, w, h)?;
        let rescaled: Vec<BoundingBox> = bxs.iter().map(|b| b.scaled(fx, 1.0)).collect();

        let kept = self
            .retention
            .clip_and_filter(&rescaled, ClipRect::of_image(w, h));

        Ok((output, kept))
    }
}
