//! Horizontal mirroring.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::buffer::RgbBuffer;
use crate::error::GeometryError;
use crate::geometry::mirror_horizontal;
use crate::raster::flip_horizontal;
use crate::transform::Transform;

/// Mirror the image and its boxes across the vertical center line.
///
/// Deterministic; probability-driven application belongs to the pipeline.
/// Also the building block behind Shear's negative-factor handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HorizontalFlip;

impl HorizontalFlip {
    pub fn new() -> Self {
        Self
    }
}

impl Transform for HorizontalFlip {
    fn apply(
        &self,
        image: &RgbBuffer,
        boxes: &[BoundingBox],
        _rng: &mut dyn RngCore,
    ) -> Result<(RgbBuffer, Vec<BoundingBox>), GeometryError> {
        Ok((
            flip_horizontal(image),
            mirror_horizontal(boxes, image.width as f64),
        ))
    }
}
