//! Letterbox resize to a fixed square dimension.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::buffer::RgbBuffer;
use crate::error::{ConfigError, GeometryError};
use crate::raster::letterbox;
use crate::transform::Transform;

/// Resize into a `target_dim x target_dim` square, preserving aspect ratio
/// and padding symmetrically with black.
///
/// Boxes are mapped by `coord * scale + pad`. This variant never drops a
/// box: content only shrinks into the canvas, so every in-canvas box stays
/// in canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LetterboxResize {
    target_dim: u32,
}

impl LetterboxResize {
    pub fn new(target_dim: u32) -> Result<Self, ConfigError> {
        if target_dim == 0 {
            return Err(ConfigError::ZeroTargetDim);
        }
        Ok(Self { target_dim })
    }

    pub fn target_dim(&self) -> u32 {
        self.target_dim
    }
}

impl Transform for LetterboxResize {
    fn apply(
        &self,
        image: &RgbBuffer,
        boxes: &[BoundingBox],
        _rng: &mut dyn RngCore,
    ) -> Result<(RgbBuffer, Vec<BoundingBox>), GeometryError> {
        let (output, scale, pad_x, pad_y) = letterbox(image, self.target_dim)?;

        let mapped: Vec<BoundingBox> = boxes
            .iter()
            .map(|b| b.scaled(scale, scale).shifted(pad_x, pad_y))
            .collect();

        Ok((output, mapped))
    }
}
