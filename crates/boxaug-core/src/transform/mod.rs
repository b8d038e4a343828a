//! Augmentation transforms over annotated images.
//!
//! Every transform, geometric or photometric, exposes the same capability:
//! consume an image and its boxes, produce a new image and new boxes.
//! Randomized parameters are drawn from an injected generator, so a seeded
//! generator makes any transform deterministic.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Box coordinates are absolute pixels in the output image

use rand::{Rng, RngCore};

use crate::bbox::BoundingBox;
use crate::buffer::RgbBuffer;
use crate::error::{ConfigError, GeometryError};

mod flip;
mod photometric;
mod resize;
mod rotate;
mod scale;
mod shear;
mod translate;

pub use flip::HorizontalFlip;
pub use photometric::{Brightness, Contrast, Saturation};
pub use resize::LetterboxResize;
pub use rotate::Rotate;
pub use scale::Scale;
pub use shear::Shear;
pub use translate::Translate;

/// One augmentation step over an annotated image.
///
/// Implementations never mutate their inputs; both the buffer and the box
/// list come back as fresh values. An empty box list is always valid: the
/// image transform still runs and the empty list passes through.
pub trait Transform {
    fn apply(
        &self,
        image: &RgbBuffer,
        boxes: &[BoundingBox],
        rng: &mut dyn RngCore,
    ) -> Result<(RgbBuffer, Vec<BoundingBox>), GeometryError>;
}

/// Draw a parameter uniformly from [min, max). A collapsed range returns
/// the fixed value without consuming randomness, which keeps fixed-parameter
/// transforms fully deterministic.
pub(crate) fn sample_uniform(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    if min >= max {
        min
    } else {
        rng.random_range(min..max)
    }
}

/// Validate a sampling range at construction time.
pub(crate) fn check_range(min: f64, max: f64) -> Result<(), ConfigError> {
    if min > max || min.is_nan() || max.is_nan() {
        return Err(ConfigError::EmptyRange { min, max });
    }
    Ok(())
}
