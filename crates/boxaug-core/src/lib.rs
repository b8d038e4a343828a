//! Boxaug Core - box-consistent image augmentation
//!
//! This crate provides geometric and photometric transforms for object
//! detection training data. Every geometric transform warps the pixel
//! buffer and the bounding boxes with the same mapping, then clips the
//! boxes to the output canvas and drops the ones that lost too much of
//! their area.
//!
//! Transforms are immutable once constructed: parameter ranges are
//! validated up front ([`ConfigError`]) so a pipeline cannot fail
//! mid-epoch on bad configuration. Randomness is injected through
//! `rand::RngCore`, which keeps every run reproducible from a seed.

pub mod bbox;
pub mod buffer;
pub mod clip;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod raster;
pub mod transform;

pub use bbox::{BoundingBox, BoxList};
pub use buffer::RgbBuffer;
pub use clip::{ClipRect, RetentionPolicy};
pub use error::{ConfigError, GeometryError};
pub use geometry::Affine2;
pub use pipeline::TransformPipeline;
pub use transform::{
    Brightness, Contrast, HorizontalFlip, LetterboxResize, Rotate, Saturation, Scale, Shear,
    Transform, Translate,
};
