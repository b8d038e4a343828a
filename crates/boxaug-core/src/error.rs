//! Error types for the augmentation engine.

use thiserror::Error;

/// Errors raised when a transform is constructed with invalid parameters.
///
/// Parameter validation happens once at construction so that `apply` never
/// fails on configuration it has already accepted.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A sampling range where the minimum exceeds the maximum.
    #[error("empty sampling range: min {min} is greater than max {max}")]
    EmptyRange { min: f64, max: f64 },

    /// A scale factor that is zero or negative.
    #[error("scale factor must be positive, got {0}")]
    NonPositiveScale(f64),

    /// A translation fraction outside the open interval (-1, 1).
    #[error("translation fraction must lie strictly between -1 and 1, got {0}")]
    TranslationOutOfRange(f64),

    /// A zero letterbox target dimension.
    #[error("target dimension must be non-zero")]
    ZeroTargetDim,

    /// A step probability outside [0, 1].
    #[error("probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),

    /// An area-retention threshold outside [0, 1].
    #[error("area retention alpha must lie in [0, 1], got {0}")]
    InvalidAlpha(f64),

    /// A photometric factor that is zero or negative.
    #[error("adjustment factor must be positive, got {0}")]
    NonPositiveFactor(f64),
}

/// Errors raised while applying a transform to an annotated image.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// A bounding box with `xmax <= xmin` or `ymax <= ymin`.
    #[error("malformed bounding box: ({xmin}, {ymin}, {xmax}, {ymax})")]
    MalformedBox {
        xmin: f64,
        ymin: f64,
        xmax: f64,
        ymax: f64,
    },

    /// A pixel buffer whose length does not match its stated dimensions.
    #[error("pixel buffer does not match {width}x{height} RGB dimensions")]
    BufferMismatch { width: u32, height: u32 },
}
