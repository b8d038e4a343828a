//! Axis-aligned bounding boxes in absolute pixel coordinates.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// An axis-aligned box with an opaque class label.
///
/// Coordinates are floating-point pixels relative to the image the box
/// belongs to. A well-formed box has `xmax > xmin` and `ymax > ymin`;
/// ingestion goes through [`BoundingBox::new`], which enforces this.
/// Geometric transforms produce intermediate values through
/// [`BoundingBox::from_parts`] and restore the invariant when clipping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    /// Opaque class label, carried through every transform unchanged.
    pub class_id: u32,
}

/// An ordered list of boxes attached to one image.
pub type BoxList = Vec<BoundingBox>;

impl BoundingBox {
    /// Create a validated box. This is the ingestion path for annotation
    /// readers.
    pub fn new(
        xmin: f64,
        ymin: f64,
        xmax: f64,
        ymax: f64,
        class_id: u32,
    ) -> Result<Self, GeometryError> {
        if xmax <= xmin || ymax <= ymin {
            return Err(GeometryError::MalformedBox {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
            class_id,
        })
    }

    /// Build a box without validation. Intermediate transform results may
    /// temporarily be degenerate or out of bounds; the retention filter
    /// restores the invariant.
    pub fn from_parts(xmin: f64, ymin: f64, xmax: f64, ymax: f64, class_id: u32) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            class_id,
        }
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Shift both corners by (dx, dy).
    pub fn shifted(&self, dx: f64, dy: f64) -> Self {
        Self {
            xmin: self.xmin + dx,
            ymin: self.ymin + dy,
            xmax: self.xmax + dx,
            ymax: self.ymax + dy,
            class_id: self.class_id,
        }
    }

    /// Scale both corners by independent x/y factors.
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self {
            xmin: self.xmin * sx,
            ymin: self.ymin * sy,
            xmax: self.xmax * sx,
            ymax: self.ymax * sy,
            class_id: self.class_id,
        }
    }
}
