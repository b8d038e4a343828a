//! Clip boxes to a rectangle and drop those that lose too much area.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::ConfigError;

/// The rectangle boxes are clipped against, typically the output image
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl ClipRect {
    /// The full extent of a width x height image.
    pub fn of_image(width: u32, height: u32) -> Self {
        Self {
            x0: 0.0,
            y0: 0.0,
            x1: width as f64,
            y1: height as f64,
        }
    }
}

/// The minimum fraction of a box's original area that must survive
/// clipping for the box to be kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    alpha: f64,
}

impl RetentionPolicy {
    pub fn new(alpha: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&alpha) || alpha.is_nan() {
            return Err(ConfigError::InvalidAlpha(alpha));
        }
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Intersect each box with `rect` and keep only boxes that retain at
    /// least fraction `alpha` of their pre-clip area.
    ///
    /// Degenerate inputs (zero pre-clip area) and boxes clipped down to
    /// nothing are dropped unconditionally; survivors keep their class id
    /// and relative order. An empty input returns an empty output.
    pub fn clip_and_filter(&self, boxes: &[BoundingBox], rect: ClipRect) -> Vec<BoundingBox> {
        let mut kept = Vec::with_capacity(boxes.len());
        for b in boxes {
            let pre_area = b.area();
            if pre_area <= 0.0 {
                continue;
            }

            let clipped = BoundingBox::from_parts(
                b.xmin.max(rect.x0),
                b.ymin.max(rect.y0),
                b.xmax.min(rect.x1),
                b.ymax.min(rect.y1),
                b.class_id,
            );
            if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
                continue;
            }

            let lost = (pre_area - clipped.area()) / pre_area;
            if lost > 1.0 - self.alpha {
                continue;
            }
            kept.push(clipped);
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_100x100() -> ClipRect {
        ClipRect::of_image(100, 100)
    }

    #[test]
    fn test_alpha_validation() {
        assert!(RetentionPolicy::new(0.0).is_ok());
        assert!(RetentionPolicy::new(1.0).is_ok());
        assert_eq!(
            RetentionPolicy::new(1.5).unwrap_err(),
            ConfigError::InvalidAlpha(1.5)
        );
        assert!(RetentionPolicy::new(-0.1).is_err());
        assert!(RetentionPolicy::new(f64::NAN).is_err());
    }

    #[test]
    fn test_fully_inside_box_kept_unchanged() {
        let policy = RetentionPolicy::new(1.0).unwrap();
        let b = BoundingBox::from_parts(10.0, 10.0, 40.0, 30.0, 1);
        let out = policy.clip_and_filter(&[b], rect_100x100());
        assert_eq!(out, vec![b]);
    }

    #[test]
    fn test_partial_overlap_clipped() {
        let policy = RetentionPolicy::new(0.25).unwrap();
        // Half of the box hangs off the left edge: retains 50%, kept
        let b = BoundingBox::from_parts(-20.0, 0.0, 20.0, 10.0, 2);
        let out = policy.clip_and_filter(&[b], rect_100x100());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].xmin, 0.0);
        assert_eq!(out[0].xmax, 20.0);
        assert_eq!(out[0].class_id, 2);
    }

    #[test]
    fn test_mostly_outside_box_dropped() {
        let policy = RetentionPolicy::new(0.25).unwrap();
        // Only 10% of the width survives: retained fraction 0.1 < 0.25
        let b = BoundingBox::from_parts(-90.0, 0.0, 10.0, 10.0, 0);
        let out = policy.clip_and_filter(&[b], rect_100x100());
        assert!(out.is_empty());
    }

    #[test]
    fn test_fully_outside_box_dropped() {
        let policy = RetentionPolicy::new(0.0).unwrap();
        let b = BoundingBox::from_parts(200.0, 200.0, 250.0, 250.0, 0);
        let out = policy.clip_and_filter(&[b], rect_100x100());
        assert!(out.is_empty());
    }

    #[test]
    fn test_zero_area_box_dropped() {
        let policy = RetentionPolicy::new(0.0).unwrap();
        let b = BoundingBox::from_parts(10.0, 10.0, 10.0, 30.0, 0);
        let out = policy.clip_and_filter(&[b], rect_100x100());
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let policy = RetentionPolicy::new(0.5).unwrap();
        assert!(policy.clip_and_filter(&[], rect_100x100()).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let policy = RetentionPolicy::new(0.25).unwrap();
        let boxes = vec![
            BoundingBox::from_parts(0.0, 0.0, 10.0, 10.0, 1),
            BoundingBox::from_parts(-90.0, 0.0, 10.0, 10.0, 2), // dropped
            BoundingBox::from_parts(20.0, 20.0, 30.0, 30.0, 3),
        ];
        let out = policy.clip_and_filter(&boxes, rect_100x100());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].class_id, 1);
        assert_eq!(out[1].class_id, 3);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
