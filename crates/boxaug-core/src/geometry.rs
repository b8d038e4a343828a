//! Pure coordinate geometry: affine matrices, box corners, enclosing boxes.
//!
//! Everything here is deterministic and side-effect free. The same affine
//! matrix drives both pixel warping (in `raster`) and corner transformation,
//! which is what keeps image content and annotations synchronized.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Rotation angles are in degrees, positive = counter-clockwise

use crate::bbox::BoundingBox;

/// A 2x3 affine transform matrix.
///
/// Row-major: `[[a, b, tx], [c, d, ty]]` maps `(x, y)` to
/// `(a*x + b*y + tx, c*x + d*y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2(pub [[f64; 3]; 2]);

impl Affine2 {
    /// The identity transform.
    pub fn identity() -> Self {
        Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
    }

    /// Rotation by `angle_degrees` about the point (cx, cy).
    ///
    /// Matches the OpenCV `getRotationMatrix2D` convention: with y growing
    /// downward, a positive angle rotates content counter-clockwise.
    pub fn rotation_about(cx: f64, cy: f64, angle_degrees: f64) -> Self {
        let rad = angle_degrees.to_radians();
        let alpha = rad.cos();
        let beta = rad.sin();
        Self([
            [alpha, beta, (1.0 - alpha) * cx - beta * cy],
            [-beta, alpha, beta * cx + (1.0 - alpha) * cy],
        ])
    }

    /// Horizontal shear: `x' = x + s*y`, `y' = y`.
    pub fn shear_x(s: f64) -> Self {
        Self([[1.0, s, 0.0], [0.0, 1.0, 0.0]])
    }

    /// The same transform followed by a translation of (dx, dy).
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut m = self.0;
        m[0][2] += dx;
        m[1][2] += dy;
        Self(m)
    }

    /// Apply the transform to a point (homogeneous multiply).
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.0;
        (
            m[0][0] * x + m[0][1] * y + m[0][2],
            m[1][0] * x + m[1][1] * y + m[1][2],
        )
    }

    /// Invert the transform. Returns `None` for singular matrices.
    pub fn inverse(&self) -> Option<Self> {
        let m = &self.0;
        let det = m[0][0] * m[1][1] - m[0][1] * m[1][0];
        if det.abs() < f64::EPSILON {
            return None;
        }
        let a = m[1][1] / det;
        let b = -m[0][1] / det;
        let c = -m[1][0] / det;
        let d = m[0][0] / det;
        // Inverse translation: -A^-1 * t
        let tx = -(a * m[0][2] + b * m[1][2]);
        let ty = -(c * m[0][2] + d * m[1][2]);
        Some(Self([[a, b, tx], [c, d, ty]]))
    }
}

/// The four corners of a box in fixed winding order:
/// top-left, top-right, bottom-left, bottom-right.
pub fn corners(bbox: &BoundingBox) -> [(f64, f64); 4] {
    [
        (bbox.xmin, bbox.ymin),
        (bbox.xmax, bbox.ymin),
        (bbox.xmin, bbox.ymax),
        (bbox.xmax, bbox.ymax),
    ]
}

/// The smallest axis-aligned rectangle containing all four corners,
/// as (xmin, ymin, xmax, ymax).
pub fn enclosing_box(corners: &[(f64, f64); 4]) -> (f64, f64, f64, f64) {
    let mut xmin = f64::INFINITY;
    let mut ymin = f64::INFINITY;
    let mut xmax = f64::NEG_INFINITY;
    let mut ymax = f64::NEG_INFINITY;
    for &(x, y) in corners {
        xmin = xmin.min(x);
        ymin = ymin.min(y);
        xmax = xmax.max(x);
        ymax = ymax.max(y);
    }
    (xmin, ymin, xmax, ymax)
}

/// Push every box through an affine transform and re-derive axis-aligned
/// boxes from the transformed corners.
///
/// A rotated rectangle is over-approximated by its axis-aligned hull; this
/// precision loss is inherent to axis-aligned annotation formats and is
/// accepted rather than worked around.
pub fn transform_boxes(boxes: &[BoundingBox], m: &Affine2) -> Vec<BoundingBox> {
    boxes
        .iter()
        .map(|b| {
            let pts = corners(b);
            let moved = [
                m.apply(pts[0].0, pts[0].1),
                m.apply(pts[1].0, pts[1].1),
                m.apply(pts[2].0, pts[2].1),
                m.apply(pts[3].0, pts[3].1),
            ];
            let (xmin, ymin, xmax, ymax) = enclosing_box(&moved);
            BoundingBox::from_parts(xmin, ymin, xmax, ymax, b.class_id)
        })
        .collect()
}

/// Mirror boxes across the vertical center line of an image of the given
/// width.
pub fn mirror_horizontal(boxes: &[BoundingBox], width: f64) -> Vec<BoundingBox> {
    boxes
        .iter()
        .map(|b| BoundingBox::from_parts(width - b.xmax, b.ymin, width - b.xmin, b.ymax, b.class_id))
        .collect()
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn box_strategy() -> impl Strategy<Value = BoundingBox> {
        (0.0f64..200.0, 0.0f64..200.0, 1.0f64..100.0, 1.0f64..100.0, 0u32..20).prop_map(
            |(x, y, w, h, class_id)| BoundingBox::from_parts(x, y, x + w, y + h, class_id),
        )
    }

    proptest! {
        /// Property: the enclosing box contains all four transformed corners.
        #[test]
        fn prop_enclosing_box_contains_corners(
            b in box_strategy(),
            angle in -180.0f64..180.0,
        ) {
            let m = Affine2::rotation_about(50.0, 50.0, angle);
            let pts = corners(&b);
            let out = transform_boxes(&[b], &m)[0];
            for (x, y) in pts {
                let (tx, ty) = m.apply(x, y);
                prop_assert!(tx >= out.xmin - 1e-9 && tx <= out.xmax + 1e-9);
                prop_assert!(ty >= out.ymin - 1e-9 && ty <= out.ymax + 1e-9);
            }
        }

        /// Property: rotation never shrinks the axis-aligned hull below the
        /// original area (re-axis-alignment over-approximates).
        #[test]
        fn prop_rotation_never_shrinks_area(
            b in box_strategy(),
            angle in -180.0f64..180.0,
        ) {
            let m = Affine2::rotation_about(0.0, 0.0, angle);
            let out = transform_boxes(&[b], &m)[0];
            prop_assert!(out.area() >= b.area() - 1e-6);
        }

        /// Property: inverse(apply(p)) == p for rotations.
        #[test]
        fn prop_inverse_roundtrip(
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
            angle in -180.0f64..180.0,
        ) {
            let m = Affine2::rotation_about(10.0, 20.0, angle);
            let inv = m.inverse().unwrap();
            let (fx, fy) = m.apply(x, y);
            let (bx, by) = inv.apply(fx, fy);
            prop_assert!((bx - x).abs() < 1e-6);
            prop_assert!((by - y).abs() < 1e-6);
        }
    }
}
