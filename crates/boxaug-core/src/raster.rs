//! Image-space geometry: affine warps, rotation with canvas expansion,
//! letterboxing, flipping, and compositing onto fixed-size canvases.
//!
//! # Algorithm
//!
//! Warps use inverse mapping: for each pixel in the output image, the
//! inverse affine transform locates the contributing source position and a
//! bilinear sample is taken there. Positions outside the source image
//! produce black, which is what fills expanded or vacated canvas regions.

use crate::buffer::RgbBuffer;
use crate::error::GeometryError;
use crate::geometry::Affine2;

/// Get a pixel as [f64; 3] from an image at the given coordinates.
#[inline]
fn get_pixel_f64(image: &RgbBuffer, px: u32, py: u32) -> [f64; 3] {
    let p = image.pixel(px, py);
    [p[0] as f64, p[1] as f64, p[2] as f64]
}

/// Sample a pixel using bilinear interpolation.
///
/// Positions outside the image sample black. Neighbor indices are clamped
/// so that positions on the last row/column interpolate exactly instead of
/// falling off the edge.
fn sample_bilinear(image: &RgbBuffer, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width, image.height);
    if x < 0.0 || y < 0.0 || x > (w - 1) as f64 || y > (h - 1) as f64 {
        return [0, 0, 0];
    }

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    result
}

/// Warp an image through a forward affine transform into an output canvas
/// of the given dimensions.
///
/// Output pixels with no source (including everything, if the matrix is
/// singular) are black.
pub fn warp_affine(image: &RgbBuffer, m: &Affine2, out_w: u32, out_h: u32) -> RgbBuffer {
    let mut output = RgbBuffer::zeros(out_w, out_h);
    let inv = match m.inverse() {
        Some(inv) => inv,
        None => return output,
    };

    for dst_y in 0..out_h {
        for dst_x in 0..out_w {
            let (src_x, src_y) = inv.apply(dst_x as f64, dst_y as f64);
            output.set_pixel(dst_x, dst_y, sample_bilinear(image, src_x, src_y));
        }
    }
    output
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// When an image is rotated, the corners extend beyond the original bounds;
/// this is the minimum canvas that contains the entire rotated image.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let rad = angle_degrees.to_radians();
    let cos = rad.cos().abs();
    let sin = rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // new_w = |w*cos| + |h*sin|, new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image about its center, expanding the canvas so no source
/// pixel is clipped. The expanded region is black.
///
/// Returns the rotated image together with the effective matrix (rotation
/// plus the expansion translation). Box corners MUST be pushed through this
/// exact matrix, otherwise image and annotations desynchronize.
pub fn rotate_expand(image: &RgbBuffer, angle_degrees: f64) -> (RgbBuffer, Affine2) {
    let (w, h) = (image.width as f64, image.height as f64);
    let (cx, cy) = (w / 2.0, h / 2.0);

    let (new_w, new_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);
    let m = Affine2::rotation_about(cx, cy, angle_degrees)
        .translated(new_w as f64 / 2.0 - cx, new_h as f64 / 2.0 - cy);

    (warp_affine(image, &m, new_w, new_h), m)
}

/// Resize an image to exact dimensions with bilinear filtering.
pub fn resize_exact(image: &RgbBuffer, width: u32, height: u32) -> Result<RgbBuffer, GeometryError> {
    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image.to_rgb_image().ok_or(GeometryError::BufferMismatch {
        width: image.width,
        height: image.height,
    })?;

    let resized = image::imageops::resize(
        &rgb_image,
        width.max(1),
        height.max(1),
        image::imageops::FilterType::Triangle,
    );

    Ok(RgbBuffer::from_rgb_image(resized))
}

/// Resize into a `target_dim x target_dim` square preserving aspect ratio,
/// padding symmetrically with black.
///
/// Returns the letterboxed image, the scale factor, and the (pad_x, pad_y)
/// offsets. Callers map annotations by `coord * scale + pad`.
pub fn letterbox(
    image: &RgbBuffer,
    target_dim: u32,
) -> Result<(RgbBuffer, f64, f64, f64), GeometryError> {
    let (w, h) = (image.width as f64, image.height as f64);
    let t = target_dim as f64;
    let scale = (t / w).min(t / h);

    let new_w = ((w * scale).round() as u32).clamp(1, target_dim);
    let new_h = ((h * scale).round() as u32).clamp(1, target_dim);

    let resized = resize_exact(image, new_w, new_h)?;

    let pad_x = (target_dim - new_w) / 2;
    let pad_y = (target_dim - new_h) / 2;
    let canvas = paste_on_canvas(&resized, target_dim, target_dim, pad_x as i64, pad_y as i64);

    Ok((canvas, scale, pad_x as f64, pad_y as f64))
}

/// Mirror an image across its vertical center line.
pub fn flip_horizontal(image: &RgbBuffer) -> RgbBuffer {
    let mut output = RgbBuffer::zeros(image.width, image.height);
    for y in 0..image.height {
        for x in 0..image.width {
            output.set_pixel(image.width - 1 - x, y, image.pixel(x, y));
        }
    }
    output
}

/// Paste an image onto a zero-filled canvas at a signed offset, copying
/// only the overlapping region.
///
/// Used whenever a transform changes image extent but the output must keep
/// fixed dimensions: content larger than the canvas is cropped, smaller
/// content is padded with black.
pub fn paste_on_canvas(
    image: &RgbBuffer,
    canvas_w: u32,
    canvas_h: u32,
    offset_x: i64,
    offset_y: i64,
) -> RgbBuffer {
    let mut canvas = RgbBuffer::zeros(canvas_w, canvas_h);

    let dst_x0 = offset_x.max(0);
    let dst_y0 = offset_y.max(0);
    let dst_x1 = (offset_x + image.width as i64).min(canvas_w as i64);
    let dst_y1 = (offset_y + image.height as i64).min(canvas_h as i64);

    if dst_x0 >= dst_x1 || dst_y0 >= dst_y1 {
        // No overlap
        return canvas;
    }

    for dy in dst_y0..dst_y1 {
        let src_y = (dy - offset_y) as u32;
        for dx in dst_x0..dst_x1 {
            let src_x = (dx - offset_x) as u32;
            canvas.set_pixel(dx as u32, dy as u32, image.pixel(src_x, src_y));
        }
    }
    canvas
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> RgbBuffer {
        let mut img = RgbBuffer::zeros(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                img.set_pixel(x, y, [v, v, v]);
            }
        }
        img
    }

    proptest! {
        /// Property: the expanded canvas never has less area than the
        /// source (it must hold every rotated source pixel).
        #[test]
        fn prop_rotated_bounds_hold_source_area(
            (width, height) in (4u32..=64, 4u32..=64),
            angle in -180.0f64..180.0,
        ) {
            let (w, h) = compute_rotated_bounds(width, height, angle);
            prop_assert!(w >= 1 && h >= 1);
            let src_area = (width * height) as f64;
            let dst_area = (w * h) as f64;
            // Rounding of each edge can cost at most a pixel per axis
            prop_assert!(dst_area >= src_area - (w + h) as f64);
        }

        /// Property: letterbox output is always the requested square.
        #[test]
        fn prop_letterbox_square(
            (width, height) in (4u32..=64, 4u32..=64),
            target in 8u32..=128,
        ) {
            let img = create_test_image(width, height);
            let (out, scale, pad_x, pad_y) = letterbox(&img, target).unwrap();
            prop_assert_eq!(out.width, target);
            prop_assert_eq!(out.height, target);
            prop_assert!(scale > 0.0);
            prop_assert!(pad_x >= 0.0 && pad_y >= 0.0);
        }

        /// Property: pasting preserves canvas dimensions regardless of
        /// source size or offset.
        #[test]
        fn prop_paste_dimensions(
            (sw, sh) in (1u32..=32, 1u32..=32),
            (cw, ch) in (1u32..=32, 1u32..=32),
            (ox, oy) in (-40i64..=40, -40i64..=40),
        ) {
            let img = create_test_image(sw, sh);
            let out = paste_on_canvas(&img, cw, ch, ox, oy);
            prop_assert_eq!(out.width, cw);
            prop_assert_eq!(out.height, ch);
            prop_assert_eq!(out.pixels.len(), (cw * ch * 3) as usize);
        }
    }
}
