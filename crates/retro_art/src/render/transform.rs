//! Bitmap transforms used by the renderer
//!
//! Output sizes always agree with [`image_extent`](crate::scene::image_extent),
//! so what gets drawn is exactly the box the hit-tester checks.

use image::imageops::{self, FilterType};
use image::Rgba;
use nalgebra::{Point2, Rotation2};

use crate::assets::Bitmap;
use crate::foundation::math::{normalize_degrees, rotated_extent, Size};
use crate::scene::{scaled_size, Transform};

/// Fit to `area`, apply the scale factor, then rotate with expanded bounds
pub fn transform_bitmap(bitmap: &Bitmap, area: Option<Size>, transform: &Transform) -> Bitmap {
    let (width, height) = bitmap.dimensions();
    let target = scaled_size(Size::new(width, height), area, transform.scale());
    let resized = resize(bitmap, target);
    rotate(&resized, transform.rotation)
}

/// Resample to an exact size; a no-op when the size already matches
pub fn resize(bitmap: &Bitmap, size: Size) -> Bitmap {
    if bitmap.dimensions() == (size.width, size.height) {
        return bitmap.clone();
    }
    imageops::resize(bitmap, size.width.max(1), size.height.max(1), FilterType::Lanczos3)
}

/// Rotate counter-clockwise by `degrees`, growing to the rotated bounding box
///
/// Corners uncovered by the source are transparent.
pub fn rotate(bitmap: &Bitmap, degrees: i32) -> Bitmap {
    match normalize_degrees(degrees) {
        0 => bitmap.clone(),
        90 => imageops::rotate270(bitmap),
        180 => imageops::rotate180(bitmap),
        270 => imageops::rotate90(bitmap),
        angle => rotate_arbitrary(bitmap, angle),
    }
}

// Inverse mapping with nearest-neighbour sampling.
fn rotate_arbitrary(bitmap: &Bitmap, angle: i32) -> Bitmap {
    let (src_w, src_h) = bitmap.dimensions();
    let extent = rotated_extent(Size::new(src_w, src_h), angle);
    let rotation = Rotation2::new((angle as f32).to_radians());

    let src_cx = src_w as f32 / 2.0;
    let src_cy = src_h as f32 / 2.0;
    let dst_cx = extent.width as f32 / 2.0;
    let dst_cy = extent.height as f32 / 2.0;

    Bitmap::from_fn(extent.width, extent.height, |x, y| {
        let offset = Point2::new(x as f32 + 0.5 - dst_cx, y as f32 + 0.5 - dst_cy);
        let source = rotation * offset;
        let sx = (source.x + src_cx).floor();
        let sy = (source.y + src_cy).floor();
        if sx < 0.0 || sy < 0.0 || sx >= src_w as f32 || sy >= src_h as f32 {
            Rgba([0, 0, 0, 0])
        } else {
            *bitmap.get_pixel(sx as u32, sy as u32)
        }
    })
}
