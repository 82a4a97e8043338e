//! Math utilities and types
//!
//! Integer pixel geometry for the 2D canvas plus the handful of rotation
//! helpers the renderer and the hit-tester share.

use nalgebra::{Point2, Rotation2};
use serde::{Deserialize, Serialize};

/// Integer pixel position (top-left origin, +Y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate in pixels
    pub x: i32,
    /// Vertical coordinate in pixels
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this point by a delta, saturating at the `i32` range
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Component-wise difference `self - other`, saturating
    pub const fn delta_from(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }
}

/// Width × height in pixels
///
/// Serialized as a `[width, height]` pair, which is how layout documents
/// spell bounding areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Create a new size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl From<Size> for (u32, u32) {
    fn from(size: Size) -> Self {
        (size.width, size.height)
    }
}

/// Axis-aligned screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Top-left corner
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size of the rectangle
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Check if a point lies inside this rectangle (half-open on the far edges)
    pub fn contains(&self, point: Point) -> bool {
        point_in_rect(point, *self)
    }

    /// True when the rectangle sticks out of a `width × height` canvas
    pub fn overflows(&self, canvas: Size) -> bool {
        self.x < 0
            || self.y < 0
            || self.right() > i64::from(canvas.width)
            || self.bottom() > i64::from(canvas.height)
    }
}

/// Check if a point is inside a rectangular region
pub fn point_in_rect(point: Point, rect: Rect) -> bool {
    let (px, py) = (i64::from(point.x), i64::from(point.y));
    px >= i64::from(rect.x) && px < rect.right() && py >= i64::from(rect.y) && py < rect.bottom()
}

/// Normalize any integer angle into `0..360`
pub const fn normalize_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// Scale a pixel dimension, never collapsing below one pixel
pub fn scale_dimension(value: u32, factor: f32) -> u32 {
    let scaled = (value as f32 * factor).round();
    if scaled < 1.0 {
        1
    } else {
        scaled as u32
    }
}

/// Uniform factor that fits `content` inside `area` without distortion
pub fn fit_factor(content: Size, area: Size) -> f32 {
    if content.is_empty() || area.is_empty() {
        return 1.0;
    }
    let fx = area.width as f32 / content.width as f32;
    let fy = area.height as f32 / content.height as f32;
    fx.min(fy)
}

/// Bounding box of a `size` rectangle rotated by `degrees` about its centre
///
/// Quarter turns are exact; other angles round to the nearest pixel.
pub fn rotated_extent(size: Size, degrees: i32) -> Size {
    match normalize_degrees(degrees) {
        0 | 180 => size,
        90 | 270 => Size::new(size.height, size.width),
        angle => {
            let rotation = Rotation2::new((angle as f32).to_radians());
            let hw = size.width as f32 / 2.0;
            let hh = size.height as f32 / 2.0;
            let corners = [
                Point2::new(-hw, -hh),
                Point2::new(hw, -hh),
                Point2::new(hw, hh),
                Point2::new(-hw, hh),
            ];
            let (mut max_x, mut max_y) = (0.0f32, 0.0f32);
            for corner in corners {
                let p = rotation * corner;
                max_x = max_x.max(p.x.abs());
                max_y = max_y.max(p.y.abs());
            }
            Size::new(
                ((max_x * 2.0).round() as u32).max(1),
                ((max_y * 2.0).round() as u32).max(1),
            )
        }
    }
}
