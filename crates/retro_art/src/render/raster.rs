//! In-memory RGBA canvas
//!
//! Software backend used for previews and the final export. Bitmaps are
//! alpha blended, glyphs are drawn from `fontdue` coverage masks.

use std::path::Path;

use image::imageops;
use image::Rgba;

use super::{Canvas, RenderError};
use crate::assets::Bitmap;
use crate::config::Rgb;
use crate::foundation::math::{Point, Rect, Size};
use crate::text::Font;

/// RGBA8 pixel canvas
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    image: Bitmap,
}

impl RasterCanvas {
    /// Opaque black canvas of the given size
    pub fn new(size: Size) -> Self {
        Self {
            image: Bitmap::from_pixel(size.width.max(1), size.height.max(1), Rgba([0, 0, 0, 255])),
        }
    }

    /// Pixels drawn so far
    pub const fn image(&self) -> &Bitmap {
        &self.image
    }

    /// Take the pixels
    pub fn into_image(self) -> Bitmap {
        self.image
    }

    /// Encode to a file; the format follows the extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.image.save(path)?;
        log::info!("Saved {}x{} image to {:?}", self.image.width(), self.image.height(), path);
        Ok(())
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb, coverage: u8) {
        if coverage == 0 || x < 0 || y < 0 {
            return;
        }
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }

        let alpha = u32::from(coverage);
        let pixel = self.image.get_pixel_mut(x, y);
        let mix = |dst: u8, src: u8| -> u8 {
            let value = (u32::from(src) * alpha + u32::from(dst) * (255 - alpha) + 127) / 255;
            u8::try_from(value).unwrap_or(u8::MAX)
        };
        pixel.0 = [
            mix(pixel.0[0], color.r),
            mix(pixel.0[1], color.g),
            mix(pixel.0[2], color.b),
            pixel.0[3].max(coverage),
        ];
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    fn clear(&mut self, color: Rgb) -> Result<(), RenderError> {
        let fill = Rgba(color.to_rgba());
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
        Ok(())
    }

    fn blit(&mut self, bitmap: &Bitmap, position: Point) -> Result<(), RenderError> {
        imageops::overlay(&mut self.image, bitmap, i64::from(position.x), i64::from(position.y));
        Ok(())
    }

    fn draw_text(
        &mut self,
        font: &Font,
        text: &str,
        position: Point,
        font_size: u32,
        color: Rgb,
    ) -> Result<(), RenderError> {
        if !font.can_rasterize() {
            return Ok(());
        }

        let baseline = f64::from(position.y) + f64::from(font.metrics(font_size).ascent);
        let mut pen_x = f64::from(position.x);

        for ch in text.chars() {
            let Some(glyph) = font.rasterize(ch, font_size) else {
                continue;
            };
            // fontdue's ymin is the bottom edge relative to the baseline, +Y up
            let left = (pen_x + f64::from(glyph.xmin)).round() as i64;
            let top = (baseline - f64::from(glyph.ymin) - glyph.height as f64).round() as i64;

            for row in 0..glyph.height {
                for col in 0..glyph.width {
                    let coverage = glyph.coverage[row * glyph.width + col];
                    self.blend_pixel(left + col as i64, top + row as i64, color, coverage);
                }
            }
            pen_x += f64::from(glyph.advance);
        }
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, color: Rgb, thickness: u32) -> Result<(), RenderError> {
        if rect.size().is_empty() || thickness == 0 {
            return Ok(());
        }
        let thickness = i64::from(thickness.min(rect.width).min(rect.height));
        let (left, top) = (i64::from(rect.x), i64::from(rect.y));
        let (right, bottom) = (rect.right(), rect.bottom());

        // only the on-canvas part of the box is visited
        let x_range = left.max(0)..right.min(i64::from(self.image.width()));
        let y_range = top.max(0)..bottom.min(i64::from(self.image.height()));

        for y in y_range {
            for x in x_range.clone() {
                let on_border = x < left + thickness
                    || x >= right - thickness
                    || y < top + thickness
                    || y >= bottom - thickness;
                if on_border {
                    self.blend_pixel(x, y, color, u8::MAX);
                }
            }
        }
        Ok(())
    }
}
