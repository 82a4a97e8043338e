//! Font loading and glyph metrics
//!
//! Wraps a `fontdue` font. When no font file is configured (or it fails to
//! load) the font falls back to fixed proportional metrics so layout and
//! hit-testing keep working; only the glyph drawing is skipped.

use std::fmt;
use std::path::Path;

use fontdue::FontSettings;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font loading
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to read the font file
    #[error("Failed to read font {path}: {source}")]
    Io {
        /// Font path
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse font data
    #[error("Failed to load font: {0}")]
    LoadError(String),
}

/// Per-size metrics used by layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Average advance of the Latin alphabet, in pixels
    pub avg_width: f32,
    /// Height of one line of glyphs, in pixels
    pub line_height: u32,
    /// Distance from the top of a line to the baseline
    pub ascent: f32,
}

/// Rasterizing font with metric fallback
#[derive(Clone, Default)]
pub struct Font {
    inner: Option<fontdue::Font>,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("rasterizing", &self.inner.is_some())
            .finish()
    }
}

impl Font {
    /// Width of a fallback glyph relative to the font size
    const FALLBACK_WIDTH_RATIO: f32 = 0.6;

    /// Metrics-only font
    pub fn fallback() -> Self {
        Self { inner: None }
    }

    /// Parse TrueType/OpenType data
    pub fn from_bytes(font_data: &[u8]) -> FontResult<Self> {
        let font = fontdue::Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| FontError::LoadError(format!("fontdue error: {}", e)))?;
        Ok(Self { inner: Some(font) })
    }

    /// Read and parse a font file
    pub fn from_file<P: AsRef<Path>>(path: P) -> FontResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let font = Self::from_bytes(&bytes)?;
        log::info!("Loaded font from {:?}", path);
        Ok(font)
    }

    /// Load the configured font, degrading to fallback metrics on any failure
    pub fn load_or_fallback(path: Option<&str>) -> Self {
        match path {
            Some(path) => Self::from_file(path).unwrap_or_else(|e| {
                log::warn!("{}; text will use fallback metrics and will not be drawn", e);
                Self::fallback()
            }),
            None => {
                log::warn!("No font configured; text will use fallback metrics and will not be drawn");
                Self::fallback()
            }
        }
    }

    /// True when glyphs can be rasterized
    pub fn can_rasterize(&self) -> bool {
        self.inner.is_some()
    }

    /// Layout metrics at a pixel size
    pub fn metrics(&self, font_size: u32) -> GlyphMetrics {
        let px = font_size.max(1) as f32;
        let Some(font) = &self.inner else {
            return GlyphMetrics {
                avg_width: px * Self::FALLBACK_WIDTH_RATIO,
                line_height: font_size.max(1),
                ascent: px * 0.8,
            };
        };

        let (ascent, height) = match font.horizontal_line_metrics(px) {
            Some(line) => (line.ascent, line.ascent - line.descent),
            None => (px * 0.8, px),
        };
        let alphabet = ('a'..='z').chain('A'..='Z');
        let (total, count) = alphabet.fold((0.0f32, 0u32), |(total, count), ch| {
            (total + font.metrics(ch, px).advance_width, count + 1)
        });

        GlyphMetrics {
            avg_width: (total / count as f32).max(1.0),
            line_height: (height.ceil() as u32).max(1),
            ascent,
        }
    }

    /// Horizontal advance of a single line of text
    pub fn line_width(&self, text: &str, font_size: u32) -> u32 {
        let px = font_size.max(1) as f32;
        let width = match &self.inner {
            Some(font) => text.chars().map(|ch| font.metrics(ch, px).advance_width).sum::<f32>(),
            None => text.chars().count() as f32 * px * Self::FALLBACK_WIDTH_RATIO,
        };
        width.round() as u32
    }

    /// Rasterize one glyph, or `None` for metrics-only fonts
    pub fn rasterize(&self, ch: char, font_size: u32) -> Option<RasterGlyph> {
        let font = self.inner.as_ref()?;
        let (metrics, coverage) = font.rasterize(ch, font_size.max(1) as f32);
        Some(RasterGlyph {
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            width: metrics.width,
            height: metrics.height,
            advance: metrics.advance_width,
            coverage,
        })
    }
}

/// One rasterized glyph
#[derive(Debug, Clone)]
pub struct RasterGlyph {
    /// Left bearing from the pen position
    pub xmin: i32,
    /// Bottom edge above the baseline
    pub ymin: i32,
    /// Bitmap width
    pub width: usize,
    /// Bitmap height
    pub height: usize,
    /// Pen advance
    pub advance: f32,
    /// Row-major 8-bit coverage, top row first
    pub coverage: Vec<u8>,
}
