//! Text support: font loading, glyph metrics and line wrapping
//!
//! The scene model needs text extents for hit-testing and the renderer
//! needs glyph coverage for drawing; both go through [`Font`] so they
//! agree on every measurement.

mod font;
mod wrap;

pub use font::{Font, FontError, GlyphMetrics, RasterGlyph};
pub use wrap::{chars_per_line, layout_text, wrap_text, TextLayout, MIN_CHARS_PER_LINE};
