//! Text layout engine
//!
//! Converts a text element's content into the lines the renderer draws and
//! the box the hit-tester checks.

use super::Font;
use crate::foundation::math::Size;

/// Lower bound of the wrap width, whatever the area and glyph size
pub const MIN_CHARS_PER_LINE: usize = 50;

/// Laid out text, ready to draw top-down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    /// Lines in drawing order
    pub lines: Vec<String>,
    /// Distance between consecutive baselines (the glyph height)
    pub line_height: u32,
    /// Extent of the drawn text
    pub size: Size,
}

/// Wrap width in characters for an area of `area_width` pixels
pub fn chars_per_line(area_width: u32, avg_glyph_width: f32) -> usize {
    if avg_glyph_width <= 0.0 {
        return MIN_CHARS_PER_LINE;
    }
    let fitting = (area_width as f32 / avg_glyph_width).floor() as usize;
    fitting.max(MIN_CHARS_PER_LINE)
}

/// Greedy word wrap at `width` characters
///
/// Whitespace runs collapse to single spaces, explicit newlines start a new
/// paragraph, and words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }

            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }

        if current_len > 0 {
            lines.push(current);
        }
    }

    lines
}

/// Lay out content for a text element
///
/// With an area the content wraps at [`chars_per_line`]; without one it is a
/// single line.
pub fn layout_text(font: &Font, content: &str, font_size: u32, area: Option<Size>) -> TextLayout {
    let metrics = font.metrics(font_size);

    let lines = match area {
        Some(area) => wrap_text(content, chars_per_line(area.width, metrics.avg_width)),
        None if content.is_empty() => Vec::new(),
        None => vec![content.split_whitespace().collect::<Vec<_>>().join(" ")],
    };

    let width = lines
        .iter()
        .map(|line| font.line_width(line, font_size))
        .max()
        .unwrap_or(0);
    let line_count = u32::try_from(lines.len()).unwrap_or(u32::MAX);
    let height = metrics.line_height.saturating_mul(line_count);

    TextLayout {
        lines,
        line_height: metrics.line_height,
        size: Size::new(width, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chars_per_line_has_a_floor() {
        assert_eq!(chars_per_line(100, 10.0), MIN_CHARS_PER_LINE);
        assert_eq!(chars_per_line(1000, 10.0), 100);
        assert_eq!(chars_per_line(1000, 0.0), MIN_CHARS_PER_LINE);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "the quick brown fox jumps over the lazy dog";
        let lines = wrap_text(text, 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        assert!(lines.iter().all(|line| line.chars().count() <= 10));
    }

    #[test]
    fn test_wrap_splits_long_words_and_keeps_paragraphs() {
        let lines = wrap_text("abcdefghij xy\nsecond", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy", "seco", "nd"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_text("", 10).is_empty());
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_layout_single_line_without_area() {
        let font = Font::fallback();
        let layout = layout_text(&font, "Super  Metroid", 10, None);
        assert_eq!(layout.lines, vec!["Super Metroid"]);
        assert_eq!(layout.line_height, 10);
        assert_eq!(layout.size, Size::new(78, 10));
    }

    #[test]
    fn test_layout_wraps_with_area() {
        let font = Font::fallback();
        let word = "word ";
        let content = word.repeat(30);
        // 6 px per glyph at size 10, 300 px area → 50 chars per line
        let layout = layout_text(&font, &content, 10, Some(Size::new(300, 200)));
        assert_eq!(layout.lines.len(), 3);
        assert!(layout.lines.iter().all(|line| line.chars().count() <= 50));
        assert_eq!(layout.size.height, 30);
    }

    #[test]
    fn test_layout_size_saturates_for_huge_fonts() {
        let font = Font::fallback();
        let layout = layout_text(&font, &"word ".repeat(12), u32::MAX, Some(Size::new(300, 200)));
        assert_eq!(layout.lines.len(), 2);
        assert_eq!(layout.size.height, u32::MAX);
    }
}
