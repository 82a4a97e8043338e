//! ROM file name matching
//!
//! ROM dumps rarely share spelling with catalog titles. Three increasingly
//! loose comparisons are offered: exact stem, normalised stem and a
//! nearest-neighbour match over word counts of cleaned titles.

use std::collections::HashMap;

/// Minimum cosine similarity for a nearest-neighbour match
pub const SIMILARITY_THRESHOLD: f64 = 0.90;

/// File name without directory and extension, lowercase
pub fn rom_stem(file_name: &str) -> String {
    let name = file_name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(file_name);
    let stem = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };
    stem.trim().to_lowercase()
}

/// Drop `(...)`/`[...]` groups and whitespace, lowercase
///
/// `"Super Mario World (USA) [!]"` → `"supermarioworld"`.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut depth_round = 0u32;
    let mut depth_square = 0u32;

    for ch in name.chars() {
        match ch {
            '(' => depth_round += 1,
            ')' if depth_round > 0 => depth_round -= 1,
            '[' => depth_square += 1,
            ']' if depth_square > 0 => depth_square -= 1,
            _ if depth_round > 0 || depth_square > 0 => {}
            c if c.is_whitespace() => {}
            c => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Lowercase, keep `[a-z0-9 ]`, drop `"the "`
pub fn clean_title(name: &str) -> String {
    let lowered = name.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    kept.replace("the ", "").trim().to_string()
}

/// Word-count vector of a cleaned title
fn term_counts(text: &str) -> HashMap<&str, f64> {
    let mut counts = HashMap::new();
    for word in text.split_whitespace() {
        *counts.entry(word).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine similarity of the word-count vectors of two cleaned titles
pub fn similarity(a: &str, b: &str) -> f64 {
    let left = term_counts(a);
    let right = term_counts(b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let dot: f64 = left
        .iter()
        .filter_map(|(word, count)| right.get(word).map(|other| count * other))
        .sum();
    let norm = |v: &HashMap<&str, f64>| v.values().map(|c| c * c).sum::<f64>().sqrt();
    dot / (norm(&left) * norm(&right))
}

/// Index of the best match for `query` among `candidates`, if it clears the threshold
pub fn nearest<'a, I>(query: &str, candidates: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = clean_title(query);
    candidates
        .into_iter()
        .enumerate()
        .map(|(idx, candidate)| (idx, similarity(&query, &clean_title(candidate))))
        .filter(|(_, score)| *score >= SIMILARITY_THRESHOLD)
        .fold(None, |best: Option<(usize, f64)>, (idx, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((idx, score)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rom_stem() {
        assert_eq!(rom_stem("roms/snes/SMW.zip"), "smw");
        assert_eq!(rom_stem("C:\\roms\\Contra (U).nes"), "contra (u)");
        assert_eq!(rom_stem(".hidden"), ".hidden");
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Super Mario World (USA) [!]"), "supermarioworld");
        assert_eq!(normalize_name("Final Fight (World 910522)"), "finalfight");
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("The Legend of Zelda: A Link to the Past"), "legend of zelda a link to past");
        assert_eq!(clean_title("Street Fighter II'"), "street fighter ii");
    }

    #[test]
    fn test_similarity_bounds() {
        assert!((similarity("mario paint", "mario paint") - 1.0).abs() < 1e-9);
        assert!(similarity("mario paint", "zelda") < 1e-9);
        assert_eq!(similarity("", "anything"), 0.0);
    }

    #[test]
    fn test_nearest_respects_threshold() {
        let titles = ["Mario Paint", "Super Mario World", "The Legend of Zelda"];
        assert_eq!(nearest("legend of zelda", titles).map(|(i, _)| i), Some(2));
        assert_eq!(nearest("mario", titles), None);
    }
}
