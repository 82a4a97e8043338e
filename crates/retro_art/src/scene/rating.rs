//! Star rating normalisation
//!
//! Upstream sources disagree on the rating scale (0–1, 0–10, 0–100 or
//! already 0–5). Every raw value is funnelled through the same policy so the
//! widget always shows five stars worth of score.

use serde::{Deserialize, Serialize};

/// Highest normalised score
pub const MAX_SCORE: f64 = 5.0;

/// Number of stars drawn by the widget
pub const STAR_COUNT: u8 = 5;

/// Parse a free-form rating string
///
/// Accepts plain numbers and strings that start with one (`"4.5/5"`,
/// `"82%"`). Anything else reads as zero.
pub fn parse_rating(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        return if value.is_finite() { value } else { 0.0 };
    }

    let prefix: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    prefix.parse::<f64>().unwrap_or(0.0)
}

/// Map a raw score from any known scale onto `[0, 5]`
///
/// 1. above 10: divide by ten, rounded to one decimal
/// 2. then in `(5, 10]`: halve
/// 3. then below 1: multiply by ten and halve
/// 4. then, above 0.1 with a fractional part: snap to the nearest half
/// 5. clamp to `[0, 5]`
pub fn normalize_score(raw: f64) -> f64 {
    let mut score = if raw.is_finite() { raw } else { 0.0 };

    if score > 10.0 {
        score = score.round() / 10.0;
    }
    if score > 5.0 && score <= 10.0 {
        score /= 2.0;
    }
    if score < 1.0 {
        score = score * 10.0 / 2.0;
    }
    if score > 0.1 && score % 1.0 != 0.0 {
        score = (score * 2.0).round() / 2.0;
    }

    score.clamp(0.0, MAX_SCORE)
}

/// How many stars of each kind a score draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarCounts {
    /// Full stars
    pub full: u8,
    /// Half stars, zero or one
    pub half: u8,
    /// Empty stars
    pub empty: u8,
}

impl StarCounts {
    /// Star counts for a score; out-of-range scores are clamped first
    pub fn from_score(score: f64) -> Self {
        let score = if score.is_finite() { score.clamp(0.0, MAX_SCORE) } else { 0.0 };
        let full = score.floor() as u8;
        let half = u8::from(score - f64::from(full) >= 0.5);
        Self {
            full,
            half,
            empty: STAR_COUNT - full - half,
        }
    }

    /// Always [`STAR_COUNT`]
    pub const fn total(&self) -> u8 {
        self.full + self.half + self.empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_scales() {
        assert_relative_eq!(normalize_score(0.80), 4.0);
        assert_relative_eq!(normalize_score(8.0), 4.0);
        // 95 -> 9.5 -> 4.75 -> snapped
        assert_relative_eq!(normalize_score(95.0), 5.0);
        assert_relative_eq!(normalize_score(0.0), 0.0);
        assert_relative_eq!(normalize_score(3.0), 3.0);
        assert_relative_eq!(normalize_score(3.3), 3.5);
        assert_relative_eq!(normalize_score(72.0), 3.5);
    }

    #[test]
    fn test_out_of_range_inputs_clamp() {
        assert_relative_eq!(normalize_score(-3.0), 0.0);
        assert_relative_eq!(normalize_score(1000.0), 5.0);
        assert_relative_eq!(normalize_score(f64::NAN), 0.0);
        assert_relative_eq!(normalize_score(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        // 8.5 -> 4.25 -> 8.5 half-steps -> 9
        assert_relative_eq!(normalize_score(8.5), 4.5);
        // 2.5 half-steps -> 3
        assert_relative_eq!(normalize_score(1.25), 1.5);
        // 12.5 -> 13 / 10 -> 1.3 -> 1.5
        assert_relative_eq!(normalize_score(12.5), 1.5);
    }

    #[test]
    fn test_small_fractions_are_not_snapped() {
        // 0.01 * 5 = 0.05, below the snap threshold
        assert_relative_eq!(normalize_score(0.01), 0.05);
    }

    #[test]
    fn test_star_counts_always_five() {
        let mut raw = -5.0;
        while raw < 120.0 {
            let score = normalize_score(raw);
            assert!((0.0..=MAX_SCORE).contains(&score), "{} -> {}", raw, score);
            let stars = StarCounts::from_score(score);
            assert_eq!(stars.total(), STAR_COUNT);
            assert!(stars.half <= 1);
            raw += 0.37;
        }
    }

    #[test]
    fn test_star_counts() {
        assert_eq!(StarCounts::from_score(4.0), StarCounts { full: 4, half: 0, empty: 1 });
        assert_eq!(StarCounts::from_score(3.5), StarCounts { full: 3, half: 1, empty: 1 });
        assert_eq!(StarCounts::from_score(5.0), StarCounts { full: 5, half: 0, empty: 0 });
        assert_eq!(StarCounts::from_score(0.0), StarCounts { full: 0, half: 0, empty: 5 });
    }

    #[test]
    fn test_parse_rating() {
        assert_relative_eq!(parse_rating(" 0.8 "), 0.8);
        assert_relative_eq!(parse_rating("4.5/5"), 4.5);
        assert_relative_eq!(parse_rating("82%"), 82.0);
        assert_relative_eq!(parse_rating("n/a"), 0.0);
        assert_relative_eq!(parse_rating(""), 0.0);
    }
}
