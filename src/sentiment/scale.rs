//! Signed score → 1-5 scale
//!
//! The mapping is piecewise linear and label-aware: a negative label lands
//! in [1, 3], neutral is pinned at 3 and a positive label lands in [3, 5].
//!
//! | label    | signed score   | mapped         |
//! |----------|----------------|----------------|
//! | negative | s ≤ -0.5       | 1 + (s+1)·2    |
//! | negative | s > -0.5       | 2 + (s+0.5)·2  |
//! | neutral  | any            | 3              |
//! | positive | s ≤ 0.5        | 3 + s·2        |
//! | positive | s > 0.5        | 4 + (s-0.5)·2  |
//!
//! Each segment is clamped to its own unit band.

use crate::types::SentimentLabel;

/// Scale midpoint
pub const NEUTRAL_POINT: f64 = 3.0;

const EPSILON: f64 = 1e-9;

/// Map a clamped signed score onto the 1-5 scale
pub fn map_to_scale(label: SentimentLabel, score: f64) -> f64 {
    match label {
        SentimentLabel::Negative if score <= -0.5 => (1.0 + (score + 1.0) * 2.0).clamp(1.0, 2.0),
        SentimentLabel::Negative => (2.0 + (score + 0.5) * 2.0).clamp(2.0, 3.0),
        SentimentLabel::Neutral => NEUTRAL_POINT,
        SentimentLabel::Positive if score <= 0.5 => (3.0 + score * 2.0).clamp(3.0, 4.0),
        SentimentLabel::Positive => (4.0 + (score - 0.5) * 2.0).clamp(4.0, 5.0),
    }
}

/// Signed score before softening: confidence with its sign from the label,
/// plus cue bonuses
pub fn signed_score(label: SentimentLabel, confidence: f64, pos_bonus: f64, neg_bonus: f64) -> f64 {
    match label {
        SentimentLabel::Positive => confidence + pos_bonus - neg_bonus,
        SentimentLabel::Negative => -confidence - neg_bonus + pos_bonus,
        SentimentLabel::Neutral => pos_bonus - neg_bonus,
    }
}

/// Overall label of an averaged mapped score
pub fn overall_label(average: f64) -> SentimentLabel {
    if (average - NEUTRAL_POINT).abs() < EPSILON {
        SentimentLabel::Neutral
    } else if average > NEUTRAL_POINT {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_positive_segments() {
        assert!(close(map_to_scale(SentimentLabel::Positive, 0.0), 3.0));
        assert!(close(map_to_scale(SentimentLabel::Positive, 0.5), 4.0));
        assert!(close(map_to_scale(SentimentLabel::Positive, 0.9), 4.8));
        assert!(close(map_to_scale(SentimentLabel::Positive, 1.0), 5.0));
    }

    #[test]
    fn test_negative_segments() {
        assert!(close(map_to_scale(SentimentLabel::Negative, -1.0), 1.0));
        assert!(close(map_to_scale(SentimentLabel::Negative, -0.5), 2.0));
        assert!(close(map_to_scale(SentimentLabel::Negative, -0.25), 2.5));
        assert!(close(map_to_scale(SentimentLabel::Negative, 0.0), 3.0));
    }

    #[test]
    fn test_label_bands_hold_for_off_sign_scores() {
        // a positive label whose bonuses went negative still lands in [3, 5]
        assert!(close(map_to_scale(SentimentLabel::Positive, -0.3), 3.0));
        // a negative label pushed positive stays in [1, 3]
        assert!(close(map_to_scale(SentimentLabel::Negative, 0.4), 3.0));
    }

    #[test]
    fn test_mapping_sweep_stays_in_label_band() {
        let bands = [
            (SentimentLabel::Negative, 1.0, 3.0),
            (SentimentLabel::Neutral, 3.0, 3.0),
            (SentimentLabel::Positive, 3.0, 5.0),
        ];
        for (label, low, high) in bands {
            for step in -30..=30 {
                let score = f64::from(step) / 20.0;
                let mapped = map_to_scale(label, score);
                assert!((low..=high).contains(&mapped), "{label:?} {score}: {mapped}");
            }
        }
    }

    #[test]
    fn test_neutral_pinned() {
        assert_eq!(map_to_scale(SentimentLabel::Neutral, 0.2), 3.0);
        assert_eq!(map_to_scale(SentimentLabel::Neutral, -0.2), 3.0);
    }

    #[test]
    fn test_signed_score() {
        assert!(close(signed_score(SentimentLabel::Positive, 0.8, 0.2, 0.0), 1.0));
        assert!(close(signed_score(SentimentLabel::Negative, 0.8, 0.0, 0.2), -1.0));
        assert!(close(signed_score(SentimentLabel::Neutral, 0.9, 0.2, 0.0), 0.2));
    }

    #[test]
    fn test_overall_label() {
        assert_eq!(overall_label(3.0), SentimentLabel::Neutral);
        assert_eq!(overall_label(3.0 + 1e-12), SentimentLabel::Neutral);
        assert_eq!(overall_label(3.2), SentimentLabel::Positive);
        assert_eq!(overall_label(2.9), SentimentLabel::Negative);
    }
}
