//! Sentiment scoring on a 1-5 scale

pub mod scale;
pub mod scorer;

pub use scale::{map_to_scale, overall_label};
pub use scorer::{ScoringMemo, SentenceScore, SentimentScorer};
