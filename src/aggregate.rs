//! Per-category aggregation
//!
//! Samples are grouped by category and averaged. Categories without a
//! sample produce no row. Rows come out in taxonomy order.

use rustc_hash::FxHashMap;

use crate::sentiment::scale::overall_label;
use crate::types::{Category, CategorySummary, SentimentSample};

/// Fold samples into one summary row per category
pub fn summarize(subject_id: &str, samples: &[SentimentSample]) -> Vec<CategorySummary> {
    let mut totals: FxHashMap<Category, (f64, usize)> = FxHashMap::default();
    for sample in samples {
        let entry = totals.entry(sample.category).or_insert((0.0, 0));
        entry.0 += sample.mapped_score;
        entry.1 += 1;
    }

    Category::ALL
        .iter()
        .filter_map(|category| {
            let &(sum, count) = totals.get(category)?;
            let average_score = sum / count as f64;
            Some(CategorySummary {
                subject_id: subject_id.to_string(),
                category: *category,
                average_score,
                sample_count: count,
                overall: overall_label(average_score),
            })
        })
        .collect()
}
