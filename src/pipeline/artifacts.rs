//! Pipeline artifacts.
//!
//! [`RunState`] is the mutable memory of one document run. It is created
//! fresh for every document and never shared, so documents analyzed in
//! parallel cannot observe each other's decisions.
//!
//! [`AspectReport`] is the full set of intermediate results of an aspect
//! run, returned by `AspectPipeline::run_detailed` for debugging.

use serde::Serialize;

use crate::classify::aspect::AssignmentMemo;
use crate::sentiment::scorer::ScoringMemo;
use crate::types::{Candidate, CategoryAssignment, CategorySummary, Sentence, SentimentSample};

/// Per-document memo caches
#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// Category decision per candidate text, rejections included
    pub assignments: AssignmentMemo,
    /// Scored (sentence, category) pairs and per-sentence scores
    pub scoring: ScoringMemo,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything an aspect run produced, stage by stage
#[derive(Debug, Clone, Default, Serialize)]
pub struct AspectReport {
    pub subject_id: String,
    pub sentences: Vec<Sentence>,
    pub candidates: Vec<Candidate>,
    pub assignments: Vec<CategoryAssignment>,
    pub samples: Vec<SentimentSample>,
    pub summaries: Vec<CategorySummary>,
}

impl AspectReport {
    /// Report of a run that had nothing to analyze
    pub fn empty(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            ..Self::default()
        }
    }
}
