//! Sentence sentiment scoring
//!
//! For every accepted (candidate, category) and each sentence supporting the
//! candidate, one [`SentimentSample`] is produced unless that
//! (sentence, category) pair was already scored in this run.
//!
//! Per sentence the label comes from the first cascade step that applies:
//! 1. cleaned sentence contains a summary phrase → positive, fixed confidence
//! 2. contains a neutral pattern and no opinion word → neutral, 0
//! 3. the sentiment model's top label
//!
//! Cue bonuses (emoji, extreme phrases) and softening qualifiers are read
//! from the raw sentence, emoji included.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use super::scale::{map_to_scale, signed_score};
use crate::nlp::lexicon::Lexicon;
use crate::nlp::normalize::TextCleaner;
use crate::nlp::vocab;
use crate::pipeline::errors::AnalysisError;
use crate::pipeline::spec::SentimentSpec;
use crate::ports::{ranked_top, PortKind, SentimentModel};
use crate::types::{Candidate, Category, CategoryAssignment, Sentence, SentimentLabel, SentimentSample};

/// Score of one sentence, independent of the candidate it is attached to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceScore {
    pub label: SentimentLabel,
    pub raw_confidence: f64,
    pub adjusted_score: f64,
    pub mapped_score: f64,
}

/// Per-run scoring memory: scored (sentence, category) pairs and sentence scores
#[derive(Debug, Clone, Default)]
pub struct ScoringMemo {
    visited: FxHashSet<(usize, Category)>,
    sentences: FxHashMap<usize, SentenceScore>,
}

impl ScoringMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a pair as scored; `false` if it already was
    pub fn visit(&mut self, sentence_index: usize, category: Category) -> bool {
        self.visited.insert((sentence_index, category))
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Sentences scored so far (each sentence reaches the model at most once)
    pub fn scored_sentences(&self) -> usize {
        self.sentences.len()
    }
}

#[derive(Debug, Clone)]
pub struct SentimentScorer {
    cleaner: TextCleaner,
    summary: Lexicon,
    neutral_patterns: Lexicon,
    opinion_words: Lexicon,
    positive_cues: Lexicon,
    negative_cues: Lexicon,
    softeners: Lexicon,
    bonus: f64,
    softening_shift: f64,
    summary_confidence: f64,
}

impl SentimentScorer {
    pub fn new(spec: &SentimentSpec) -> Result<Self, AnalysisError> {
        let positive = vocab::POSITIVE_EMOJI.iter().chain(vocab::EXTREME_POSITIVE);
        let negative = vocab::NEGATIVE_EMOJI.iter().chain(vocab::EXTREME_NEGATIVE);
        Ok(Self {
            cleaner: TextCleaner::new()?,
            summary: Lexicon::new(vocab::SUMMARY_POSITIVE)?,
            neutral_patterns: Lexicon::new(vocab::NEUTRAL_PATTERNS)?,
            opinion_words: Lexicon::new(vocab::SENTIMENT_WORDS)?,
            positive_cues: Lexicon::new(positive)?,
            negative_cues: Lexicon::new(negative)?,
            softeners: Lexicon::new(vocab::SOFTENERS)?,
            bonus: spec.bonus,
            softening_shift: spec.softening_shift,
            summary_confidence: spec.summary_confidence,
        })
    }

    /// Label and confidence for a sentence, shortcuts first
    pub fn sentence_label<S: SentimentModel>(
        &self,
        model: &S,
        sentence: &str,
    ) -> Result<(SentimentLabel, f64), AnalysisError> {
        let cleaned = self.cleaner.clean(sentence);

        if self.summary.contains_any(&cleaned) {
            return Ok((SentimentLabel::Positive, self.summary_confidence));
        }
        if self.neutral_patterns.contains_any(&cleaned) && !self.opinion_words.contains_any(&cleaned) {
            return Ok((SentimentLabel::Neutral, 0.0));
        }

        let labels = SentimentLabel::labels();
        let ranked = model
            .classify_sentiment(&cleaned, &labels)
            .map_err(|e| AnalysisError::port(PortKind::Sentiment, e))?;
        let top = ranked_top(PortKind::Sentiment, &ranked)?;
        match SentimentLabel::from_label(&top.label) {
            Some(label) => Ok((label, top.score)),
            None => {
                warn!(label = %top.label, "sentiment model returned unknown label, using neutral");
                Ok((SentimentLabel::Neutral, 0.0))
            }
        }
    }

    /// Full score of one sentence: label, cue bonuses, softening, clamp, mapping
    pub fn score_sentence<S: SentimentModel>(
        &self,
        model: &S,
        sentence: &str,
    ) -> Result<SentenceScore, AnalysisError> {
        let (label, confidence) = self.sentence_label(model, sentence)?;

        let pos_bonus = if self.positive_cues.contains_any(sentence) { self.bonus } else { 0.0 };
        let neg_bonus = if self.negative_cues.contains_any(sentence) { self.bonus } else { 0.0 };
        let mut score = signed_score(label, confidence, pos_bonus, neg_bonus);

        if self.softeners.contains_any(sentence) {
            match label {
                SentimentLabel::Positive => score -= self.softening_shift,
                SentimentLabel::Negative => score += self.softening_shift,
                SentimentLabel::Neutral => {}
            }
        }

        let adjusted_score = score.clamp(-1.0, 1.0);
        Ok(SentenceScore {
            label,
            raw_confidence: confidence,
            adjusted_score,
            mapped_score: map_to_scale(label, adjusted_score),
        })
    }

    /// Samples for accepted assignments, in assignment then sentence order
    pub fn score_assignments<'a, S, I>(
        &self,
        model: &S,
        assignments: I,
        candidates: &[Candidate],
        sentences: &[Sentence],
        memo: &mut ScoringMemo,
    ) -> Result<Vec<SentimentSample>, AnalysisError>
    where
        S: SentimentModel,
        I: IntoIterator<Item = &'a CategoryAssignment>,
    {
        let mut samples = Vec::new();

        for assignment in assignments {
            let Some(candidate) = candidates.iter().find(|c| c.text == assignment.candidate) else {
                continue;
            };
            for &index in &candidate.supporting_sentences {
                let Some(sentence) = sentences.get(index) else {
                    continue;
                };
                if !memo.visit(index, assignment.category) {
                    continue;
                }
                let score = match memo.sentences.get(&index) {
                    Some(cached) => *cached,
                    None => {
                        let fresh = self.score_sentence(model, &sentence.text)?;
                        memo.sentences.insert(index, fresh);
                        fresh
                    }
                };
                debug!(
                    candidate = %assignment.candidate,
                    category = %assignment.category,
                    sentence = index,
                    label = %score.label,
                    mapped = score.mapped_score,
                    "sentiment sample"
                );
                samples.push(SentimentSample {
                    candidate: assignment.candidate.clone(),
                    category: assignment.category,
                    sentence_index: index,
                    label: score.label,
                    raw_confidence: score.raw_confidence,
                    adjusted_score: score.adjusted_score,
                    mapped_score: score.mapped_score,
                });
            }
        }

        Ok(samples)
    }
}
