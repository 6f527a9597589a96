//! Aspect category classification
//!
//! Each unique candidate goes through an ordered rule chain (first match
//! wins):
//!
//! 1. summary/overall marker → Experience
//! 2. suggestion/wish marker → Other
//! 3. price lexicon → Price
//! 4. food lexicon → Food
//! 5. environment lexicon → Environment
//! 6. service lexicon → Service
//! 7. zero-shot classifier over the full label set
//!
//! Lexicon hits carry confidence 1.0. If the result is Other, the whole
//! originating sentence is classified and overrides the candidate when it
//! lands on a concrete category with a score above the override threshold.
//! Finally a non-Other result at or below the acceptance threshold is
//! rejected. Other is never rejected.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::nlp::lexicon::Lexicon;
use crate::nlp::vocab;
use crate::phrase::extraction::AspectExtraction;
use crate::pipeline::errors::AnalysisError;
use crate::pipeline::spec::AspectSpec;
use crate::ports::{ranked_top, PortKind, ZeroShotClassifier};
use crate::types::{Category, CategoryAssignment, DecisionSource, Sentence};

/// Rule-chain + model classifier for aspect candidates
#[derive(Debug, Clone)]
pub struct AspectClassifier {
    rules: Vec<(Category, Lexicon)>,
    acceptance_threshold: f64,
    override_threshold: f64,
}

impl AspectClassifier {
    pub fn new(spec: &AspectSpec) -> Result<Self, AnalysisError> {
        let rules = vec![
            (Category::Experience, Lexicon::new(vocab::SUMMARY_MARKERS)?),
            (Category::Other, Lexicon::new(vocab::SUGGESTION_MARKERS)?),
            (Category::Price, Lexicon::new(vocab::PRICE_TERMS)?),
            (Category::Food, Lexicon::new(vocab::FOOD_TERMS)?),
            (Category::Environment, Lexicon::new(vocab::ENVIRONMENT_TERMS)?),
            (Category::Service, Lexicon::new(vocab::SERVICE_TERMS)?),
        ];
        Ok(Self {
            rules,
            acceptance_threshold: spec.acceptance_threshold,
            override_threshold: spec.sentence_override_threshold,
        })
    }

    /// Category from the lexicon rules alone, if any rule fires
    pub fn lexicon_rule(&self, candidate: &str) -> Option<Category> {
        self.rules
            .iter()
            .find(|(_, lexicon)| lexicon.contains_any(candidate))
            .map(|(category, _)| *category)
    }

    /// Classify one candidate; `None` means the candidate was rejected
    pub fn classify<C: ZeroShotClassifier>(
        &self,
        model: &C,
        candidate: &str,
        sentence: &str,
    ) -> Result<Option<CategoryAssignment>, AnalysisError> {
        let (mut category, mut confidence, mut source) = match self.lexicon_rule(candidate) {
            Some(category) => (category, 1.0, DecisionSource::LexiconRule),
            None => {
                let (category, score) = model_top(model, candidate)?;
                (category, score, DecisionSource::Model)
            }
        };

        if category == Category::Other {
            let (sent_category, sent_score) = model_top(model, sentence)?;
            if sent_category != Category::Other && sent_score > self.override_threshold {
                category = sent_category;
                confidence = sent_score;
                source = DecisionSource::SentenceFallback;
            }
        }

        if category != Category::Other && confidence <= self.acceptance_threshold {
            debug!(candidate, %category, confidence, "rejected below acceptance threshold");
            return Ok(None);
        }

        debug!(candidate, %category, confidence, ?source, "classified");
        Ok(Some(CategoryAssignment {
            candidate: candidate.to_string(),
            category,
            confidence,
            source,
        }))
    }

    /// Classify every unique extracted candidate into `memo`
    pub fn classify_all<C: ZeroShotClassifier>(
        &self,
        model: &C,
        extraction: &AspectExtraction,
        sentences: &[Sentence],
        memo: &mut AssignmentMemo,
    ) -> Result<(), AnalysisError> {
        for candidate in &extraction.candidates {
            let sentence = candidate
                .origin_sentence()
                .and_then(|i| sentences.get(i))
                .map(|s| s.text.as_str())
                .unwrap_or(candidate.text.as_str());
            memo.get_or_classify(&candidate.text, || {
                self.classify(model, &candidate.text, sentence)
            })?;
        }
        Ok(())
    }
}

/// Ask the model for its top category over the fixed label set.
///
/// A label outside the taxonomy resolves to Other with confidence 0.
fn model_top<C: ZeroShotClassifier>(
    model: &C,
    text: &str,
) -> Result<(Category, f64), AnalysisError> {
    let labels = Category::labels();
    let ranked = model
        .classify(text, &labels)
        .map_err(|e| AnalysisError::port(PortKind::Classifier, e))?;
    let top = ranked_top(PortKind::Classifier, &ranked)?;
    match Category::from_label(&top.label) {
        Some(category) => Ok((category, top.score)),
        None => {
            warn!(label = %top.label, text, "classifier returned unknown label, using Other");
            Ok((Category::Other, 0.0))
        }
    }
}

/// Per-run memo of classification decisions, rejections included.
///
/// A candidate text is classified at most once per document.
#[derive(Debug, Clone, Default)]
pub struct AssignmentMemo {
    decisions: FxHashMap<String, Option<CategoryAssignment>>,
    order: Vec<String>,
}

impl AssignmentMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the memoized decision, computing it with `classify` on first use
    pub fn get_or_classify<F>(
        &mut self,
        candidate: &str,
        classify: F,
    ) -> Result<Option<&CategoryAssignment>, AnalysisError>
    where
        F: FnOnce() -> Result<Option<CategoryAssignment>, AnalysisError>,
    {
        if !self.decisions.contains_key(candidate) {
            let decision = classify()?;
            self.order.push(candidate.to_string());
            self.decisions.insert(candidate.to_string(), decision);
        }
        Ok(self.decisions.get(candidate).and_then(Option::as_ref))
    }

    /// Accepted assignment for a candidate, if classified and kept
    pub fn get(&self, candidate: &str) -> Option<&CategoryAssignment> {
        self.decisions.get(candidate).and_then(Option::as_ref)
    }

    /// Accepted assignments in classification order
    pub fn accepted(&self) -> impl Iterator<Item = &CategoryAssignment> {
        self.order.iter().filter_map(|c| self.get(c))
    }

    /// Number of candidates classified (accepted or rejected)
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::ScriptedClassifier;

    fn classifier() -> AspectClassifier {
        AspectClassifier::new(&AspectSpec::default()).unwrap()
    }

    #[test]
    fn test_rule_order_first_match_wins() {
        let c = classifier();
        // 推薦 (summary) beats 價格 (price)
        assert_eq!(c.lexicon_rule("推薦價格"), Some(Category::Experience));
        // 建議 (suggestion) beats 湯頭 (food)
        assert_eq!(c.lexicon_rule("建議湯頭"), Some(Category::Other));
        assert_eq!(c.lexicon_rule("CP值"), Some(Category::Price));
        assert_eq!(c.lexicon_rule("湯頭"), Some(Category::Food));
        assert_eq!(c.lexicon_rule("裝潢"), Some(Category::Environment));
        assert_eq!(c.lexicon_rule("態度"), Some(Category::Service));
        assert_eq!(c.lexicon_rule("火鍋"), None);
    }

    #[test]
    fn test_lexicon_hit_skips_model() {
        let model = ScriptedClassifier::new(&[], ("其他", 0.9));
        let a = classifier().classify(&model, "湯頭", "湯頭很棒").unwrap().unwrap();
        assert_eq!(a.category, Category::Food);
        assert_eq!(a.confidence, 1.0);
        assert_eq!(a.source, DecisionSource::LexiconRule);
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn test_model_fallback() {
        let model = ScriptedClassifier::new(&[("火鍋", "食物", 0.9)], ("其他", 0.9));
        let a = classifier().classify(&model, "火鍋", "這家火鍋很棒").unwrap().unwrap();
        assert_eq!(a.category, Category::Food);
        assert_eq!(a.source, DecisionSource::Model);
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn test_low_confidence_non_other_rejected() {
        let model = ScriptedClassifier::new(&[("火鍋", "食物", 0.5)], ("其他", 0.9));
        assert!(classifier().classify(&model, "火鍋", "火鍋").unwrap().is_none());
    }

    #[test]
    fn test_other_kept_regardless_of_score() {
        let model = ScriptedClassifier::new(&[], ("其他", 0.2));
        let a = classifier().classify(&model, "朋友", "跟朋友來").unwrap().unwrap();
        assert_eq!(a.category, Category::Other);
        assert_eq!(a.confidence, 0.2);
        // candidate + sentence
        assert_eq!(model.calls(), 2);
        assert_eq!(model.seen(), vec!["朋友".to_string(), "跟朋友來".to_string()]);
    }

    #[test]
    fn test_sentence_fallback_overrides_other() {
        let model = ScriptedClassifier::new(
            &[("朋友", "其他", 0.6), ("朋友說服務很好", "服務", 0.8)],
            ("其他", 0.9),
        );
        let a = classifier()
            .classify(&model, "朋友", "朋友說服務很好")
            .unwrap()
            .unwrap();
        assert_eq!(a.category, Category::Service);
        assert_eq!(a.confidence, 0.8);
        assert_eq!(a.source, DecisionSource::SentenceFallback);
    }

    #[test]
    fn test_sentence_fallback_needs_score_above_threshold() {
        let model = ScriptedClassifier::new(
            &[("朋友", "其他", 0.6), ("朋友說服務很好", "服務", 0.5)],
            ("其他", 0.9),
        );
        let a = classifier()
            .classify(&model, "朋友", "朋友說服務很好")
            .unwrap()
            .unwrap();
        assert_eq!(a.category, Category::Other);
        assert_eq!(a.source, DecisionSource::Model);
    }

    #[test]
    fn test_suggestion_marker_can_be_overridden_by_sentence() {
        let model = ScriptedClassifier::new(&[("希望能加大份量", "食物", 0.7)], ("其他", 0.9));
        let a = classifier()
            .classify(&model, "希望", "希望能加大份量")
            .unwrap()
            .unwrap();
        assert_eq!(a.category, Category::Food);
        assert_eq!(a.source, DecisionSource::SentenceFallback);
    }

    #[test]
    fn test_unknown_label_falls_back_to_other() {
        let model = ScriptedClassifier::new(&[("火鍋", "菜單", 0.99)], ("菜單", 0.99));
        let a = classifier().classify(&model, "火鍋", "火鍋").unwrap().unwrap();
        assert_eq!(a.category, Category::Other);
        assert_eq!(a.confidence, 0.0);
    }

    #[test]
    fn test_port_failure_propagates() {
        let model = crate::ports::mock::Unavailable;
        let err = classifier().classify(&model, "火鍋", "火鍋").unwrap_err();
        assert_eq!(err.port_kind(), Some(PortKind::Classifier));
    }

    #[test]
    fn test_memo_classifies_once() {
        let mut memo = AssignmentMemo::new();
        let mut calls = 0;
        for _ in 0..3 {
            memo.get_or_classify("湯頭", || {
                calls += 1;
                Ok(Some(CategoryAssignment {
                    candidate: "湯頭".into(),
                    category: Category::Food,
                    confidence: 1.0,
                    source: DecisionSource::LexiconRule,
                }))
            })
            .unwrap();
        }
        assert_eq!(calls, 1);
        assert_eq!(memo.len(), 1);
        assert_eq!(memo.accepted().count(), 1);
    }

    #[test]
    fn test_memo_remembers_rejections() {
        let mut memo = AssignmentMemo::new();
        let mut calls = 0;
        for _ in 0..2 {
            let got = memo
                .get_or_classify("火鍋", || {
                    calls += 1;
                    Ok(None)
                })
                .unwrap();
            assert!(got.is_none());
        }
        assert_eq!(calls, 1);
        assert_eq!(memo.accepted().count(), 0);
        assert!(!memo.is_empty());
    }
}
