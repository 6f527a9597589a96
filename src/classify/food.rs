//! Food-item decisions for preference mode
//!
//! [`FoodRelatedness`] is the cheap lexical test applied to sliding-window
//! candidates during extraction. [`FoodClassifier`] makes the final binary
//! call: core dish names are accepted outright, everything else goes to the
//! zero-shot classifier in one batch and must land on a food label above
//! the threshold.

use tracing::{debug, warn};

use crate::nlp::lexicon::Lexicon;
use crate::nlp::vocab;
use crate::pipeline::errors::AnalysisError;
use crate::pipeline::spec::PreferenceSpec;
use crate::ports::{ranked_top, PortKind, ZeroShotClassifier};
use crate::types::Candidate;

/// Endings that disqualify an accepted food
const ACCEPTED_ENDINGS: &[&str] = &["的", "很", "了"];

/// Taste words that are never a dish by themselves
const TASTE_WORDS: &[&str] = &["口味", "湯頭"];

/// Lexical food-relatedness test for window candidates
#[derive(Debug, Clone)]
pub struct FoodRelatedness {
    core_terms: Lexicon,
    descriptions: Lexicon,
    taste_words: Lexicon,
    affixes: Lexicon,
    affix_disqualifiers: Lexicon,
}

impl FoodRelatedness {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            core_terms: Lexicon::new(vocab::CORE_FOOD_TERMS)?,
            descriptions: Lexicon::new(vocab::DESCRIPTION_TERMS)?,
            taste_words: Lexicon::new(TASTE_WORDS)?,
            affixes: Lexicon::new(vocab::FOOD_CATEGORY_AFFIXES)?,
            affix_disqualifiers: Lexicon::new(vocab::AFFIX_DISQUALIFIERS)?,
        })
    }

    /// Whether `phrase` (made of `components`) looks like a dish or ingredient.
    ///
    /// Checks run in order and the first decisive one wins: descriptive terms
    /// reject, core terms in the phrase or any component accept, taste words
    /// reject, a food affix accepts unless a disqualifier is present.
    pub fn is_food_related(&self, phrase: &str, components: &[&str]) -> bool {
        if self.descriptions.contains_any(phrase) {
            return false;
        }
        if self.core_terms.contains_any(phrase)
            || components.iter().any(|c| self.core_terms.contains_any(c))
        {
            return true;
        }
        if self.taste_words.contains_any(phrase) {
            return false;
        }
        if self.affixes.contains_any(phrase) {
            return !self.affix_disqualifiers.contains_any(phrase);
        }
        false
    }
}

/// Binary food / not-food classifier
#[derive(Debug, Clone)]
pub struct FoodClassifier {
    core_keywords: Lexicon,
    exclusions: Lexicon,
    facilities: Lexicon,
    trailing_particles: Lexicon,
    residual: Lexicon,
    accepted_endings: Lexicon,
    threshold: f64,
}

impl FoodClassifier {
    pub fn new(spec: &PreferenceSpec) -> Result<Self, AnalysisError> {
        Ok(Self {
            core_keywords: Lexicon::new(vocab::CORE_FOOD_KEYWORDS)?,
            exclusions: Lexicon::new(vocab::CANDIDATE_EXCLUSIONS)?,
            facilities: Lexicon::new(vocab::FACILITY_TERMS)?,
            trailing_particles: Lexicon::new(vocab::TRAILING_PARTICLES)?,
            residual: Lexicon::new(vocab::RESIDUAL_EXCLUSIONS)?,
            accepted_endings: Lexicon::new(ACCEPTED_ENDINGS)?,
            threshold: spec.food_threshold,
        })
    }

    /// Drop descriptive, particle-terminated and venue-type candidates
    pub fn prefilter(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|c| {
                let keep = !self.exclusions.contains_any(&c.text)
                    && !self.trailing_particles.is_suffix_of(&c.text)
                    && !self.facilities.contains_any(&c.text);
                if !keep {
                    debug!(candidate = %c.text, "dropped before classification");
                }
                keep
            })
            .collect()
    }

    /// Core dish names skip the model
    pub fn is_core_food(&self, text: &str) -> bool {
        self.core_keywords.contains_any(text)
    }

    /// Accepted food texts, in candidate order.
    ///
    /// The classifier is called once for all non-core candidates, and not at
    /// all when every candidate is a core food.
    pub fn classify<C: ZeroShotClassifier>(
        &self,
        model: &C,
        candidates: &[Candidate],
    ) -> Result<Vec<String>, AnalysisError> {
        let pending: Vec<&str> = candidates
            .iter()
            .map(|c| c.text.as_str())
            .filter(|t| !self.is_core_food(t))
            .collect();

        let mut model_accepted = Vec::with_capacity(pending.len());
        if !pending.is_empty() {
            let rankings = model
                .classify_batch(&pending, vocab::FOOD_LABELS, false)
                .map_err(|e| AnalysisError::port(PortKind::Classifier, e))?;
            if rankings.len() != pending.len() {
                return Err(AnalysisError::malformed(
                    PortKind::Classifier,
                    format!("expected {} rankings, got {}", pending.len(), rankings.len()),
                ));
            }
            for (text, ranked) in pending.iter().zip(&rankings) {
                let top = ranked_top(PortKind::Classifier, ranked)?;
                let is_food_label = vocab::FOOD_LABELS.contains(&top.label.as_str());
                if !is_food_label {
                    warn!(label = %top.label, candidate = %text, "classifier returned non-food label");
                }
                let accepted = is_food_label && top.score > self.threshold;
                debug!(candidate = %text, label = %top.label, score = top.score, accepted, "food decision");
                if accepted {
                    model_accepted.push(*text);
                }
            }
        }

        Ok(candidates
            .iter()
            .map(|c| c.text.as_str())
            .filter(|t| self.is_core_food(t) || model_accepted.contains(t))
            .filter(|t| !self.residual.contains_any(t) && !self.accepted_endings.is_suffix_of(t))
            .map(str::to_string)
            .collect())
    }
}
