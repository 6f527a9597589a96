//! Food phrase chunking
//!
//! Builds preference-mode candidates from a tagged review:
//! - contiguous noun runs (any `N*` tag)
//! - sliding windows of 2-4 tokens whose tags match one of the
//!   [`WindowShape`]s and that pass the food-relatedness test
//! - product entities from the recognizer
//! - explicit multi-word dishes found verbatim in the text
//!
//! Flavor words seen while scanning are collected on the side.

use tracing::debug;

use super::dedup::dedup_by_text;
use crate::classify::food::FoodRelatedness;
use crate::nlp::lexicon::Lexicon;
use crate::nlp::vocab;
use crate::pipeline::errors::AnalysisError;
use crate::pipeline::spec::PreferenceSpec;
use crate::ports::EntitySpan;
use crate::types::{Candidate, OriginStrategy, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Noun,
    Adj,
}

impl Slot {
    fn matches(&self, token: &Token) -> bool {
        match self {
            Slot::Noun => token.pos.is_noun(),
            Slot::Adj => token.pos.is_adjective(),
        }
    }
}

/// Tag patterns a sliding window may take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowShape {
    NounNoun,
    AdjNoun,
    NounAdj,
    NounNounNoun,
    NounNounNounNoun,
}

impl WindowShape {
    pub const ALL: [WindowShape; 5] = [
        WindowShape::NounNoun,
        WindowShape::AdjNoun,
        WindowShape::NounAdj,
        WindowShape::NounNounNoun,
        WindowShape::NounNounNounNoun,
    ];

    fn slots(&self) -> &'static [Slot] {
        match self {
            WindowShape::NounNoun => &[Slot::Noun, Slot::Noun],
            WindowShape::AdjNoun => &[Slot::Adj, Slot::Noun],
            WindowShape::NounAdj => &[Slot::Noun, Slot::Adj],
            WindowShape::NounNounNoun => &[Slot::Noun, Slot::Noun, Slot::Noun],
            WindowShape::NounNounNounNoun => &[Slot::Noun, Slot::Noun, Slot::Noun, Slot::Noun],
        }
    }

    pub fn len(&self) -> usize {
        self.slots().len()
    }

    /// Position of the adjective whose flavor status alone admits the window
    fn flavor_slot(&self) -> Option<usize> {
        match self {
            WindowShape::AdjNoun => Some(0),
            WindowShape::NounAdj => Some(1),
            _ => None,
        }
    }

    fn matches(&self, window: &[Token]) -> bool {
        window.len() == self.len() && self.slots().iter().zip(window).all(|(s, t)| s.matches(t))
    }
}

/// All candidates produced for one review
#[derive(Debug, Clone, Default)]
pub struct FoodCandidates {
    pub entities: Vec<Candidate>,
    pub noun_runs: Vec<Candidate>,
    pub lexicon_hits: Vec<Candidate>,
    pub windows: Vec<Candidate>,
    /// Flavor words in first-seen order
    pub flavors: Vec<String>,
}

impl FoodCandidates {
    /// Order-preserving union of every strategy's candidates
    pub fn union(&self) -> Vec<Candidate> {
        dedup_by_text(
            self.entities
                .iter()
                .chain(&self.noun_runs)
                .chain(&self.lexicon_hits)
                .chain(&self.windows)
                .cloned()
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
            && self.noun_runs.is_empty()
            && self.lexicon_hits.is_empty()
            && self.windows.is_empty()
    }
}

/// Preference-mode candidate builder
#[derive(Debug, Clone)]
pub struct FoodChunker {
    max_phrase_chars: usize,
    excluded_nouns: Lexicon,
    excluded_foods: Lexicon,
    flavors: Lexicon,
    special_phrases: Lexicon,
    special_foods: Lexicon,
    relatedness: FoodRelatedness,
}

impl FoodChunker {
    pub fn new(spec: &PreferenceSpec) -> Result<Self, AnalysisError> {
        Ok(Self {
            max_phrase_chars: spec.max_phrase_chars,
            excluded_nouns: Lexicon::new(vocab::EXCLUDED_NOUNS)?,
            excluded_foods: Lexicon::new(vocab::EXCLUDED_FOODS)?,
            flavors: Lexicon::new(vocab::FLAVOR_KEYWORDS)?,
            special_phrases: Lexicon::new(vocab::SPECIAL_FOOD_PHRASES)?,
            special_foods: Lexicon::new(vocab::SPECIAL_FOODS)?,
            relatedness: FoodRelatedness::new()?,
        })
    }

    /// Set the longest phrase kept, in characters
    pub fn with_max_phrase_chars(mut self, max_phrase_chars: usize) -> Self {
        self.max_phrase_chars = max_phrase_chars;
        self
    }

    fn fits(&self, text: &str) -> bool {
        text.chars().count() <= self.max_phrase_chars
    }

    /// Run every strategy over one review
    pub fn chunk(&self, content: &str, tokens: &[Token], entities: &[EntitySpan]) -> FoodCandidates {
        let mut out = FoodCandidates {
            entities: self.entities(entities),
            noun_runs: self.noun_runs(tokens),
            windows: self.windows(tokens),
            flavors: self.flavors(tokens),
            ..Default::default()
        };

        out.lexicon_hits = self
            .special_phrases
            .terms()
            .iter()
            .filter(|p| content.contains(p.as_str()))
            .map(|p| Candidate::new(p.clone(), OriginStrategy::Lexicon))
            .collect();

        let known: Vec<&str> = out
            .entities
            .iter()
            .chain(&out.noun_runs)
            .chain(&out.lexicon_hits)
            .map(|c| c.text.as_str())
            .collect();
        let extra: Vec<Candidate> = self
            .special_foods
            .terms()
            .iter()
            .filter(|f| content.contains(f.as_str()) && !known.contains(&f.as_str()))
            .map(|f| Candidate::new(f.clone(), OriginStrategy::Ngram))
            .collect();
        out.windows.extend(extra);

        debug!(
            entities = out.entities.len(),
            noun_runs = out.noun_runs.len(),
            lexicon_hits = out.lexicon_hits.len(),
            windows = out.windows.len(),
            flavors = ?out.flavors,
            "food candidates"
        );
        out
    }

    /// Product entities within the length cap
    pub fn entities(&self, spans: &[EntitySpan]) -> Vec<Candidate> {
        spans
            .iter()
            .filter(|e| e.entity_type == vocab::PRODUCT_ENTITY)
            .map(|e| e.span.trim())
            .filter(|s| !s.is_empty() && !self.excluded_foods.is_member(s) && self.fits(s))
            .map(|s| Candidate::new(s, OriginStrategy::Linguistic))
            .collect()
    }

    /// Maximal runs of noun-tagged tokens
    pub fn noun_runs(&self, tokens: &[Token]) -> Vec<Candidate> {
        let mut runs = Vec::new();
        let mut current = String::new();

        for token in tokens {
            if token.pos.is_noun() {
                current.push_str(&token.text);
            } else if !current.is_empty() {
                self.push_run(std::mem::take(&mut current), &mut runs);
            }
        }
        if !current.is_empty() {
            self.push_run(current, &mut runs);
        }

        dedup_by_text(runs)
    }

    fn push_run(&self, run: String, runs: &mut Vec<Candidate>) {
        if !self.excluded_nouns.is_member(&run)
            && !self.excluded_foods.is_member(&run)
            && self.fits(&run)
        {
            runs.push(Candidate::new(run, OriginStrategy::Linguistic));
        }
    }

    /// Sliding windows matching a tag shape and passing the food test
    pub fn windows(&self, tokens: &[Token]) -> Vec<Candidate> {
        let mut found = Vec::new();

        for start in 0..tokens.len() {
            for shape in WindowShape::ALL {
                let end = start + shape.len();
                if end > tokens.len() {
                    continue;
                }
                let window = &tokens[start..end];
                if !shape.matches(window) {
                    continue;
                }
                if let Some(phrase) = self.accept_window(shape, window) {
                    found.push(Candidate::new(phrase, OriginStrategy::Ngram));
                }
            }
        }

        dedup_by_text(found)
    }

    fn accept_window(&self, shape: WindowShape, window: &[Token]) -> Option<String> {
        let components: Vec<&str> = window.iter().map(|t| t.text.as_str()).collect();
        let phrase = components.concat();

        if self.excluded_foods.is_member(&phrase)
            || components.iter().any(|c| self.excluded_foods.is_member(c))
            || !self.fits(&phrase)
        {
            return None;
        }

        let flavored = shape
            .flavor_slot()
            .is_some_and(|i| self.flavors.is_member(components[i]));
        if flavored || self.relatedness.is_food_related(&phrase, &components) {
            Some(phrase)
        } else {
            None
        }
    }

    /// Flavor words, first-seen order
    pub fn flavors(&self, tokens: &[Token]) -> Vec<String> {
        let mut flavors: Vec<String> = Vec::new();
        for token in tokens {
            if self.flavors.is_member(&token.text) && !flavors.contains(&token.text) {
                flavors.push(token.text.clone());
            }
        }
        flavors
    }
}
