//! Model ports
//!
//! The pipeline never loads models itself. Tokenization, keyphrase
//! extraction, entity recognition and zero-shot classification are consumed
//! through the traits below and injected into a pipeline at construction
//! time. Every call is blocking; a failing call aborts the whole document.
//!
//! All ports are `Send + Sync` so one set of model handles can serve several
//! documents in parallel (see [`crate::pipeline::runner::AspectPipeline::analyze_batch`]).

#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::errors::AnalysisError;

/// Failure reported by a port implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PortError {
    pub message: String,
}

impl PortError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Identifies a port in error messages and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortKind {
    Tagger,
    Keyphrase,
    Entity,
    Classifier,
    Sentiment,
}

impl PortKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tagger => "tagger",
            Self::Keyphrase => "keyphrase",
            Self::Entity => "entity",
            Self::Classifier => "classifier",
            Self::Sentiment => "sentiment",
        }
    }
}

/// Segmented words and their tags for one input text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedText {
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
}

impl TaggedText {
    pub fn new(tokens: Vec<String>, tags: Vec<String>) -> Self {
        Self { tokens, tags }
    }
}

/// Statistically ranked keyphrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyphrase {
    pub phrase: String,
    pub score: f64,
}

/// Named-entity span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub span: String,
    pub entity_type: String,
}

/// One entry of a ranked classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    pub label: String,
    pub score: f64,
}

impl ScoredLabel {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Highest-scoring entry of a ranking; the first one wins ties
pub fn top_label(ranked: &[ScoredLabel]) -> Option<&ScoredLabel> {
    ranked.iter().fold(None, |best: Option<&ScoredLabel>, cur| match best {
        Some(b) if b.score >= cur.score => Some(b),
        _ => Some(cur),
    })
}

/// Top entry of a ranking returned by `port`.
///
/// An empty ranking, or any score that is not a finite value in [0, 1], is
/// malformed output and fails the document.
pub fn ranked_top(port: PortKind, ranked: &[ScoredLabel]) -> Result<&ScoredLabel, AnalysisError> {
    if let Some(bad) = ranked
        .iter()
        .find(|s| !s.score.is_finite() || !(0.0..=1.0).contains(&s.score))
    {
        return Err(AnalysisError::malformed(
            port,
            format!("score {} for label {:?} outside [0, 1]", bad.score, bad.label),
        ));
    }
    top_label(ranked).ok_or_else(|| AnalysisError::malformed(port, "empty ranking"))
}

/// Word segmentation + part-of-speech tagging
pub trait Tagger: Send + Sync {
    /// Tag each input text; the output has one entry per input.
    fn tokenize_and_tag(&self, texts: &[&str]) -> Result<Vec<TaggedText>, PortError>;
}

/// Keyphrase extraction (KeyBERT-style)
pub trait KeyphraseExtractor: Send + Sync {
    fn extract_keyphrases(&self, sentence: &str, top_n: usize)
        -> Result<Vec<Keyphrase>, PortError>;
}

/// Named-entity recognition
pub trait EntityRecognizer: Send + Sync {
    fn recognize_entities(&self, text: &str) -> Result<Vec<EntitySpan>, PortError>;
}

/// General-purpose zero-shot classification
pub trait ZeroShotClassifier: Send + Sync {
    /// Score `text` against `labels`, returning a ranking.
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<ScoredLabel>, PortError>;

    /// Classify several texts at once; the output has one ranking per input.
    ///
    /// The default implementation calls [`classify`](Self::classify) per text
    /// and ignores `multi_label`.
    fn classify_batch(
        &self,
        texts: &[&str],
        labels: &[&str],
        multi_label: bool,
    ) -> Result<Vec<Vec<ScoredLabel>>, PortError> {
        let _ = multi_label;
        texts.iter().map(|t| self.classify(t, labels)).collect()
    }
}

/// Sentiment classification against a positive/neutral/negative label set
pub trait SentimentModel: Send + Sync {
    fn classify_sentiment(&self, text: &str, labels: &[&str])
        -> Result<Vec<ScoredLabel>, PortError>;
}

// Shared handles: `&T` and `Arc<T>` forward to the wrapped port.

macro_rules! forward_port {
    ($trait:ident { $(fn $name:ident(&self $(, $arg:ident : $ty:ty)*) -> $ret:ty;)* }) => {
        impl<T: $trait + ?Sized> $trait for &T {
            $(fn $name(&self $(, $arg: $ty)*) -> $ret { (**self).$name($($arg),*) })*
        }

        impl<T: $trait + ?Sized> $trait for Arc<T> {
            $(fn $name(&self $(, $arg: $ty)*) -> $ret { (**self).$name($($arg),*) })*
        }
    };
}

forward_port!(Tagger {
    fn tokenize_and_tag(&self, texts: &[&str]) -> Result<Vec<TaggedText>, PortError>;
});

forward_port!(KeyphraseExtractor {
    fn extract_keyphrases(&self, sentence: &str, top_n: usize) -> Result<Vec<Keyphrase>, PortError>;
});

forward_port!(EntityRecognizer {
    fn recognize_entities(&self, text: &str) -> Result<Vec<EntitySpan>, PortError>;
});

forward_port!(ZeroShotClassifier {
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<ScoredLabel>, PortError>;
    fn classify_batch(&self, texts: &[&str], labels: &[&str], multi_label: bool) -> Result<Vec<Vec<ScoredLabel>>, PortError>;
});

forward_port!(SentimentModel {
    fn classify_sentiment(&self, text: &str, labels: &[&str]) -> Result<Vec<ScoredLabel>, PortError>;
});
