//! Analyzer specification types.
//!
//! An [`AnalyzerSpec`] carries every tunable constant of the two pipelines
//! plus runtime guards and strictness settings. It is the input to the
//! [`super::validation::ValidationEngine`]. `AnalyzerSpec::default()` is the
//! stock configuration.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "aspect": { "keyphrase_top_n": 2, "stopword_language": "zh" },
//!   "preference": { "food_threshold": 0.75 },
//!   "sentiment": { "softening_shift": 0.35 },
//!   "runtime": { "max_chars": 20000 },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::errors::AnalysisError;
use super::validation::ValidationEngine;

pub const SPEC_VERSION: u32 = 1;

/// Top-level analyzer specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerSpec {
    /// Spec version (currently `1`).
    #[serde(default = "default_version")]
    pub v: u32,

    #[serde(default)]
    pub aspect: AspectSpec,

    #[serde(default)]
    pub preference: PreferenceSpec,

    #[serde(default)]
    pub sentiment: SentimentSpec,

    /// Runtime execution limits.
    #[serde(default)]
    pub runtime: RuntimeSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for AnalyzerSpec {
    fn default() -> Self {
        Self {
            v: SPEC_VERSION,
            aspect: AspectSpec::default(),
            preference: PreferenceSpec::default(),
            sentiment: SentimentSpec::default(),
            runtime: RuntimeSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl AnalyzerSpec {
    /// Parse and validate a JSON spec.
    ///
    /// Warnings (unknown fields in non-strict mode) are logged and accepted.
    pub fn from_json(json: &str) -> Result<Self, SpecLoadError> {
        let spec: AnalyzerSpec = serde_json::from_str(json)?;
        spec.validated().map_err(SpecLoadError::Invalid)
    }

    /// Run the default validation rules, returning `self` if no errors fire.
    pub fn validated(self) -> Result<Self, AnalysisError> {
        let report = ValidationEngine::with_defaults().validate(&self);
        for warning in report.warnings() {
            tracing::warn!(code = %warning.code, path = %warning.path, "{}", warning.message);
        }
        if report.has_errors() {
            return Err(AnalysisError::InvalidSpec(report.errors().cloned().collect()));
        }
        Ok(self)
    }
}

/// Failure to load a spec from JSON.
#[derive(Debug, thiserror::Error)]
pub enum SpecLoadError {
    #[error("malformed spec JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(AnalysisError),
}

fn default_version() -> u32 {
    SPEC_VERSION
}

/// Aspect-mode extraction and classification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectSpec {
    /// Keyphrases requested from the keyphrase port per sentence.
    pub keyphrase_top_n: usize,
    /// Longest keyphrase kept, in characters.
    pub max_keyphrase_chars: usize,
    /// Non-Other assignments at or below this score are discarded.
    pub acceptance_threshold: f64,
    /// Sentence-level result must exceed this to override an Other candidate.
    pub sentence_override_threshold: f64,
    /// Stopword list for tagged keywords: `zh` (built-in) or a `stop-words`
    /// language such as `en`.
    pub stopword_language: String,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for AspectSpec {
    fn default() -> Self {
        Self {
            keyphrase_top_n: 2,
            max_keyphrase_chars: 6,
            acceptance_threshold: 0.5,
            sentence_override_threshold: 0.5,
            stopword_language: "zh".to_string(),
            unknown_fields: HashMap::new(),
        }
    }
}

/// Preference-mode (food mention) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceSpec {
    /// Classifier score a non-lexicon candidate must exceed.
    pub food_threshold: f64,
    /// Longest candidate kept, in characters.
    pub max_phrase_chars: usize,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for PreferenceSpec {
    fn default() -> Self {
        Self {
            food_threshold: 0.75,
            max_phrase_chars: 6,
            unknown_fields: HashMap::new(),
        }
    }
}

/// Sentiment scoring weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentSpec {
    /// Added for positive emoji / extreme-positive phrases, subtracted for negative ones.
    pub bonus: f64,
    /// Pull toward neutral when a softening qualifier is present.
    pub softening_shift: f64,
    /// Confidence assigned by the summary-phrase shortcut.
    pub summary_confidence: f64,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for SentimentSpec {
    fn default() -> Self {
        Self {
            bonus: 0.2,
            softening_shift: 0.35,
            summary_confidence: 0.5,
            unknown_fields: HashMap::new(),
        }
    }
}

/// Runtime execution limits (fail-fast guards, checked before any port call).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeSpec {
    /// Maximum input length in characters.
    #[serde(default)]
    pub max_chars: Option<usize>,

    /// Maximum number of sentences after segmentation. Preference runs tag
    /// the text whole but are held to the same count.
    #[serde(default)]
    pub max_sentences: Option<usize>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_spec() {
        let spec: AnalyzerSpec = serde_json::from_str(r#"{ "v": 1 }"#).unwrap();
        assert_eq!(spec.v, 1);
        assert_eq!(spec.aspect.keyphrase_top_n, 2);
        assert_eq!(spec.aspect.stopword_language, "zh");
        assert_eq!(spec.preference.food_threshold, 0.75);
        assert!(spec.runtime.max_chars.is_none());
        assert!(!spec.strict);
    }

    #[test]
    fn test_version_defaults_when_absent() {
        let spec: AnalyzerSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(spec.v, SPEC_VERSION);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let json = r#"{
            "v": 1,
            "aspect": { "acceptance_threshold": 0.6 },
            "sentiment": { "softening_shift": 0.3 },
            "runtime": { "max_sentences": 200 }
        }"#;
        let spec: AnalyzerSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.aspect.acceptance_threshold, 0.6);
        assert_eq!(spec.aspect.max_keyphrase_chars, 6);
        assert_eq!(spec.sentiment.softening_shift, 0.3);
        assert_eq!(spec.sentiment.bonus, 0.2);
        assert_eq!(spec.runtime.max_sentences, Some(200));
    }

    #[test]
    fn test_unknown_fields_captured() {
        let json = r#"{
            "v": 1,
            "bogus_top_level": 42,
            "aspect": { "bogus_aspect": "xyz" },
            "runtime": { "max_threads": 8 }
        }"#;
        let spec: AnalyzerSpec = serde_json::from_str(json).unwrap();
        assert!(spec.unknown_fields.contains_key("bogus_top_level"));
        assert!(spec.aspect.unknown_fields.contains_key("bogus_aspect"));
        assert!(spec.runtime.unknown_fields.contains_key("max_threads"));
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        let err = AnalyzerSpec::from_json(r#"{ "v": 1, "preference": { "food_threshold": 1.5 } }"#)
            .unwrap_err();
        assert!(matches!(err, SpecLoadError::Invalid(AnalysisError::InvalidSpec(_))));
    }

    #[test]
    fn test_from_json_rejects_bad_json() {
        let err = AnalyzerSpec::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SpecLoadError::Json(_)));
    }

    #[test]
    fn test_from_json_accepts_unknown_fields_when_lenient() {
        let spec = AnalyzerSpec::from_json(r#"{ "v": 1, "extra": true }"#).unwrap();
        assert!(spec.unknown_fields.contains_key("extra"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = r#"{"v":1,"aspect":{"keyphrase_top_n":3}}"#;
        let spec: AnalyzerSpec = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&spec).unwrap();
        assert_eq!(back["aspect"]["keyphrase_top_n"], 3);
        assert_eq!(back["preference"]["food_threshold"], 0.75);
    }
}
