//! Review aspect and food-mention analysis
//!
//! Turns free-text restaurant reviews into structured signals:
//! - per-aspect sentiment rows for a venue (food, service, price,
//!   environment, experience, other) on a 1-5 scale
//! - food items and flavor words a person mentions
//!
//! Tokenization, keyphrase extraction, entity recognition and zero-shot
//! classification are consumed through the traits in [`ports`]; this crate
//! owns segmentation, candidate extraction, the rule chains, sentiment
//! scoring and aggregation.
//!
//! ```ignore
//! use review_aspects::{analyze_venue_aspects, AspectPorts};
//!
//! let ports = AspectPorts { tagger, keyphrases, classifier, sentiment };
//! let rows = analyze_venue_aspects(ports, "湯頭很棒，下次還會再來！", "place-1")?;
//! ```

pub mod aggregate;
pub mod classify;
pub mod nlp;
pub mod phrase;
pub mod pipeline;
pub mod ports;
pub mod sentiment;
pub mod types;

pub use pipeline::artifacts::AspectReport;
pub use pipeline::errors::{AnalysisError, SpecError};
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageTimingObserver};
pub use pipeline::runner::{AspectPipeline, AspectPorts, PreferencePipeline, PreferencePorts};
pub use pipeline::spec::{AnalyzerSpec, SpecLoadError};
pub use ports::{
    EntityRecognizer, KeyphraseExtractor, PortError, PortKind, SentimentModel, Tagger,
    ZeroShotClassifier,
};
pub use types::{
    Category, CategorySummary, Document, FoodMentions, SentimentLabel, SentimentSample,
};

/// Per-category sentiment rows for one review, stock configuration
pub fn analyze_venue_aspects<T, K, C, S>(
    ports: AspectPorts<T, K, C, S>,
    text: &str,
    subject_id: &str,
) -> Result<Vec<CategorySummary>, AnalysisError>
where
    T: Tagger,
    K: KeyphraseExtractor,
    C: ZeroShotClassifier,
    S: SentimentModel,
{
    AspectPipeline::with_defaults(ports)?.analyze_venue_aspects(text, subject_id)
}

/// Food items mentioned in one post, stock configuration
pub fn analyze_food_mentions<T, E, C>(
    ports: PreferencePorts<T, E, C>,
    text: &str,
    subject_id: &str,
) -> Result<FoodMentions, AnalysisError>
where
    T: Tagger,
    E: EntityRecognizer,
    C: ZeroShotClassifier,
{
    PreferencePipeline::with_defaults(ports)?.analyze_food_mentions(text, subject_id)
}
