//! Aspect and preference pipeline runners.
//!
//! [`AspectPipeline`] turns a venue review into per-category sentiment rows;
//! [`PreferencePipeline`] turns a personal post into food mentions. Both
//! hold their model ports and a validated [`AnalyzerSpec`], create a fresh
//! [`RunState`] per document, and notify a [`PipelineObserver`] at each stage
//! boundary.
//!
//! # Static dispatch
//!
//! Pipelines are generic over their ports, so each port combination is
//! monomorphized. `&P` and `Arc<P>` implement every port trait `P` does, so
//! one set of model handles can be shared by several pipelines.
//!
//! # Short-circuits and guards
//!
//! Blank text or a blank subject id returns an empty result without invoking
//! any port. Runtime limits (`max_chars`, `max_sentences`) are checked before
//! the first port call.

use rayon::prelude::*;
use tracing::debug;

use crate::aggregate::summarize;
use crate::classify::aspect::AspectClassifier;
use crate::classify::food::FoodClassifier;
use crate::nlp::segmenter::Segmenter;
use crate::phrase::chunker::FoodChunker;
use crate::phrase::extraction::AspectExtractor;
use crate::pipeline::artifacts::{AspectReport, RunState};
use crate::pipeline::errors::AnalysisError;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReportBuilder, STAGE_AGGREGATE,
    STAGE_CANDIDATES, STAGE_CLASSIFY, STAGE_SCORE, STAGE_SEGMENT,
};
use crate::pipeline::spec::{AnalyzerSpec, RuntimeSpec};
use crate::ports::{
    EntityRecognizer, KeyphraseExtractor, PortKind, SentimentModel, Tagger, ZeroShotClassifier,
};
use crate::sentiment::scorer::SentimentScorer;
use crate::types::{CategoryAssignment, CategorySummary, Document, FoodMentions, Sentence, Token};

/// Run `$body` inside a `pipeline_stage` tracing span.
macro_rules! trace_stage {
    ($name:expr, $body:block) => {{
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
        $body
    }};
}

// ============================================================================
// Port bundles
// ============================================================================

/// Ports consumed by an aspect run
#[derive(Debug, Clone)]
pub struct AspectPorts<T, K, C, S> {
    pub tagger: T,
    pub keyphrases: K,
    pub classifier: C,
    pub sentiment: S,
}

/// Ports consumed by a preference run
#[derive(Debug, Clone)]
pub struct PreferencePorts<T, E, C> {
    pub tagger: T,
    pub entities: E,
    pub classifier: C,
}

// ============================================================================
// Shared stage helpers
// ============================================================================

fn check_chars(runtime: &RuntimeSpec, text: &str) -> Result<(), AnalysisError> {
    if let Some(limit) = runtime.max_chars {
        let actual = text.chars().count();
        if actual > limit {
            return Err(AnalysisError::LimitExceeded {
                what: "input characters",
                limit,
                actual,
            });
        }
    }
    Ok(())
}

fn check_sentences(runtime: &RuntimeSpec, count: usize) -> Result<(), AnalysisError> {
    match runtime.max_sentences {
        Some(limit) if count > limit => Err(AnalysisError::LimitExceeded {
            what: "sentences",
            limit,
            actual: count,
        }),
        _ => Ok(()),
    }
}

/// Tag several texts in one port call
fn tag_texts<T: Tagger>(tagger: &T, texts: &[&str]) -> Result<Vec<Vec<Token>>, AnalysisError> {
    let tagged = tagger
        .tokenize_and_tag(texts)
        .map_err(|e| AnalysisError::port(PortKind::Tagger, e))?;
    if tagged.len() != texts.len() {
        return Err(AnalysisError::malformed(
            PortKind::Tagger,
            format!("expected {} results, got {}", texts.len(), tagged.len()),
        ));
    }

    tagged
        .into_iter()
        .map(|t| {
            if t.tokens.len() != t.tags.len() {
                return Err(AnalysisError::malformed(
                    PortKind::Tagger,
                    format!("{} tokens but {} tags", t.tokens.len(), t.tags.len()),
                ));
            }
            Ok(t.tokens.into_iter().zip(t.tags).map(|(w, p)| Token::new(w, p)).collect())
        })
        .collect()
}

// ============================================================================
// AspectPipeline
// ============================================================================

/// Venue-aspect analysis: segment → candidates → classify → score → aggregate
#[derive(Debug, Clone)]
pub struct AspectPipeline<T, K, C, S> {
    ports: AspectPorts<T, K, C, S>,
    spec: AnalyzerSpec,
    segmenter: Segmenter,
    extractor: AspectExtractor,
    classifier: AspectClassifier,
    scorer: SentimentScorer,
}

impl<T, K, C, S> AspectPipeline<T, K, C, S>
where
    T: Tagger,
    K: KeyphraseExtractor,
    C: ZeroShotClassifier,
    S: SentimentModel,
{
    /// Build a pipeline; the spec is validated first.
    pub fn new(ports: AspectPorts<T, K, C, S>, spec: AnalyzerSpec) -> Result<Self, AnalysisError> {
        let spec = spec.validated()?;
        Ok(Self {
            segmenter: Segmenter::new()?,
            extractor: AspectExtractor::new(&spec.aspect),
            classifier: AspectClassifier::new(&spec.aspect)?,
            scorer: SentimentScorer::new(&spec.sentiment)?,
            ports,
            spec,
        })
    }

    /// Build a pipeline with the stock configuration
    pub fn with_defaults(ports: AspectPorts<T, K, C, S>) -> Result<Self, AnalysisError> {
        Self::new(ports, AnalyzerSpec::default())
    }

    pub fn spec(&self) -> &AnalyzerSpec {
        &self.spec
    }

    pub fn ports(&self) -> &AspectPorts<T, K, C, S> {
        &self.ports
    }

    /// Per-category sentiment rows for one review of `subject_id`
    pub fn analyze_venue_aspects(
        &self,
        text: &str,
        subject_id: &str,
    ) -> Result<Vec<CategorySummary>, AnalysisError> {
        let doc = Document::new(subject_id, text, subject_id);
        Ok(self.run(&doc, &mut NoopObserver)?.summaries)
    }

    /// Like [`Self::analyze_venue_aspects`], with every intermediate artifact
    pub fn run_detailed(&self, text: &str, subject_id: &str) -> Result<AspectReport, AnalysisError> {
        let doc = Document::new(subject_id, text, subject_id);
        self.run(&doc, &mut NoopObserver)
    }

    /// Analyze many documents in parallel; each result is independent
    pub fn analyze_batch(
        &self,
        docs: &[Document],
    ) -> Vec<Result<Vec<CategorySummary>, AnalysisError>> {
        docs.par_iter()
            .map(|doc| self.run(doc, &mut NoopObserver).map(|report| report.summaries))
            .collect()
    }

    /// Execute every stage for one document.
    ///
    /// Stages run in order:
    /// 1. Segment and tag (one tagger call for all sentences)
    /// 2. Extract candidates with topic carry-forward
    /// 3. Classify each unique candidate
    /// 4. Score (candidate, sentence) pairs
    /// 5. Aggregate per category
    pub fn run(
        &self,
        doc: &Document,
        observer: &mut impl PipelineObserver,
    ) -> Result<AspectReport, AnalysisError> {
        if doc.is_blank() {
            debug!(doc = %doc.id, "blank input, nothing to analyze");
            return Ok(AspectReport::empty(doc.subject_id.as_str()));
        }
        let runtime = &self.spec.runtime;
        check_chars(runtime, &doc.raw_text)?;
        let mut state = RunState::new();

        // Stage 1: Segment + tag
        observer.on_stage_start(STAGE_SEGMENT);
        let clock = StageClock::start();
        let sentences = trace_stage!(STAGE_SEGMENT, {
            let mut sentences = self.segmenter.segment(&doc.raw_text);
            check_sentences(runtime, sentences.len())?;
            if !sentences.is_empty() {
                let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
                let tagged = tag_texts(&self.ports.tagger, &texts)?;
                sentences = sentences
                    .into_iter()
                    .zip(tagged)
                    .map(|(s, tokens)| s.with_tokens(tokens))
                    .collect();
            }
            sentences
        });
        let report = StageReportBuilder::new(clock.elapsed())
            .items(sentences.len())
            .port_calls(usize::from(!sentences.is_empty()))
            .build();
        observer.on_stage_end(STAGE_SEGMENT, &report);
        observer.on_sentences(&sentences);

        if sentences.is_empty() {
            return Ok(AspectReport::empty(doc.subject_id.as_str()));
        }

        // Stage 2: Candidates
        observer.on_stage_start(STAGE_CANDIDATES);
        let clock = StageClock::start();
        let extraction = trace_stage!(STAGE_CANDIDATES, {
            self.extractor.extract(&sentences, &self.ports.keyphrases)?
        });
        let report = StageReportBuilder::new(clock.elapsed())
            .items(extraction.candidates.len())
            .port_calls(sentences.len())
            .build();
        observer.on_stage_end(STAGE_CANDIDATES, &report);
        observer.on_candidates(&extraction.candidates);

        // Stage 3: Classify
        observer.on_stage_start(STAGE_CLASSIFY);
        let clock = StageClock::start();
        let assignments: Vec<CategoryAssignment> = trace_stage!(STAGE_CLASSIFY, {
            self.classifier.classify_all(
                &self.ports.classifier,
                &extraction,
                &sentences,
                &mut state.assignments,
            )?;
            state.assignments.accepted().cloned().collect()
        });
        let report = StageReportBuilder::new(clock.elapsed())
            .items(assignments.len())
            .build();
        observer.on_stage_end(STAGE_CLASSIFY, &report);
        observer.on_assignments(&assignments);

        // Stage 4: Score
        observer.on_stage_start(STAGE_SCORE);
        let clock = StageClock::start();
        let samples = trace_stage!(STAGE_SCORE, {
            self.scorer.score_assignments(
                &self.ports.sentiment,
                &assignments,
                &extraction.candidates,
                &sentences,
                &mut state.scoring,
            )?
        });
        let report = StageReportBuilder::new(clock.elapsed())
            .items(samples.len())
            .build();
        observer.on_stage_end(STAGE_SCORE, &report);
        observer.on_samples(&samples);

        // Stage 5: Aggregate
        observer.on_stage_start(STAGE_AGGREGATE);
        let clock = StageClock::start();
        let summaries = trace_stage!(STAGE_AGGREGATE, { summarize(&doc.subject_id, &samples) });
        let report = StageReportBuilder::new(clock.elapsed())
            .items(summaries.len())
            .build();
        observer.on_stage_end(STAGE_AGGREGATE, &report);

        debug!(
            doc = %doc.id,
            candidates = extraction.candidates.len(),
            assignments = assignments.len(),
            samples = samples.len(),
            categories = summaries.len(),
            "aspect run complete"
        );

        Ok(AspectReport {
            subject_id: doc.subject_id.clone(),
            sentences,
            candidates: extraction.candidates,
            assignments,
            samples,
            summaries,
        })
    }
}

// ============================================================================
// PreferencePipeline
// ============================================================================

/// Food-mention analysis: tag → candidates → food decision
#[derive(Debug, Clone)]
pub struct PreferencePipeline<T, E, C> {
    ports: PreferencePorts<T, E, C>,
    spec: AnalyzerSpec,
    segmenter: Segmenter,
    chunker: FoodChunker,
    classifier: FoodClassifier,
}

impl<T, E, C> PreferencePipeline<T, E, C>
where
    T: Tagger,
    E: EntityRecognizer,
    C: ZeroShotClassifier,
{
    /// Build a pipeline; the spec is validated first.
    pub fn new(ports: PreferencePorts<T, E, C>, spec: AnalyzerSpec) -> Result<Self, AnalysisError> {
        let spec = spec.validated()?;
        Ok(Self {
            segmenter: Segmenter::new()?,
            chunker: FoodChunker::new(&spec.preference)?,
            classifier: FoodClassifier::new(&spec.preference)?,
            ports,
            spec,
        })
    }

    pub fn with_defaults(ports: PreferencePorts<T, E, C>) -> Result<Self, AnalysisError> {
        Self::new(ports, AnalyzerSpec::default())
    }

    pub fn spec(&self) -> &AnalyzerSpec {
        &self.spec
    }

    /// Food items (and flavor words) mentioned in one post by `subject_id`
    pub fn analyze_food_mentions(
        &self,
        text: &str,
        subject_id: &str,
    ) -> Result<FoodMentions, AnalysisError> {
        let doc = Document::new(subject_id, text, subject_id);
        self.run(&doc, &mut NoopObserver)
    }

    pub fn analyze_batch(&self, docs: &[Document]) -> Vec<Result<FoodMentions, AnalysisError>> {
        docs.par_iter()
            .map(|doc| self.run(doc, &mut NoopObserver))
            .collect()
    }

    /// Execute every stage for one document.
    ///
    /// The whole text is tagged as a single unit; dishes often straddle the
    /// punctuation the aspect segmenter splits on. Sentences are still counted
    /// against `max_sentences`.
    pub fn run(
        &self,
        doc: &Document,
        observer: &mut impl PipelineObserver,
    ) -> Result<FoodMentions, AnalysisError> {
        if doc.is_blank() {
            debug!(doc = %doc.id, "blank input, nothing to analyze");
            return Ok(FoodMentions::empty(doc.subject_id.as_str()));
        }
        check_chars(&self.spec.runtime, &doc.raw_text)?;
        check_sentences(&self.spec.runtime, self.segmenter.split(&doc.raw_text).len())?;
        let content = doc.raw_text.trim();

        // Stage 1: Tag
        observer.on_stage_start(STAGE_SEGMENT);
        let clock = StageClock::start();
        let sentence = trace_stage!(STAGE_SEGMENT, {
            let tokens = tag_texts(&self.ports.tagger, &[content])?
                .into_iter()
                .next()
                .unwrap_or_default();
            Sentence::new(0, content).with_tokens(tokens)
        });
        let report = StageReportBuilder::new(clock.elapsed())
            .items(sentence.tokens.len())
            .port_calls(1)
            .build();
        observer.on_stage_end(STAGE_SEGMENT, &report);
        observer.on_sentences(std::slice::from_ref(&sentence));

        // Stage 2: Candidates
        observer.on_stage_start(STAGE_CANDIDATES);
        let clock = StageClock::start();
        let (candidates, flavors) = trace_stage!(STAGE_CANDIDATES, {
            let entities = self
                .ports
                .entities
                .recognize_entities(content)
                .map_err(|e| AnalysisError::port(PortKind::Entity, e))?;
            let found = self.chunker.chunk(content, &sentence.tokens, &entities);
            (self.classifier.prefilter(found.union()), found.flavors)
        });
        let report = StageReportBuilder::new(clock.elapsed())
            .items(candidates.len())
            .port_calls(1)
            .build();
        observer.on_stage_end(STAGE_CANDIDATES, &report);
        observer.on_candidates(&candidates);

        // Stage 3: Food decision
        observer.on_stage_start(STAGE_CLASSIFY);
        let clock = StageClock::start();
        let foods = trace_stage!(STAGE_CLASSIFY, {
            self.classifier.classify(&self.ports.classifier, &candidates)?
        });
        let report = StageReportBuilder::new(clock.elapsed())
            .items(foods.len())
            .build();
        observer.on_stage_end(STAGE_CLASSIFY, &report);

        debug!(doc = %doc.id, foods = ?foods, flavors = ?flavors, "preference run complete");

        Ok(FoodMentions {
            subject_id: doc.subject_id.clone(),
            foods,
            flavors,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
