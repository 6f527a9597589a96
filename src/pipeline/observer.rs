//! Stage hooks for profiling and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.
//!
//! Every hook has a no-op default, so an observer only implements what it
//! cares about. [`NoopObserver`] implements nothing and compiles away.

use std::time::{Duration, Instant};

use crate::types::{Candidate, CategoryAssignment, Sentence, SentimentSample};

// ─── Stage names ────────────────────────────────────────────────────────────

pub const STAGE_SEGMENT: &str = "segment";
pub const STAGE_CANDIDATES: &str = "candidates";
pub const STAGE_CLASSIFY: &str = "classify";
pub const STAGE_SCORE: &str = "score";
pub const STAGE_AGGREGATE: &str = "aggregate";

/// Stages of an aspect run, in execution order
pub const ASPECT_STAGES: [&str; 5] = [
    STAGE_SEGMENT,
    STAGE_CANDIDATES,
    STAGE_CLASSIFY,
    STAGE_SCORE,
    STAGE_AGGREGATE,
];

/// Stages of a preference run, in execution order
pub const PREFERENCE_STAGES: [&str; 3] = [STAGE_SEGMENT, STAGE_CANDIDATES, STAGE_CLASSIFY];

// ─── Stage reports ──────────────────────────────────────────────────────────

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What a stage did: how long it took and how many items it produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    duration: Duration,
    items: Option<usize>,
    port_calls: Option<usize>,
}

impl StageReport {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Items produced (sentences, candidates, assignments, samples, rows)
    pub fn items(&self) -> Option<usize> {
        self.items
    }

    /// Port invocations made during the stage, when the stage tracks them
    pub fn port_calls(&self) -> Option<usize> {
        self.port_calls
    }
}

/// Fluent constructor for [`StageReport`].
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(duration: Duration) -> Self {
        Self {
            report: StageReport::new(duration),
        }
    }

    pub fn items(mut self, items: usize) -> Self {
        self.report.items = Some(items);
        self
    }

    pub fn port_calls(mut self, calls: usize) -> Self {
        self.report.port_calls = Some(calls);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

// ─── Observer trait ─────────────────────────────────────────────────────────

pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Segmented (and, once tagged, tokenized) sentences
    fn on_sentences(&mut self, _sentences: &[Sentence]) {}

    fn on_candidates(&mut self, _candidates: &[Candidate]) {}

    fn on_assignments(&mut self, _assignments: &[CategoryAssignment]) {}

    fn on_samples(&mut self, _samples: &[SentimentSample]) {}
}

/// Observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Records one `(stage, report)` pair per finished stage.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Stage names in the order they finished
    pub fn stages(&self) -> Vec<&'static str> {
        self.reports.iter().map(|(stage, _)| *stage).collect()
    }

    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    pub fn total_duration(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.duration()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}
