//! Analysis pipelines
//!
//! Stage orchestration, configuration, validation and error types for the
//! aspect and preference runs.

pub mod artifacts;
pub mod error_code;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod validation;

pub use errors::{AnalysisError, SpecError};
pub use runner::{AspectPipeline, AspectPorts, PreferencePipeline, PreferencePorts};
pub use spec::AnalyzerSpec;
