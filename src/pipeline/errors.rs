//! Error types.
//!
//! [`SpecError`] describes a single configuration problem (code, JSON
//! pointer, message, hint) and is collected by the validation engine.
//! [`AnalysisError`] is what an analysis call returns when it cannot produce
//! a complete result. Blank input is not an error: it yields an empty result.

use serde::Serialize;
use thiserror::Error;

use super::error_code::ErrorCode;
use crate::ports::{PortError, PortKind};

/// A configuration diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("[{code}] {path}: {message}")]
pub struct SpecError {
    pub code: ErrorCode,
    /// JSON pointer to the offending field (e.g. `/aspect/keyphrase_top_n`).
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Whole-document failure.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A port call failed; no partial result is produced.
    #[error("{} port failed: {source}", .port.as_str())]
    PortFailure {
        port: PortKind,
        #[source]
        source: PortError,
    },

    /// A port answered, but not in the shape the pipeline requires.
    #[error("{} port returned malformed output: {message}", .port.as_str())]
    MalformedPortOutput { port: PortKind, message: String },

    /// A runtime guard from the spec was exceeded.
    #[error("{what} exceeds limit ({actual} > {limit})")]
    LimitExceeded {
        what: &'static str,
        limit: usize,
        actual: usize,
    },

    /// The spec failed validation; carries every error diagnostic.
    #[error("invalid analyzer spec: {}", summarize(.0))]
    InvalidSpec(Vec<SpecError>),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to build lexicon matcher: {0}")]
    Lexicon(#[from] aho_corasick::BuildError),
}

impl AnalysisError {
    pub fn port(port: PortKind, source: PortError) -> Self {
        Self::PortFailure { port, source }
    }

    pub fn malformed(port: PortKind, message: impl Into<String>) -> Self {
        Self::MalformedPortOutput {
            port,
            message: message.into(),
        }
    }

    /// The port involved, if this is a port error.
    pub fn port_kind(&self) -> Option<PortKind> {
        match self {
            Self::PortFailure { port, .. } | Self::MalformedPortOutput { port, .. } => Some(*port),
            _ => None,
        }
    }
}

fn summarize(errors: &[SpecError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
