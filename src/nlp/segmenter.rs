//! Sentence segmentation
//!
//! Reviews are short and loosely punctuated, so a "sentence" here is any run
//! of text between terminators, commas, exclamation/question marks, tildes,
//! or gaps of two or more whitespace characters.

use regex::Regex;

use crate::pipeline::errors::AnalysisError;
use crate::types::Sentence;

const DELIMITERS: &str = r"[。．！？!?，,～~]+|\s{2,}";

/// Punctuation-class sentence splitter
#[derive(Debug, Clone)]
pub struct Segmenter {
    delimiters: Regex,
}

impl Segmenter {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            delimiters: Regex::new(DELIMITERS)?,
        })
    }

    /// Split `text` into ordered, trimmed, non-empty sentences
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.delimiters
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Split into indexed [`Sentence`] values (tokens empty)
    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        self.split(text)
            .into_iter()
            .enumerate()
            .map(|(i, s)| Sentence::new(i, s))
            .collect()
    }
}
