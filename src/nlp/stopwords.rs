//! Stopword filtering for aspect keywords
//!
//! Tagged tokens that survive the POS filter still include function words
//! ("可以", "還有") the tagger marks as verbs or nouns. The default filter
//! drops those. Reviews written in another language can load a list from
//! the `stop-words` crate instead; ASCII words are compared lowercased.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Function words that never make useful review keywords
const REVIEW_STOPWORDS: &[&str] = &[
    "的", "了", "和", "可以", "還有", "很多", "自己", "到", "跟", "有", "是", "在", "要", "很",
    "不", "再", "會", "來", "加", "做",
];

/// Codes served by [`REVIEW_STOPWORDS`]
const BUILTIN_LANGUAGES: &[&str] = &["zh", "zh-tw", "chinese"];

fn crate_language(language: &str) -> Option<LANGUAGE> {
    match language.to_ascii_lowercase().as_str() {
        "en" | "english" => Some(LANGUAGE::English),
        "it" | "italian" => Some(LANGUAGE::Italian),
        "pt" | "portuguese" => Some(LANGUAGE::Portuguese),
        "fr" | "french" => Some(LANGUAGE::French),
        "de" | "german" => Some(LANGUAGE::German),
        "es" | "spanish" => Some(LANGUAGE::Spanish),
        _ => None,
    }
}

/// Word set consulted during candidate extraction
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::from_list(REVIEW_STOPWORDS)
    }
}

impl StopwordFilter {
    /// Filter for a review language.
    ///
    /// `zh` (and anything unrecognized) gives the built-in review list.
    pub fn for_language(language: &str) -> Self {
        match crate_language(language) {
            Some(lang) => Self {
                words: get(lang).iter().map(|w| w.to_ascii_lowercase()).collect(),
            },
            None => Self::default(),
        }
    }

    /// Whether `language` names the built-in list or a `stop-words` list
    pub fn is_supported_language(language: &str) -> bool {
        BUILTIN_LANGUAGES.contains(&language.to_ascii_lowercase().as_str())
            || crate_language(language).is_some()
    }

    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_ascii_lowercase()).collect(),
        }
    }

    /// Filter that keeps every word
    pub fn empty() -> Self {
        Self {
            words: FxHashSet::default(),
        }
    }

    /// Extend the list (e.g. venue-specific filler words)
    pub fn with_words(mut self, words: &[&str]) -> Self {
        self.words.extend(words.iter().map(|w| w.to_ascii_lowercase()));
        self
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
