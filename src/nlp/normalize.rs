//! Text cleanup before model calls
//!
//! Emoji glyphs confuse the sentiment model and are removed; whitespace runs
//! collapse to a single space. ASCII emoticons (`:)`, `XD`) are left alone.

use regex::Regex;

use crate::pipeline::errors::AnalysisError;

const EMOJI: &str = r"[\p{Extended_Pictographic}\p{Emoji_Modifier}\p{Regional_Indicator}\u{200D}\u{FE0F}\u{20E3}]";

#[derive(Debug, Clone)]
pub struct TextCleaner {
    emoji: Regex,
    whitespace: Regex,
}

impl TextCleaner {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            emoji: Regex::new(EMOJI)?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Strip emoji, collapse whitespace, trim
    pub fn clean(&self, text: &str) -> String {
        let without_emoji = self.emoji.replace_all(text, "");
        self.whitespace
            .replace_all(&without_emoji, " ")
            .trim()
            .to_string()
    }
}
