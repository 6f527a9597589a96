//! Core types for review analysis
//!
//! Everything here lives for a single analysis run: a [`Document`] is split
//! into [`Sentence`]s, candidates are extracted and classified, and the
//! resulting [`SentimentSample`]s are folded into [`CategorySummary`] rows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Part-of-speech classes derived from the tagging port (CKIP-style tag set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    /// `Na`
    CommonNoun,
    /// `Nb`
    ProperNoun,
    /// `Nc`
    PlaceNoun,
    /// Any other `N*` tag (time, pronoun, measure ...)
    OtherNoun,
    /// `A` (non-predicative adjective)
    Adjective,
    /// Bare `V` tag
    Verb,
    /// Subtyped verbs (`VA`, `VC`, `VH`, ...)
    OtherVerb,
    Other,
}

impl PosTag {
    /// Map a raw tag string onto a coarse class
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Na" => PosTag::CommonNoun,
            "Nb" => PosTag::ProperNoun,
            "Nc" => PosTag::PlaceNoun,
            "V" | "V_2" => PosTag::Verb,
            t if t.starts_with('N') => PosTag::OtherNoun,
            t if t.starts_with('A') => PosTag::Adjective,
            t if t.starts_with('V') => PosTag::OtherVerb,
            _ => PosTag::Other,
        }
    }

    /// Check if this is any noun class
    pub fn is_noun(&self) -> bool {
        matches!(
            self,
            PosTag::CommonNoun | PosTag::ProperNoun | PosTag::PlaceNoun | PosTag::OtherNoun
        )
    }

    pub fn is_adjective(&self) -> bool {
        matches!(self, PosTag::Adjective)
    }

    /// Tags kept as aspect keywords: common/proper/place noun, adjective, verb
    pub fn is_aspect_keyword(&self) -> bool {
        matches!(
            self,
            PosTag::CommonNoun
                | PosTag::ProperNoun
                | PosTag::PlaceNoun
                | PosTag::Adjective
                | PosTag::Verb
        )
    }
}

/// A segmented word with its tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Raw tag as returned by the tagger
    pub tag: String,
    pub pos: PosTag,
}

impl Token {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let pos = PosTag::from_tag(&tag);
        Self {
            text: text.into(),
            tag,
            pos,
        }
    }

    /// Length in characters (not bytes)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// An analysis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub raw_text: String,
    /// Venue id (aspect mode) or person id (preference mode)
    pub subject_id: String,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        raw_text: impl Into<String>,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            raw_text: raw_text.into(),
            subject_id: subject_id.into(),
        }
    }

    /// Empty text or a missing subject short-circuits the run
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty() || self.subject_id.trim().is_empty()
    }
}

/// A sentence unit; tokens are filled in once by the tagging stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            tokens: Vec::new(),
        }
    }

    pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
        self.tokens = tokens;
        self
    }
}

/// Which strategy proposed a candidate span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginStrategy {
    /// Tagged tokens, noun runs and named-entity spans
    Linguistic,
    /// Keyphrase-extraction port
    Statistical,
    /// Curated phrase lists
    Lexicon,
    /// Tag-shape sliding windows
    Ngram,
}

/// A proposed keyword or phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub origin: OriginStrategy,
    /// Sentence indices this candidate speaks for; the first entry is the
    /// sentence it was extracted from.
    pub supporting_sentences: Vec<usize>,
}

impl Candidate {
    pub fn new(text: impl Into<String>, origin: OriginStrategy) -> Self {
        Self {
            text: text.into(),
            origin,
            supporting_sentences: Vec::new(),
        }
    }

    pub fn in_sentence(mut self, index: usize) -> Self {
        self.supporting_sentences.push(index);
        self
    }

    /// Index of the sentence the candidate was first extracted from
    pub fn origin_sentence(&self) -> Option<usize> {
        self.supporting_sentences.first().copied()
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Aspect taxonomy
///
/// Serialized (and sent to the classification port) as the indicator names
/// stored downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "體驗")]
    Experience,
    #[serde(rename = "食物")]
    Food,
    #[serde(rename = "服務")]
    Service,
    #[serde(rename = "價格")]
    Price,
    #[serde(rename = "環境")]
    Environment,
    #[serde(rename = "其他")]
    Other,
}

impl Category {
    /// Fixed label set, in output order
    pub const ALL: [Category; 6] = [
        Category::Experience,
        Category::Food,
        Category::Service,
        Category::Price,
        Category::Environment,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Experience => "體驗",
            Category::Food => "食物",
            Category::Service => "服務",
            Category::Price => "價格",
            Category::Environment => "環境",
            Category::Other => "其他",
        }
    }

    pub fn labels() -> [&'static str; 6] {
        Category::ALL.map(|c| c.label())
    }

    /// Parse a port label; accepts the indicator names and English names
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label() == trimmed)
            .or_else(|| match trimmed.to_lowercase().as_str() {
                "experience" => Some(Category::Experience),
                "food" => Some(Category::Food),
                "service" => Some(Category::Service),
                "price" => Some(Category::Price),
                "environment" => Some(Category::Environment),
                "other" => Some(Category::Other),
                _ => None,
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a category was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    LexiconRule,
    Model,
    /// Candidate-level result was Other; the whole sentence was classified instead
    SentenceFallback,
}

/// Accepted category for one candidate text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAssignment {
    pub candidate: String,
    pub category: Category,
    pub confidence: f64,
    pub source: DecisionSource,
}

/// Three-way sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "正面")]
    Positive,
    #[serde(rename = "中立")]
    Neutral,
    #[serde(rename = "負面")]
    Negative,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "正面",
            SentimentLabel::Neutral => "中立",
            SentimentLabel::Negative => "負面",
        }
    }

    pub fn labels() -> [&'static str; 3] {
        SentimentLabel::ALL.map(|l| l.label())
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        SentimentLabel::ALL
            .into_iter()
            .find(|l| l.label() == trimmed)
            .or_else(|| match trimmed.to_lowercase().as_str() {
                "positive" => Some(SentimentLabel::Positive),
                "neutral" => Some(SentimentLabel::Neutral),
                "negative" => Some(SentimentLabel::Negative),
                _ => None,
            })
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One scored (candidate, sentence) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSample {
    pub candidate: String,
    pub category: Category,
    pub sentence_index: usize,
    pub label: SentimentLabel,
    pub raw_confidence: f64,
    /// Signed score after bonuses, softening and clamping, in [-1, 1]
    pub adjusted_score: f64,
    /// Score on the 1-5 scale
    pub mapped_score: f64,
}

/// Per-category result row for a venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    #[serde(rename = "place_id")]
    pub subject_id: String,
    #[serde(rename = "indicator_type")]
    pub category: Category,
    #[serde(rename = "score")]
    pub average_score: f64,
    pub sample_count: usize,
    pub overall: SentimentLabel,
}

/// Food keywords mentioned by a person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodMentions {
    #[serde(rename = "user_id")]
    pub subject_id: String,
    pub foods: Vec<String>,
    /// Flavor words seen while scanning tokens
    pub flavors: Vec<String>,
}

impl FoodMentions {
    pub fn empty(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_tag_mapping() {
        assert_eq!(PosTag::from_tag("Na"), PosTag::CommonNoun);
        assert_eq!(PosTag::from_tag("Nb"), PosTag::ProperNoun);
        assert_eq!(PosTag::from_tag("Nc"), PosTag::PlaceNoun);
        assert_eq!(PosTag::from_tag("Nh"), PosTag::OtherNoun);
        assert_eq!(PosTag::from_tag("A"), PosTag::Adjective);
        assert_eq!(PosTag::from_tag("V"), PosTag::Verb);
        assert_eq!(PosTag::from_tag("VH"), PosTag::OtherVerb);
        assert_eq!(PosTag::from_tag("DE"), PosTag::Other);
    }

    #[test]
    fn test_aspect_keyword_tags() {
        assert!(PosTag::CommonNoun.is_aspect_keyword());
        assert!(PosTag::Verb.is_aspect_keyword());
        assert!(!PosTag::OtherNoun.is_aspect_keyword());
        assert!(!PosTag::OtherVerb.is_aspect_keyword());
        assert!(PosTag::OtherNoun.is_noun());
    }

    #[test]
    fn test_token_char_len_counts_characters() {
        let token = Token::new("牛肉麵", "Na");
        assert_eq!(token.char_len(), 3);
        assert_eq!(token.pos, PosTag::CommonNoun);
    }

    #[test]
    fn test_category_label_roundtrip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_label(cat.label()), Some(cat));
        }
        assert_eq!(Category::from_label("Food"), Some(Category::Food));
        assert_eq!(Category::from_label("菜單"), None);
    }

    #[test]
    fn test_sentiment_label_parse() {
        assert_eq!(SentimentLabel::from_label("正面"), Some(SentimentLabel::Positive));
        assert_eq!(SentimentLabel::from_label("negative"), Some(SentimentLabel::Negative));
        assert_eq!(SentimentLabel::from_label("mixed"), None);
    }

    #[test]
    fn test_blank_document() {
        assert!(Document::new("d1", "   ", "R1").is_blank());
        assert!(Document::new("d1", "好吃", "").is_blank());
        assert!(!Document::new("d1", "好吃", "R1").is_blank());
    }

    #[test]
    fn test_summary_serializes_with_indicator_names() {
        let summary = CategorySummary {
            subject_id: "R1".into(),
            category: Category::Food,
            average_score: 4.5,
            sample_count: 2,
            overall: SentimentLabel::Positive,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["place_id"], "R1");
        assert_eq!(json["indicator_type"], "食物");
        assert_eq!(json["overall"], "正面");
        assert_eq!(json["score"], 4.5);
    }
}
