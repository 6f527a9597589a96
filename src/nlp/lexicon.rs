//! Term lexicons
//!
//! A [`Lexicon`] answers the three questions the rule chains ask of a span:
//! does it contain any term, is it exactly a term, does it end with a term.
//! Containment runs through a single Aho-Corasick automaton.

use aho_corasick::AhoCorasick;
use rustc_hash::FxHashSet;

use crate::pipeline::errors::AnalysisError;

#[derive(Debug, Clone)]
pub struct Lexicon {
    terms: Vec<String>,
    members: FxHashSet<String>,
    matcher: AhoCorasick,
}

impl Lexicon {
    /// Build a lexicon from a term list
    pub fn new<I, S>(terms: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();
        let matcher = AhoCorasick::new(&terms)?;
        Ok(Self {
            members: terms.iter().cloned().collect(),
            terms,
            matcher,
        })
    }

    /// Check if `text` contains any term as a substring
    pub fn contains_any(&self, text: &str) -> bool {
        !self.terms.is_empty() && self.matcher.is_match(text)
    }

    /// First term (in match order) found in `text`
    pub fn find(&self, text: &str) -> Option<&str> {
        self.matcher
            .find(text)
            .map(|m| self.terms[m.pattern().as_usize()].as_str())
    }

    /// Check if `text` is exactly one of the terms
    pub fn is_member(&self, text: &str) -> bool {
        self.members.contains(text)
    }

    /// Check if `text` ends with any term
    pub fn is_suffix_of(&self, text: &str) -> bool {
        self.terms.iter().any(|t| text.ends_with(t.as_str()))
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_any() {
        let lex = Lexicon::new(["湯頭", "口味", "飲料"]).unwrap();
        assert!(lex.contains_any("拉麵湯頭"));
        assert!(lex.contains_any("飲料"));
        assert!(!lex.contains_any("服務生"));
    }

    #[test]
    fn test_membership_is_exact() {
        let lex = Lexicon::new(["牛排", "飯"]).unwrap();
        assert!(lex.is_member("牛排"));
        assert!(!lex.is_member("牛排飯"));
        assert!(lex.contains_any("牛排飯"));
    }

    #[test]
    fn test_suffix() {
        let lex = Lexicon::new(["的", "了"]).unwrap();
        assert!(lex.is_suffix_of("好吃的"));
        assert!(!lex.is_suffix_of("的好吃"));
    }

    #[test]
    fn test_find_reports_term() {
        let lex = Lexicon::new(["價格", "貴"]).unwrap();
        assert_eq!(lex.find("有點貴"), Some("貴"));
        assert_eq!(lex.find("好吃"), None);
    }

    #[test]
    fn test_empty_lexicon_matches_nothing() {
        let lex = Lexicon::new(Vec::<String>::new()).unwrap();
        assert!(lex.is_empty());
        assert!(!lex.contains_any("anything"));
        assert!(!lex.is_suffix_of("anything"));
    }

    #[test]
    fn test_duplicates_collapsed() {
        let lex = Lexicon::new(["雞", "雞", "魚"]).unwrap();
        assert_eq!(lex.len(), 2);
    }
}
