//! Aspect candidate extraction
//!
//! Per sentence, tagged tokens with a keyword tag are unioned with the top
//! keyphrases from the keyphrase port, overlaps are resolved, and the result
//! becomes that sentence's candidate set.
//!
//! A sentence that yields nothing is attached to the most recent non-empty
//! candidate set (the review is assumed to still be talking about the same
//! thing). Sentences before the first keyworded sentence stay unattached.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::dedup::resolve_overlaps;
use crate::nlp::stopwords::StopwordFilter;
use crate::pipeline::errors::AnalysisError;
use crate::pipeline::spec::AspectSpec;
use crate::ports::{KeyphraseExtractor, PortKind};
use crate::types::{Candidate, OriginStrategy, Sentence};

/// Topic continuation state for the sentence loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TopicCarry {
    /// No sentence has produced candidates yet
    #[default]
    Idle,
    /// Candidate texts of the most recent keyworded sentence
    Active(Vec<String>),
}

impl TopicCarry {
    pub fn is_active(&self) -> bool {
        matches!(self, TopicCarry::Active(_))
    }
}

/// Extraction output for a whole document
#[derive(Debug, Clone, Default)]
pub struct AspectExtraction {
    /// Unique candidates in first-seen order
    pub candidates: Vec<Candidate>,
    /// Candidate texts extracted from each sentence (empty if none)
    pub per_sentence: Vec<Vec<String>>,
}

impl AspectExtraction {
    pub fn get(&self, text: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.text == text)
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Aspect-mode candidate extractor
#[derive(Debug, Clone)]
pub struct AspectExtractor {
    keyphrase_top_n: usize,
    max_keyphrase_chars: usize,
    stopwords: StopwordFilter,
}

impl Default for AspectExtractor {
    fn default() -> Self {
        Self::new(&AspectSpec::default())
    }
}

impl AspectExtractor {
    pub fn new(spec: &AspectSpec) -> Self {
        Self {
            keyphrase_top_n: spec.keyphrase_top_n,
            max_keyphrase_chars: spec.max_keyphrase_chars,
            stopwords: StopwordFilter::for_language(&spec.stopword_language),
        }
    }

    /// Replace the stopword filter
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Candidates for one tagged sentence, overlaps resolved
    pub fn sentence_candidates<K: KeyphraseExtractor>(
        &self,
        sentence: &Sentence,
        keyphrases: &K,
    ) -> Result<Vec<Candidate>, AnalysisError> {
        let mut spans: Vec<Candidate> = sentence
            .tokens
            .iter()
            .filter(|t| t.pos.is_aspect_keyword())
            .filter(|t| !self.stopwords.is_stopword(&t.text))
            .filter(|t| t.char_len() > 1)
            .map(|t| Candidate::new(t.text.clone(), OriginStrategy::Linguistic))
            .collect();

        let ranked = keyphrases
            .extract_keyphrases(&sentence.text, self.keyphrase_top_n)
            .map_err(|e| AnalysisError::port(PortKind::Keyphrase, e))?;
        spans.extend(
            ranked
                .into_iter()
                .take(self.keyphrase_top_n)
                .map(|k| k.phrase.trim().to_string())
                .filter(|p| !p.is_empty() && p.chars().count() <= self.max_keyphrase_chars)
                .map(|p| Candidate::new(p, OriginStrategy::Statistical)),
        );

        Ok(resolve_overlaps(spans)
            .into_iter()
            .map(|c| c.in_sentence(sentence.index))
            .collect())
    }

    /// Extract candidates for every sentence, applying topic carry-forward
    pub fn extract<K: KeyphraseExtractor>(
        &self,
        sentences: &[Sentence],
        keyphrases: &K,
    ) -> Result<AspectExtraction, AnalysisError> {
        let mut out = AspectExtraction::default();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        let mut carry = TopicCarry::Idle;

        for sentence in sentences {
            let found = self.sentence_candidates(sentence, keyphrases)?;
            let texts: Vec<String> = found.iter().map(|c| c.text.clone()).collect();
            debug!(sentence = %sentence.text, candidates = ?texts, "extracted");

            if found.is_empty() {
                if let TopicCarry::Active(topic) = &carry {
                    for text in topic {
                        if let Some(&slot) = index.get(text) {
                            out.candidates[slot].supporting_sentences.push(sentence.index);
                        }
                    }
                }
            } else {
                for candidate in found {
                    if !index.contains_key(&candidate.text) {
                        index.insert(candidate.text.clone(), out.candidates.len());
                        out.candidates.push(candidate);
                    }
                }
                carry = TopicCarry::Active(texts.clone());
            }
            out.per_sentence.push(texts);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::ScriptedKeyphrases;
    use crate::types::Token;

    fn sentence(index: usize, text: &str, tokens: &[(&str, &str)]) -> Sentence {
        Sentence::new(index, text)
            .with_tokens(tokens.iter().map(|(w, t)| Token::new(*w, *t)).collect())
    }

    #[test]
    fn test_token_filters() {
        let extractor = AspectExtractor::default();
        let kp = ScriptedKeyphrases::default();
        let s = sentence(
            0,
            "湯頭很棒可以",
            &[("湯頭", "Na"), ("很", "Dfa"), ("棒", "VH"), ("可以", "V"), ("魚", "Na")],
        );

        let cands = extractor.sentence_candidates(&s, &kp).unwrap();
        let texts: Vec<_> = cands.iter().map(|c| c.text.as_str()).collect();
        // 可以 is a stopword, 魚 is too short, 棒/很 have non-keyword tags
        assert_eq!(texts, vec!["湯頭"]);
        assert_eq!(cands[0].supporting_sentences, vec![0]);
    }

    #[test]
    fn test_keyphrases_merged_and_length_capped() {
        let extractor = AspectExtractor::default();
        let kp = ScriptedKeyphrases::new(&[("牛肉麵好吃", &["牛肉麵", "牛肉麵真的非常好吃"])]);
        let s = sentence(0, "牛肉麵好吃", &[("牛肉", "Na"), ("麵", "Na"), ("好吃", "VH")]);

        let cands = extractor.sentence_candidates(&s, &kp).unwrap();
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].text, "牛肉麵");
        assert_eq!(cands[0].origin, OriginStrategy::Statistical);
    }

    #[test]
    fn test_keyphrase_top_n_respected() {
        let extractor = AspectExtractor::default();
        let kp = ScriptedKeyphrases::new(&[("s", &["甲乙", "丙丁", "戊己"])]);
        let s = sentence(0, "s", &[]);

        let cands = extractor.sentence_candidates(&s, &kp).unwrap();
        assert_eq!(cands.len(), 2);
    }

    #[test]
    fn test_substring_dropped_within_sentence() {
        let extractor = AspectExtractor::default();
        let kp = ScriptedKeyphrases::new(&[("牛肉麵", &["牛肉麵"])]);
        let s = sentence(0, "牛肉麵", &[("牛肉", "Na")]);

        let cands = extractor.sentence_candidates(&s, &kp).unwrap();
        let texts: Vec<_> = cands.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["牛肉麵"]);
    }

    #[test]
    fn test_carry_forward_attaches_to_last_topic() {
        let extractor = AspectExtractor::default();
        let kp = ScriptedKeyphrases::default();
        let sentences = vec![
            sentence(0, "真的", &[("真的", "D")]),
            sentence(1, "湯頭濃郁", &[("湯頭", "Na")]),
            sentence(2, "真的", &[("真的", "D")]),
            sentence(3, "環境乾淨", &[("環境", "Na")]),
            sentence(4, "真的", &[("真的", "D")]),
        ];

        let out = extractor.extract(&sentences, &kp).unwrap();
        assert_eq!(out.candidates.len(), 2);
        assert_eq!(out.get("湯頭").unwrap().supporting_sentences, vec![1, 2]);
        assert_eq!(out.get("環境").unwrap().supporting_sentences, vec![3, 4]);
        assert!(out.per_sentence[0].is_empty());
    }

    #[test]
    fn test_no_attachment_before_first_topic() {
        let extractor = AspectExtractor::default();
        let kp = ScriptedKeyphrases::default();
        let sentences = vec![
            sentence(0, "真的", &[("真的", "D")]),
            sentence(1, "還好", &[("還好", "D")]),
        ];

        let out = extractor.extract(&sentences, &kp).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.per_sentence.len(), 2);
    }

    #[test]
    fn test_repeated_candidate_keeps_first_sentence() {
        let extractor = AspectExtractor::default();
        let kp = ScriptedKeyphrases::default();
        let sentences = vec![
            sentence(0, "湯頭濃郁", &[("湯頭", "Na")]),
            sentence(1, "湯頭偏鹹", &[("湯頭", "Na")]),
        ];

        let out = extractor.extract(&sentences, &kp).unwrap();
        assert_eq!(out.candidates.len(), 1);
        assert_eq!(out.candidates[0].supporting_sentences, vec![0]);
        assert_eq!(out.per_sentence[1], vec!["湯頭".to_string()]);
    }

    #[test]
    fn test_topic_carry_state() {
        assert!(!TopicCarry::default().is_active());
        assert!(TopicCarry::Active(vec!["湯頭".into()]).is_active());
    }
}
