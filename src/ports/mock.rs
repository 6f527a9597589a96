//! In-memory ports for tests
//!
//! Deterministic stand-ins for the model services. Each mock counts its
//! calls so tests can assert that a run touched no port at all.

use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::FxHashMap;

use super::*;

/// Greedy longest-match segmenter over a fixed word list.
///
/// Characters not covered by the dictionary become single-character tokens
/// tagged `FW`.
#[derive(Debug, Default)]
pub struct DictTagger {
    words: FxHashMap<String, String>,
    max_word_chars: usize,
    calls: AtomicUsize,
}

impl DictTagger {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        let words: FxHashMap<String, String> = entries
            .iter()
            .map(|(w, t)| (w.to_string(), t.to_string()))
            .collect();
        let max_word_chars = words.keys().map(|w| w.chars().count()).max().unwrap_or(1);
        Self {
            words,
            max_word_chars,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn segment(&self, text: &str) -> TaggedText {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut tags = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            if chars[i].is_whitespace() {
                i += 1;
                continue;
            }
            let longest = (1..=self.max_word_chars.min(chars.len() - i))
                .rev()
                .find_map(|len| {
                    let word: String = chars[i..i + len].iter().collect();
                    self.words.get(&word).map(|tag| (word, tag.clone(), len))
                });
            match longest {
                Some((word, tag, len)) => {
                    tokens.push(word);
                    tags.push(tag);
                    i += len;
                }
                None => {
                    tokens.push(chars[i].to_string());
                    tags.push("FW".to_string());
                    i += 1;
                }
            }
        }
        TaggedText::new(tokens, tags)
    }
}

impl Tagger for DictTagger {
    fn tokenize_and_tag(&self, texts: &[&str]) -> Result<Vec<TaggedText>, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.segment(t)).collect())
    }
}

/// Keyphrases scripted per sentence
#[derive(Debug, Default)]
pub struct ScriptedKeyphrases {
    phrases: FxHashMap<String, Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedKeyphrases {
    pub fn new(entries: &[(&str, &[&str])]) -> Self {
        Self {
            phrases: entries
                .iter()
                .map(|(s, p)| (s.to_string(), p.iter().map(|x| x.to_string()).collect()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl KeyphraseExtractor for ScriptedKeyphrases {
    fn extract_keyphrases(&self, sentence: &str, top_n: usize) -> Result<Vec<Keyphrase>, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .phrases
            .get(sentence)
            .map(|list| {
                list.iter()
                    .take(top_n)
                    .enumerate()
                    .map(|(i, p)| Keyphrase {
                        phrase: p.clone(),
                        score: 0.9 - 0.1 * i as f64,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Entity spans returned for every text
#[derive(Debug, Default)]
pub struct ScriptedEntities {
    spans: Vec<EntitySpan>,
    calls: AtomicUsize,
}

impl ScriptedEntities {
    pub fn new(spans: &[(&str, &str)]) -> Self {
        Self {
            spans: spans
                .iter()
                .map(|(s, t)| EntitySpan {
                    span: s.to_string(),
                    entity_type: t.to_string(),
                })
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EntityRecognizer for ScriptedEntities {
    fn recognize_entities(&self, _text: &str) -> Result<Vec<EntitySpan>, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.spans.clone())
    }
}

/// Zero-shot classifier with scripted answers per text and a fallback answer
#[derive(Debug)]
pub struct ScriptedClassifier {
    answers: FxHashMap<String, (String, f64)>,
    fallback: (String, f64),
    calls: AtomicUsize,
    seen: std::sync::Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    pub fn new(answers: &[(&str, &str, f64)], fallback: (&str, f64)) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(text, label, score)| (text.to_string(), (label.to_string(), *score)))
                .collect(),
            fallback: (fallback.0.to_string(), fallback.1),
            calls: AtomicUsize::new(0),
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Texts classified so far, in call order
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn answer(&self, text: &str, labels: &[&str]) -> Vec<ScoredLabel> {
        let (label, score) = self.answers.get(text).unwrap_or(&self.fallback);
        let rest = (1.0 - score) / labels.len().max(2).saturating_sub(1) as f64;
        let mut ranked = vec![ScoredLabel::new(label.clone(), *score)];
        ranked.extend(
            labels
                .iter()
                .filter(|l| **l != label.as_str())
                .map(|l| ScoredLabel::new(*l, rest)),
        );
        ranked
    }
}

impl ZeroShotClassifier for ScriptedClassifier {
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<ScoredLabel>, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(text.to_string());
        }
        Ok(self.answer(text, labels))
    }
}

/// Sentiment model with scripted answers per sentence
#[derive(Debug)]
pub struct ScriptedSentiment {
    answers: FxHashMap<String, (String, f64)>,
    fallback: (String, f64),
    calls: AtomicUsize,
}

impl ScriptedSentiment {
    pub fn new(answers: &[(&str, &str, f64)], fallback: (&str, f64)) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(text, label, score)| (text.to_string(), (label.to_string(), *score)))
                .collect(),
            fallback: (fallback.0.to_string(), fallback.1),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SentimentModel for ScriptedSentiment {
    fn classify_sentiment(&self, text: &str, _labels: &[&str]) -> Result<Vec<ScoredLabel>, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (label, score) = self.answers.get(text).unwrap_or(&self.fallback);
        Ok(vec![ScoredLabel::new(label.clone(), *score)])
    }
}

/// A port that always fails
#[derive(Debug, Default)]
pub struct Unavailable;

impl Tagger for Unavailable {
    fn tokenize_and_tag(&self, _texts: &[&str]) -> Result<Vec<TaggedText>, PortError> {
        Err(PortError::new("tagger offline"))
    }
}

impl ZeroShotClassifier for Unavailable {
    fn classify(&self, _text: &str, _labels: &[&str]) -> Result<Vec<ScoredLabel>, PortError> {
        Err(PortError::new("classifier offline"))
    }
}

impl SentimentModel for Unavailable {
    fn classify_sentiment(&self, _text: &str, _labels: &[&str]) -> Result<Vec<ScoredLabel>, PortError> {
        Err(PortError::new("sentiment offline"))
    }
}
