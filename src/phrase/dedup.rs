//! Candidate overlap resolution
//!
//! Within one sentence, a span that is a proper substring of another span is
//! dropped (the longer, more specific span wins). Survivors are then
//! de-duplicated by text, keeping the first occurrence.

use rustc_hash::FxHashSet;

use crate::types::Candidate;

/// Drop contained spans, then de-duplicate preserving first-seen order
pub fn resolve_overlaps(spans: Vec<Candidate>) -> Vec<Candidate> {
    let texts: Vec<String> = spans.iter().map(|c| c.text.clone()).collect();

    let mut seen = FxHashSet::default();
    spans
        .into_iter()
        .filter(|c| !is_contained(&c.text, &texts))
        .filter(|c| seen.insert(c.text.clone()))
        .collect()
}

/// Order-preserving de-duplication by text (no containment check)
pub fn dedup_by_text(spans: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = FxHashSet::default();
    spans
        .into_iter()
        .filter(|c| seen.insert(c.text.clone()))
        .collect()
}

fn is_contained(text: &str, others: &[String]) -> bool {
    others
        .iter()
        .any(|other| other.as_str() != text && other.contains(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OriginStrategy;

    fn spans(texts: &[&str]) -> Vec<Candidate> {
        texts
            .iter()
            .map(|t| Candidate::new(*t, OriginStrategy::Linguistic))
            .collect()
    }

    fn texts(cands: &[Candidate]) -> Vec<&str> {
        cands.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_longer_span_wins() {
        let out = resolve_overlaps(spans(&["牛肉", "牛肉麵"]));
        assert_eq!(texts(&out), vec!["牛肉麵"]);
    }

    #[test]
    fn test_order_preserved_and_duplicates_removed() {
        let out = resolve_overlaps(spans(&["湯頭", "服務生", "湯頭", "價格"]));
        assert_eq!(texts(&out), vec!["湯頭", "服務生", "價格"]);
    }

    #[test]
    fn test_identical_spans_do_not_eliminate_each_other() {
        let out = resolve_overlaps(spans(&["火鍋", "火鍋"]));
        assert_eq!(texts(&out), vec!["火鍋"]);
    }

    #[test]
    fn test_first_origin_kept() {
        let mut input = spans(&["湯頭"]);
        input.push(Candidate::new("湯頭", OriginStrategy::Statistical));
        let out = resolve_overlaps(input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].origin, OriginStrategy::Linguistic);
    }

    #[test]
    fn test_nested_chain_keeps_outermost() {
        let out = resolve_overlaps(spans(&["麵", "牛肉麵", "紅燒牛肉麵"]));
        assert_eq!(texts(&out), vec!["紅燒牛肉麵"]);
    }

    #[test]
    fn test_dedup_by_text_keeps_substrings() {
        let out = dedup_by_text(spans(&["牛肉", "牛肉麵", "牛肉"]));
        assert_eq!(texts(&out), vec!["牛肉", "牛肉麵"]);
    }

    #[test]
    fn test_empty() {
        assert!(resolve_overlaps(Vec::new()).is_empty());
    }
}
