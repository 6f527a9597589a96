//! Natural Language Processing components
//!
//! Sentence segmentation, stopword filtering, lexicon matching, text cleanup
//! and the curated review vocabulary.

pub mod lexicon;
pub mod normalize;
pub mod segmenter;
pub mod stopwords;
pub mod vocab;
