//! Candidate span extraction
//!
//! Aspect-mode extraction with topic carry-forward, preference-mode food
//! chunking, and overlap resolution shared by both.

pub mod chunker;
pub mod dedup;
pub mod extraction;

pub use chunker::{FoodCandidates, FoodChunker, WindowShape};
pub use extraction::{AspectExtraction, AspectExtractor, TopicCarry};
