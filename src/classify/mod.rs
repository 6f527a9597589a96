//! Candidate classification
//!
//! Aspect mode maps candidates onto the six-way category taxonomy through a
//! rule chain with model fallback. Preference mode makes a binary food
//! decision.

pub mod aspect;
pub mod food;

pub use aspect::{AspectClassifier, AssignmentMemo};
pub use food::{FoodClassifier, FoodRelatedness};
