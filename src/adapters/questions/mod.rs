//! Question Store Adapters
//!
//! - **InMemoryQuestionStore** - Question bank and statistics in memory, seedable from YAML

mod in_memory_question_store;

pub use in_memory_question_store::InMemoryQuestionStore;
