//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - Plan catalog sources (JSON file, HTTP, in-memory)
//! - `questions` - Question bank and statistics (in-memory, YAML-seeded)
//! - `quiz` - Quiz session persistence (in-memory)

pub mod catalog;
pub mod questions;
pub mod quiz;

pub use catalog::{HttpCatalogConfig, HttpCatalogReader, InMemoryCatalogReader, JsonFileCatalogReader};
pub use questions::InMemoryQuestionStore;
pub use quiz::InMemoryQuizSessionRepository;
