//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PlanCatalogReader` - Loads the plan catalog (file, HTTP, in-memory)
//! - `QuestionStore` - Question bank, answer statistics, and telemetry
//! - `QuizSessionRepository` - Saves and loads quiz sessions

mod plan_catalog_reader;
mod question_store;
mod quiz_session_repository;

pub use plan_catalog_reader::{CatalogError, PlanCatalogReader};
pub use question_store::{QuestionStore, QuestionStoreError};
pub use quiz_session_repository::{QuizSessionError, QuizSessionRepository};
