//! Quiz Session Adapters
//!
//! - **InMemoryQuizSessionRepository** - Quiz sessions in memory

mod in_memory_quiz_session_repository;

pub use in_memory_quiz_session_repository::InMemoryQuizSessionRepository;
