//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the plan advisor domain.

mod errors;
mod ids;
mod percentage;
mod quiz_status;
mod state_machine;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{PlanId, QuizSessionId};
pub use percentage::Percentage;
pub use quiz_status::QuizStatus;
pub use state_machine::StateMachine;
