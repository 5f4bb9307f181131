//! QuizStatus enum for tracking the lifecycle of a quiz session.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a preference quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizStatus {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

impl QuizStatus {
    /// Returns true if answers may still be recorded.
    pub fn accepts_answers(&self) -> bool {
        matches!(self, QuizStatus::InProgress)
    }
}

impl StateMachine for QuizStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use QuizStatus::*;
        match self {
            NotStarted => vec![InProgress],
            InProgress => vec![Complete],
            Complete => vec![],
        }
    }
}

impl fmt::Display for QuizStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuizStatus::NotStarted => "Not started",
            QuizStatus::InProgress => "In progress",
            QuizStatus::Complete => "Complete",
        };
        write!(f, "{}", s)
    }
}
