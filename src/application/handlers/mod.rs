//! Application handlers.
//!
//! Command handlers that load through the ports and hand off to the domain.

pub mod quiz;
pub mod recommendation;

pub use quiz::{
    AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult, QuizHandlerConfig,
    QuizHandlerError, RefreshQuestionPowerHandler, RefreshQuestionPowerResult, StartQuizHandler,
    StartQuizResult,
};
pub use recommendation::{
    RecommendPlansCommand, RecommendPlansError, RecommendPlansHandler, RecommendPlansResult,
};
