//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! All I/O is awaited here; the domain below it is synchronous.

pub mod handlers;

pub use handlers::{
    // Quiz handlers
    AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult, QuizHandlerConfig,
    QuizHandlerError, RefreshQuestionPowerHandler, RefreshQuestionPowerResult, StartQuizHandler,
    StartQuizResult,
    // Recommendation handlers
    RecommendPlansCommand, RecommendPlansError, RecommendPlansHandler, RecommendPlansResult,
};
