//! Quiz handlers.
//!
//! Start a quiz, answer its questions, and keep stored question power in
//! step with the catalog.

mod answer_question;
mod error;
mod handler_config;
mod refresh_question_power;
mod start_quiz;

pub use answer_question::{AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult};
pub use error::QuizHandlerError;
pub use handler_config::QuizHandlerConfig;
pub use refresh_question_power::{RefreshQuestionPowerHandler, RefreshQuestionPowerResult};
pub use start_quiz::{StartQuizHandler, StartQuizResult};
