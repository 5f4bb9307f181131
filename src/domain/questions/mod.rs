//! Questions Module - Adaptive preference quiz.
//!
//! # Components
//!
//! - `Question` - A quiz question keyed by the preference it fills in
//! - `DiscriminativePowerCalculator` - Answer and question power over a plan population
//! - `AdaptiveQuestionRanker` - Power, popularity, live information gain, and friction
//! - `QuizSession` - NOT_STARTED -> IN_PROGRESS -> COMPLETE quiz aggregate
//!
//! Stored power is only ever recomputed from answer statistics; it is never
//! edited by hand.

mod adaptive_ranker;
mod discriminative_power;
mod question;
mod quiz_session;

pub use adaptive_ranker::{AdaptiveQuestionRanker, NextQuestion, QuestionTelemetry, RankingContext};
pub use discriminative_power::DiscriminativePowerCalculator;
pub use question::{AnswerOption, Question, QuestionAnswerStat, QuestionType};
pub use quiz_session::QuizSession;
