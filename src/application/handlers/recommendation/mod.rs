//! Recommendation handlers.

mod recommend_plans;

pub use recommend_plans::{
    RecommendPlansCommand, RecommendPlansError, RecommendPlansHandler, RecommendPlansResult,
};
