//! Integration tests for the quiz-to-recommendation flow.
//!
//! These tests drive the handlers end to end:
//! 1. A JSON plan catalog is read from disk
//! 2. Question power is recomputed from that catalog
//! 3. A quiz is started and answered until it stops
//! 4. The collected preferences are ranked into recommendations
//!
//! Uses the file catalog adapter and in-memory stores.

use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

use plan_advisor::adapters::{InMemoryQuestionStore, InMemoryQuizSessionRepository, JsonFileCatalogReader};
use plan_advisor::application::{
    AnswerQuestionCommand, AnswerQuestionHandler, QuizHandlerConfig, RecommendPlansCommand,
    RecommendPlansHandler, RefreshQuestionPowerHandler, StartQuizHandler,
};
use plan_advisor::domain::foundation::{ErrorCode, QuizStatus};
use plan_advisor::domain::preferences::{PreferenceKey, UserPreferences};
use plan_advisor::domain::recommendation::{RecommendationEngine, WeightTable};
use plan_advisor::ports::{PlanCatalogReader, QuestionStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

const CATALOG: &str = r#"[
    {"planId": "vhi-advance", "insurer": "VHI", "planName": "Health Advance", "planTier": "HIGH",
     "hospitalCover": "PRIVATE", "outpatientCover": true, "gpVisits": true, "maternityCover": true,
     "mentalHealthCover": true, "overseasEmergency": true, "dentalCover": false,
     "opticalCover": true, "physiotherapy": true, "consultantChoice": true},
    {"planId": "laya-connect", "insurer": "LAYA", "planName": "Connect Plus", "planTier": "MID",
     "hospitalCover": "SEMI_PRIVATE", "outpatientCover": true, "gpVisits": true, "maternityCover": false,
     "mentalHealthCover": true, "overseasEmergency": true, "dentalCover": true,
     "opticalCover": true, "physiotherapy": true, "consultantChoice": false},
    {"planId": "ilh-4d", "insurer": "IRISH_LIFE", "planName": "4D Health", "planTier": "PREMIUM",
     "hospitalCover": "HI_TECH", "outpatientCover": true, "maternityCover": true,
     "overseasEmergency": true, "dentalCover": true, "consultantChoice": true},
    {"planId": "level-basic", "insurer": "LEVEL", "planName": "Level Basic", "planTier": "BASIC",
     "hospitalCover": "PUBLIC", "outpatientCover": false, "gpVisits": false, "maternityCover": false,
     "mentalHealthCover": false, "overseasEmergency": false, "dentalCover": false,
     "opticalCover": false, "physiotherapy": false, "consultantChoice": false},
    {"planId": "vhi-unverified", "insurer": "VHI", "planName": "Unverified Plan", "planTier": "MID"}
]"#;

struct App {
    _dir: TempDir,
    store: Arc<InMemoryQuestionStore>,
    refresh: RefreshQuestionPowerHandler,
    start: StartQuizHandler,
    answer: AnswerQuestionHandler,
    recommend: RecommendPlansHandler,
}

async fn app(config: QuizHandlerConfig) -> App {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plans.json");
    tokio::fs::write(&path, CATALOG).await.unwrap();

    let catalog: Arc<dyn PlanCatalogReader> = Arc::new(JsonFileCatalogReader::new(&path));
    let store = Arc::new(InMemoryQuestionStore::standard().unwrap());
    let sessions = Arc::new(InMemoryQuizSessionRepository::new());
    let weights = Arc::new(WeightTable::standard().clone());

    App {
        refresh: RefreshQuestionPowerHandler::new(store.clone(), catalog.clone(), weights.clone()),
        start: StartQuizHandler::new(
            store.clone(),
            sessions.clone(),
            catalog.clone(),
            weights.clone(),
            config,
        ),
        answer: AnswerQuestionHandler::new(store.clone(), sessions, catalog.clone(), weights, config),
        recommend: RecommendPlansHandler::new(catalog, Arc::new(RecommendationEngine::default()), 5),
        store,
        _dir: dir,
    }
}

/// A user who wants private hospital, outpatient and maternity cover, and
/// nothing else in particular.
fn answer_for(key: PreferenceKey) -> Value {
    match key {
        PreferenceKey::HospitalCoverLevel => json!("PRIVATE"),
        PreferenceKey::OutpatientNeeded | PreferenceKey::MaternityNeeded => json!(true),
        PreferenceKey::DentalNeeded => Value::Null,
        _ => json!(false),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn quiz_answers_feed_recommendations() {
    let app = app(QuizHandlerConfig {
        min_plans_remaining: 0,
        ..QuizHandlerConfig::default()
    })
    .await;

    let refreshed = app.refresh.handle().await.unwrap();
    assert_eq!(refreshed.questions_refreshed, app.store.question_count().await);

    let started = app.start.handle().await.unwrap();
    assert_eq!(started.status, QuizStatus::InProgress);

    let mut next = started.next_question;
    let mut preferences = UserPreferences::new();
    let mut rounds = 0;
    while let Some(question) = next {
        rounds += 1;
        let result = app
            .answer
            .handle(AnswerQuestionCommand::new(
                started.session_id,
                question.question_key,
                answer_for(question.question_key),
            ))
            .await
            .unwrap();
        preferences = result.preferences;
        next = result.next_question;
        if next.is_none() {
            assert_eq!(result.status, QuizStatus::Complete);
        }
    }

    // Every question in the bank is asked once.
    assert_eq!(rounds, 10);
    assert!(!preferences.is_answered(PreferenceKey::DentalNeeded));

    let result = app
        .recommend
        .handle(RecommendPlansCommand::new(preferences))
        .await
        .unwrap();

    let eliminated: Vec<_> = result.eliminated.iter().map(|e| e.plan_id.as_str()).collect();
    assert_eq!(eliminated, vec!["laya-connect", "level-basic"]);

    let ranked: Vec<_> = result
        .recommendations
        .iter()
        .map(|r| r.plan.plan_id().as_str())
        .collect();
    assert_eq!(ranked, vec!["vhi-advance", "ilh-4d", "vhi-unverified"]);

    let top = &result.recommendations[0];
    assert_eq!(top.relative_score.value(), 100);
    assert!(!top.verification_needed);
    assert!(top.trade_off_vs_runner_up.is_some());

    let unverified = &result.recommendations[2];
    assert!(unverified.verification_needed);
    assert_eq!(unverified.raw_score, 0.0);
}

#[tokio::test]
async fn quiz_stops_once_few_plans_survive() {
    let app = app(QuizHandlerConfig {
        min_plans_remaining: 3,
        ..QuizHandlerConfig::default()
    })
    .await;
    let started = app.start.handle().await.unwrap();

    let first = app
        .answer
        .handle(AnswerQuestionCommand::new(
            started.session_id,
            PreferenceKey::OutpatientNeeded,
            json!(true),
        ))
        .await
        .unwrap();
    assert_eq!(first.plans_remaining, 4);
    assert_eq!(first.status, QuizStatus::InProgress);

    let second = app
        .answer
        .handle(AnswerQuestionCommand::new(
            started.session_id,
            PreferenceKey::MaternityNeeded,
            json!(true),
        ))
        .await
        .unwrap();
    assert_eq!(second.plans_remaining, 3);
    assert_eq!(second.status, QuizStatus::Complete);
    assert!(second.next_question.is_none());

    let err = app
        .answer
        .handle(AnswerQuestionCommand::new(
            started.session_id,
            PreferenceKey::DentalNeeded,
            json!(true),
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::QuizComplete);
}

#[tokio::test]
async fn impressions_and_responses_are_tracked() {
    let app = app(QuizHandlerConfig::default()).await;
    let started = app.start.handle().await.unwrap();
    let first = started.next_question.unwrap();

    app.answer
        .handle(AnswerQuestionCommand::new(
            started.session_id,
            first.question_key,
            answer_for(first.question_key),
        ))
        .await
        .unwrap();

    let telemetry = app.store.telemetry().await.unwrap();
    let stats = telemetry[&first.question_key];
    assert_eq!(stats.impressions, 1);
    let expected_responses = if answer_for(first.question_key).is_null() { 0 } else { 1 };
    assert_eq!(stats.responses, expected_responses);
}
