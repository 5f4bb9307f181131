//! plan-advisor command line entry point.
//!
//! `plan-advisor <preferences.json>` prints ranked recommendations as JSON.
//! `plan-advisor questions` recomputes question power over the catalog and
//! prints the question bank, most discriminating first.

use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use plan_advisor::adapters::{
    HttpCatalogConfig, HttpCatalogReader, InMemoryQuestionStore, JsonFileCatalogReader,
};
use plan_advisor::application::{
    QuizHandlerError, RecommendPlansCommand, RecommendPlansError, RecommendPlansHandler,
    RefreshQuestionPowerHandler,
};
use plan_advisor::config::{
    AppConfig, CatalogConfig, CatalogSource, ConfigError, LoggingConfig, QuizConfig, ScoringConfig,
};
use plan_advisor::domain::foundation::ValidationError;
use plan_advisor::domain::preferences::UserPreferences;
use plan_advisor::domain::recommendation::{RecommendationEngine, TieBreakResolver, WeightTable};
use plan_advisor::ports::{CatalogError, PlanCatalogReader, QuestionStore, QuestionStoreError};

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: plan-advisor <preferences.json> | plan-advisor questions")]
    Usage,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Questions(#[from] QuestionStoreError),

    #[error(transparent)]
    Recommend(#[from] RecommendPlansError),

    #[error(transparent)]
    Quiz(#[from] QuizHandlerError),

    #[error("Failed to write output: {0}")]
    Output(serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CliError> {
    let arg = std::env::args().nth(1).ok_or(CliError::Usage)?;

    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    init_tracing(&config.logging)?;

    let weights = Arc::new(load_weight_table(&config.scoring).await?);
    let catalog = catalog_reader(&config.catalog)?;
    info!(
        weight_table = weights.version(),
        catalog_source = ?config.catalog.source,
        "Plan advisor ready"
    );

    if arg == "questions" {
        return print_questions(&config.quiz, catalog, weights).await;
    }

    let raw = read_file(&arg).await?;
    let value: serde_json::Value = serde_json::from_str(&raw).map_err(|source| CliError::Json {
        path: arg.clone(),
        source,
    })?;
    let preferences = UserPreferences::from_json(&value)?;
    debug!(answered = preferences.answered_count(), "Preferences loaded");

    let engine = RecommendationEngine::new(
        weights.as_ref().clone(),
        TieBreakResolver::new(config.scoring.closeness_threshold),
    );
    let handler = RecommendPlansHandler::new(catalog, Arc::new(engine), config.scoring.top_n)
        .with_elimination_logging(config.features.log_eliminations);
    let result = handler.handle(RecommendPlansCommand::new(preferences)).await?;

    print_json(&result.recommendations)
}

async fn print_questions(
    quiz: &QuizConfig,
    catalog: Arc<dyn PlanCatalogReader>,
    weights: Arc<WeightTable>,
) -> Result<(), CliError> {
    let store = match &quiz.question_bank_path {
        Some(path) => InMemoryQuestionStore::from_yaml(&read_file(path).await?)?,
        None => InMemoryQuestionStore::standard()?,
    };
    let store = Arc::new(store);

    RefreshQuestionPowerHandler::new(store.clone(), catalog, weights)
        .handle()
        .await?;

    let mut questions = store.list_questions().await?;
    questions.sort_by(|a, b| b.discriminative_power().total_cmp(&a.discriminative_power()));
    print_json(&questions)
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), CliError> {
    let filter = logging.env_filter().map_err(ConfigError::from)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.use_json() {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

async fn load_weight_table(scoring: &ScoringConfig) -> Result<WeightTable, CliError> {
    match &scoring.weight_table_path {
        Some(path) => Ok(WeightTable::from_yaml(&read_file(path).await?)?),
        None => Ok(WeightTable::standard().clone()),
    }
}

fn catalog_reader(catalog: &CatalogConfig) -> Result<Arc<dyn PlanCatalogReader>, CliError> {
    match catalog.source {
        CatalogSource::File => Ok(Arc::new(JsonFileCatalogReader::new(&catalog.path))),
        CatalogSource::Http => {
            // validate() guarantees a URL for the HTTP source
            let url = catalog.url.clone().unwrap_or_default();
            let reader = HttpCatalogReader::new(HttpCatalogConfig::new(url).with_timeout(catalog.timeout()))?;
            Ok(Arc::new(reader))
        }
    }
}

async fn read_file(path: &str) -> Result<String, CliError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.to_string(),
            source,
        })
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let output = serde_json::to_string_pretty(value).map_err(CliError::Output)?;
    println!("{output}");
    Ok(())
}
