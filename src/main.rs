//! National Park visitor survey backend
//!
//! Accepts survey submissions over a small REST API, stores them in SQLite and
//! exports them to a template-headed CSV for statistical analysis.

mod api;
mod args;
mod codec;
mod config;
mod db;
mod errors;
mod export;
mod forms;
mod models;
mod schema;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use args::{Args, Command};
use config::Config;
use db::Repository;
use export::{BatchExporter, DisplayResolver};
use forms::SubmissionForm;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub form: Arc<SubmissionForm>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A broken schema must stop us before anything is served or exported
    let schema = Arc::new(schema::national_park_survey().map_err(|e| {
        tracing::error!("Invalid survey schema: {}", e);
        e
    })?);
    tracing::info!("Survey schema loaded with {} slots", schema.slots().len());
    tracing::info!("Database path: {:?}", config.db_path);

    let pool = db::init_database(&config.db_path, &schema).await?;
    let repo = Arc::new(Repository::new(pool, schema.clone()));

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, repo, schema).await,
        Command::Export {
            template,
            output,
            template_rows,
            metadata_columns,
            label_separator,
        } => {
            let mut exporter = BatchExporter::new(
                template.unwrap_or_else(|| config.export_template.clone()),
                output.unwrap_or_else(|| config.export_output.clone()),
            )
            .with_template_rows(template_rows.unwrap_or(config.template_rows));
            if let Some(columns) = metadata_columns {
                exporter = exporter.with_placeholder_columns(columns);
            }
            if let Some(separator) = label_separator {
                exporter = exporter.with_resolver(DisplayResolver::with_separator(separator));
            }

            match exporter.run(&repo).await {
                Ok(summary) => {
                    tracing::info!("Export written to {}", summary.output_path.display());
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("Export failed: {}", e);
                    Err(e.into())
                }
            }
        }
    }
}

async fn serve(
    config: &Config,
    repo: Arc<Repository>,
    schema: Arc<schema::SurveySchema>,
) -> Result<(), Box<dyn std::error::Error>> {
    let stored = repo.count_records().await?;
    tracing::info!("{} survey responses stored so far", stored);

    let state = AppState {
        repo,
        form: Arc::new(SubmissionForm::new(schema)),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/survey", post(api::submit_survey))
        .route("/park/survey", post(api::submit_survey))
        .route("/survey/schema", get(api::get_schema));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
