//! Survey API endpoints.

use axum::{extract::State, Json};
use serde_json::Value;

use super::{ApiResponse, ApiResult};
use crate::errors::AppError;
use crate::models::{SchemaView, SubmissionReceipt};
use crate::AppState;

/// Notification shown to the respondent once their answers are stored.
pub const SUBMITTED_MESSAGE: &str = "Survey submitted successfully.";

/// GET /api/survey/schema - Describe the form.
pub async fn get_schema(State(state): State<AppState>) -> ApiResult<SchemaView> {
    let view = SchemaView::new(state.form.schema(), state.form.all_optional());
    Ok(ApiResponse::new(view))
}

/// POST /api/survey - Submit one response.
pub async fn submit_survey(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<SubmissionReceipt> {
    let Value::Object(fields) = payload else {
        return Err(AppError::BadRequest(
            "Submission must be a JSON object".to_string(),
        ));
    };

    let record = state.form.bind(&fields).map_err(|errors| {
        tracing::info!("Rejected submission with {} invalid fields", errors.len());
        AppError::Validation(errors)
    })?;

    let stored = state.repo.create_record(&record).await?;

    Ok(ApiResponse::new(SubmissionReceipt {
        id: stored.id,
        created_at: stored.created_at,
    })
    .with_message(SUBMITTED_MESSAGE))
}
