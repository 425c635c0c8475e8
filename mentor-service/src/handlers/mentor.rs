use crate::error::AppError;
use crate::models::CareerMentorRequest;
use crate::startup::AppState;
use axum::{Json, extract::State};

/// POST /psychometrics/career-mentor
///
/// Returns the model's JSON reply verbatim on success. A reply that is not
/// syntactically valid JSON yields 400 with a fixed advisory; any provider
/// failure yields 500 with a generic message.
#[tracing::instrument(
    skip(state, payload),
    fields(age = payload.age, interest_count = payload.interests.len())
)]
pub async fn career_mentor(
    State(state): State<AppState>,
    Json(payload): Json<CareerMentorRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = state.mentor.run(&payload).await?;
    Ok(Json(result))
}
