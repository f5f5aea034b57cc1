use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

use super::{validate_flag_key, DeleteFlagResponse, EvaluateQuery};
use crate::analytics::EvaluationEvent;
use crate::evaluation::{evaluate as evaluate_flag, EvaluationContext, FlagDefinition};
use crate::routes::error::ApiError;
use crate::routes::extract::JsonBody;
use crate::state::AppState;

/// Create a new feature flag
pub async fn create(
    State(state): State<AppState>,
    JsonBody(mut payload): JsonBody<FlagDefinition>,
) -> Result<impl IntoResponse, ApiError> {
    validate_flag_key(&payload.key).map_err(ApiError::BadRequest)?;

    if payload.id.is_empty() {
        payload.id = Uuid::new_v4().to_string();
    }

    let record = state.flags.create_flag(payload)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List all flags
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.flags.list_flags()?))
}

/// Get a single flag by key
pub async fn get(
    State(state): State<AppState>,
    Path(flag_key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.flags.get_flag(&flag_key)?))
}

/// Replace a flag. The key in the path wins over the one in the body.
pub async fn update(
    State(state): State<AppState>,
    Path(flag_key): Path<String>,
    JsonBody(mut payload): JsonBody<FlagDefinition>,
) -> Result<impl IntoResponse, ApiError> {
    payload.key = flag_key;

    if payload.id.is_empty() {
        payload.id = state.flags.get_flag(&payload.key)?.definition.id.clone();
    }

    Ok(Json(state.flags.update_flag(payload)?))
}

/// Delete a flag
pub async fn delete(
    State(state): State<AppState>,
    Path(flag_key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.flags.delete_flag(&flag_key)?;

    Ok(Json(DeleteFlagResponse {
        message: format!("Flag {flag_key} deleted"),
    }))
}

/// Evaluate one flag for the caller context in the body
pub async fn evaluate(
    State(state): State<AppState>,
    Path(flag_key): Path<String>,
    Query(query): Query<EvaluateQuery>,
    JsonBody(context): JsonBody<EvaluationContext>,
) -> Result<impl IntoResponse, ApiError> {
    let flag = state.flags.get_flag(&flag_key)?;

    let started = Instant::now();
    let result = evaluate_flag(&flag.definition, &context)?;
    let elapsed = started.elapsed();

    debug!(
        flag_key = %result.flag_key,
        reason = %result.reason,
        elapsed_us = elapsed.as_micros() as u64,
        "evaluation finished"
    );

    state.sink.record(&EvaluationEvent {
        result: &result,
        context: &context,
        environment: query.environment.as_deref(),
        elapsed,
    });

    Ok(Json(result))
}
