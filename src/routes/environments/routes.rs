use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

use super::validate_environment_name;
use crate::repository::Environment;
use crate::routes::error::ApiError;
use crate::routes::extract::JsonBody;
use crate::state::AppState;

/// Create (or replace) an environment
pub async fn create(
    State(state): State<AppState>,
    JsonBody(mut payload): JsonBody<Environment>,
) -> Result<impl IntoResponse, ApiError> {
    validate_environment_name(&payload.name).map_err(ApiError::BadRequest)?;

    if payload.id.is_empty() {
        payload.id = Uuid::new_v4().to_string();
    }

    let environment = state.environments.put_environment(payload)?;
    Ok((StatusCode::CREATED, Json(environment)))
}

/// List all environments
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.environments.list_environments()?))
}
