use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, warn};

use super::{ClientFlagsResponse, EvaluateRequest, EvaluateResponse};
use crate::analytics::EvaluationEvent;
use crate::evaluation::evaluate as evaluate_flag;
use crate::routes::error::ApiError;
use crate::routes::extract::JsonBody;
use crate::state::AppState;

/// Evaluate every flag for one caller context.
///
/// Takes one snapshot of the flag set up front, so a concurrent write never
/// shows up halfway through the batch. A flag that cannot be evaluated is
/// left out of the response rather than failing the whole batch.
pub async fn evaluate(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<EvaluateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let EvaluateRequest {
        environment,
        context,
    } = request;

    let flags = state.flags.list_flags()?;
    let mut results = BTreeMap::new();

    for flag in &flags {
        let started = Instant::now();
        let result = match evaluate_flag(&flag.definition, &context) {
            Ok(result) => result,
            Err(e) => {
                warn!(flag_key = %flag.definition.key, error = %e, "skipping flag in batch evaluation");
                continue;
            }
        };

        state.sink.record(&EvaluationEvent {
            result: &result,
            context: &context,
            environment: environment.as_deref(),
            elapsed: started.elapsed(),
        });

        results.insert(result.flag_key.clone(), result);
    }

    Ok(Json(EvaluateResponse { flags: results }))
}

/// All flag definitions, for SDKs that evaluate on the client side.
pub async fn client_flags(
    State(state): State<AppState>,
    Path(environment_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(environment_id = %environment_id, "serving client flags");

    Ok(Json(ClientFlagsResponse {
        flags: state.flags.list_flags()?,
    }))
}
