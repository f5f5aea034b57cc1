use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::error::ApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware rejecting requests whose `X-API-Key` header does not carry the configured key
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match api_key {
        Some(key) if key == &*state.api_key => {}
        Some(_) => {
            warn!(path = %req.uri().path(), "rejected request with invalid API key");
            return Err(ApiError::Unauthorized("Invalid API key"));
        }
        None => return Err(ApiError::Unauthorized("Missing X-API-Key header")),
    }

    Ok(next.run(req).await)
}
