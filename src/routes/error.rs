use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::error::EvaluationError;
use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Repository(RepositoryError::FlagNotFound(_))
            | Self::Repository(RepositoryError::EnvironmentNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Repository(RepositoryError::FlagExists(_)) => StatusCode::CONFLICT,
            Self::Repository(RepositoryError::Poisoned(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Evaluation(EvaluationError::NoVariationsAvailable { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
