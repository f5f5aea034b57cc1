use axum::extract::{rejection::JsonRejection, FromRequest, Request};

use super::error::ApiError;

/// JSON request body whose rejections go through [`ApiError`], so a malformed
/// or invalid body gets a 400 with an `{"error": ...}` body.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
