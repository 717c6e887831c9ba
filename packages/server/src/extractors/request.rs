use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

fn reject(source: &str, detail: String) -> AppError {
    tracing::debug!(source, "Rejected request: {}", detail);
    AppError::Validation(detail)
}

/// A `Json<T>` wrapper that reports malformed or incomplete bodies as
/// `VALIDATION_ERROR` instead of axum's plain-text rejection.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| reject("body", e.body_text()))?;
        Ok(AppJson(value))
    }
}

/// A `Path<T>` wrapper with the same treatment, so `/reviews/abc` is a 400
/// with a JSON body rather than a bare text response.
pub struct AppPath<T>(pub T);

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| reject("path", e.body_text()))?;
        Ok(AppPath(value))
    }
}
