use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use byline_core::error::BylineError;

// ---------------------------------------------------------------------------
// Internal sentinels for explicit status codes
// ---------------------------------------------------------------------------

/// Carries an explicit HTTP 403 through the `anyhow::Error` chain.
#[derive(Debug)]
struct ForbiddenError(String);

impl std::fmt::Display for ForbiddenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ForbiddenError {}

/// Carries an explicit HTTP 400 through the `anyhow::Error` chain.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self(ForbiddenError(msg.into()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(e) = self.0.downcast_ref::<ForbiddenError>() {
            let body = serde_json::json!({ "error": e.0.clone() });
            return (StatusCode::FORBIDDEN, axum::Json(body)).into_response();
        }
        if let Some(e) = self.0.downcast_ref::<BadRequestError>() {
            let body = serde_json::json!({ "error": e.0.clone() });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<BylineError>() {
            match e {
                BylineError::NotInitialized => StatusCode::BAD_REQUEST,
                BylineError::WriterNotFound(_) | BylineError::AgreementNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                BylineError::WriterExists(_) => StatusCode::CONFLICT,
                BylineError::InvalidSlug(_)
                | BylineError::InvalidOnboardingState(_)
                | BylineError::InvalidProfile(_) => StatusCode::BAD_REQUEST,
                BylineError::AgreementRejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                BylineError::Io(_) | BylineError::Yaml(_) | BylineError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
