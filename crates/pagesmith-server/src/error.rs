//! HTTP error mapping.
//!
//! Every handler error is logged server-side with its full detail and
//! reported to the client as a short `{error}` body; internal messages and
//! upstream payloads never cross the boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use pagesmith_core::PagesmithError;

/// Wrapper turning a [`PagesmithError`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub PagesmithError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PagesmithError::Validation(_) => StatusCode::BAD_REQUEST,
            PagesmithError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> String {
        match &self.0 {
            // Validation messages are written for users and safe to return.
            PagesmithError::Validation(message) => message.clone(),
            other => other.public_message().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "request failed");
        (self.status(), Json(json!({ "error": self.body() }))).into_response()
    }
}

impl From<PagesmithError> for ApiError {
    fn from(err: PagesmithError) -> Self {
        Self(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(PagesmithError::from(err))
    }
}
