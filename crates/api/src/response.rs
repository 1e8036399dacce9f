//! Standardized API responses.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lead_core::Submission;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Confirmation shown after a successful submission.
pub const SUBMIT_SUCCESS_MESSAGE: &str =
    "Your inquiry has been received. Our team will contact you shortly.";

/// Error text for unreadable bodies.
const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Error text for bodies over the size limit.
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Success response for a submission.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub submission_id: String,
}

impl SubmitResponse {
    pub fn accepted(submission_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: SUBMIT_SUCCESS_MESSAGE.to_string(),
            submission_id: submission_id.into(),
        }
    }
}

/// Admin listing response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    /// Total records held, not the length of `submissions`
    pub count: usize,
    pub submissions: Vec<Submission>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub persistence_configured: bool,
    pub persistence_healthy: bool,
    pub stored_submissions: usize,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// API error carrying only caller-safe text.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
    pub retry_after: Option<u64>,
}

impl ApiError {
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody::new(msg),
            retry_after: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();

        // Add Retry-After header for rate limit responses
        if let Some(retry_after) = self.retry_after {
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert("Retry-After", value);
            }
        }

        response
    }
}

impl From<lead_core::Error> for ApiError {
    fn from(err: lead_core::Error) -> Self {
        use lead_core::Error;

        let status = StatusCode::from_u16(err.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %err, "Request failed");
        }

        let retry_after = match &err {
            Error::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        };

        Self {
            status,
            body: ErrorBody::new(err.public_message()),
            retry_after,
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        let status = rejection.status();
        warn!(status = %status, reason = %rejection.body_text(), "Request body rejected");

        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::new(status, BODY_TOO_LARGE_MESSAGE)
        } else {
            Self::new(status, GENERIC_ERROR_MESSAGE)
        }
    }
}
