//! Unified error types for lead intake.
//!
//! Only `RateLimited`, `InvalidInput`, `Unauthorized` and `Internal` ever
//! reach a caller. `PersistenceDegraded` is produced by storage sinks and
//! absorbed by the submission handler.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    FormType,
}

impl Field {
    /// Get the JSON key of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::FormType => "formType",
        }
    }

    /// Message shown to the caller. Never echoes the submitted value.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Name => "Name is required and must be at least 2 characters",
            Self::Email => "Please enter a valid email address",
            Self::Phone => "Please enter a valid phone number",
            Self::FormType => "Invalid form type",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for lead intake.
#[derive(Debug, Error)]
pub enum Error {
    /// Client exceeded the per-window request ceiling.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// A field failed validation.
    #[error("invalid {field}: {}", field.message())]
    InvalidInput { field: Field },

    /// Admin listing without a matching key.
    #[error("unauthorized")]
    Unauthorized,

    /// External store write failed or timed out.
    #[error("persistence degraded: {0}")]
    PersistenceDegraded(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn invalid(field: Field) -> Self {
        Self::InvalidInput { field }
    }

    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn degraded(msg: impl Into<String>) -> Self {
        Self::PersistenceDegraded(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::RateLimited { .. } => 429,
            Self::InvalidInput { .. } => 400,
            Self::Unauthorized => 401,
            Self::PersistenceDegraded(_) => 500,
            Self::Serialization(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "Too many requests. Please try again in a minute.",
            Self::InvalidInput { field } => field.message(),
            Self::Unauthorized => "Unauthorized",
            _ => "An error occurred. Please try again.",
        }
    }
}
