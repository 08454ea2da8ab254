//! Uniform outcome of every data-access operation.
//!
//! # Design
//! A tagged enum instead of a `success` flag next to optional fields: a
//! response is either a success (optional payload plus a message) or a
//! failure (an `ApiError` whose `Display` is the error string), never both
//! and never neither.

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    Success { data: Option<T>, message: String },
    Failure { error: ApiError },
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        ApiResponse::Success {
            data: Some(data),
            message: message.into(),
        }
    }

    pub fn ok_empty(message: impl Into<String>) -> Self {
        ApiResponse::Success {
            data: None,
            message: message.into(),
        }
    }

    pub fn fail(error: ApiError) -> Self {
        ApiResponse::Failure { error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Success { data, .. } => data.as_ref(),
            ApiResponse::Failure { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            ApiResponse::Success { data, .. } => data,
            ApiResponse::Failure { .. } => None,
        }
    }

    /// Success message; `None` on failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiResponse::Success { message, .. } => Some(message),
            ApiResponse::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            ApiResponse::Success { .. } => None,
            ApiResponse::Failure { error } => Some(error),
        }
    }

    /// Human-readable error string; `None` on success.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    /// Wrap a fallible result, attaching `message` on success.
    pub fn from_result(result: Result<T, ApiError>, message: impl Into<String>) -> Self {
        match result {
            Ok(data) => ApiResponse::ok(data, message),
            Err(error) => ApiResponse::fail(error),
        }
    }
}
