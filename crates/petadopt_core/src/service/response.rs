//! Uniform response envelope returned by every service operation.

use serde::Serialize;

/// Outcome class of a service call.
///
/// Mapping these to transport codes is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Created,
    Success,
    NotFound,
    ServerError,
}

impl StatusCode {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Created | Self::Success)
    }
}

/// `{status, message, data}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseDto<T> {
    pub status: StatusCode,
    pub message: String,
    pub data: Vec<T>,
}

impl<T> ResponseDto<T> {
    pub fn created(message: impl Into<String>) -> Self {
        Self::empty(StatusCode::Created, message)
    }

    pub fn success(message: impl Into<String>, data: Vec<T>) -> Self {
        Self {
            status: StatusCode::Success,
            message: message.into(),
            data,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::empty(StatusCode::NotFound, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::empty(StatusCode::ServerError, message)
    }

    fn empty(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: Vec::new(),
        }
    }
}
