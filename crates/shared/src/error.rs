use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback shown when the service rejects an order without a `detail`.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to save";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Transport,
    Rejected,
    MalformedResponse,
}

/// Error body returned by the order service on a non-success status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Parses a failure body, tolerating bodies that are not JSON or carry a
    /// non-string `detail`.
    pub fn from_slice(raw: &[u8]) -> Self {
        let Ok(value) = serde_json::from_slice::<serde_json::Value>(raw) else {
            return Self::default();
        };
        let detail = value
            .get("detail")
            .and_then(|detail| detail.as_str())
            .map(str::to_string);
        Self { detail }
    }

    pub fn into_message(self) -> String {
        match self.detail {
            Some(detail) if !detail.is_empty() => detail,
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{code:?}: {message}")]
pub struct ApiException {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiException {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<ErrorBody> for ApiException {
    fn from(value: ErrorBody) -> Self {
        Self::new(ErrorCode::Rejected, value.into_message())
    }
}
