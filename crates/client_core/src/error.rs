use std::path::PathBuf;

use shared::error::{ApiException, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("failed to read image {}: {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Rejection or transport failure from the order service. Displays as the
    /// bare message so it can be shown to the customer as-is.
    #[error("{message}")]
    Service { code: ErrorCode, message: String },
}

impl OrderError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<ApiException> for OrderError {
    fn from(value: ApiException) -> Self {
        Self::Service {
            code: value.code,
            message: value.message,
        }
    }
}
