use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured failure payload returned by the API on non-2xx responses,
/// distinct from transport-level failures. Displays as the server-provided
/// message, which is what error surfaces show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
