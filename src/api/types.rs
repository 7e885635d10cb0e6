//! API request and response types

use serde::{Deserialize, Serialize};

/// Form posted to `/ask`
#[derive(Debug, Deserialize)]
pub struct AskForm {
    pub question: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
