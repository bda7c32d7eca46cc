//! API request and response types

use serde::{Deserialize, Serialize};

/// Inbound channel message, posted as a form by the messaging provider
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    /// Sender, e.g. `whatsapp:+15550100`
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "Body")]
    pub body: String,
}

/// Response carrying a plain message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
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
