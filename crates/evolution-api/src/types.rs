//! Request bodies sent to the gateway

use serde::Serialize;
use serde_json::Number;

/// Delay applied by the gateway when the caller does not pick one
pub const DEFAULT_DELAY: u64 = 1;

/// Body of `POST /message/sendText/{instance}`
///
/// Field order is the wire order: `number`, `text`, `delay`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendTextRequest {
    /// Recipient, digits only, country code included
    pub number: String,
    /// Message body
    pub text: String,
    /// Wait before the gateway sends the message
    pub delay: Number,
}

impl SendTextRequest {
    /// Create a request with the default delay
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            text: text.into(),
            delay: Number::from(DEFAULT_DELAY),
        }
    }

    /// Override the delay
    pub fn with_delay(mut self, delay: Number) -> Self {
        self.delay = delay;
        self
    }
}
