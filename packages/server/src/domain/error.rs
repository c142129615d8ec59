//! Domain error types.

use thiserror::Error;

/// Failures reported by the WhatsApp client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("request failed: {0}")]
    Request(String),

    /// The client answered with a non-success status
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The event stream could not be established
    #[error("event stream error: {0}")]
    EventStream(String),
}

/// Failures while turning a QR challenge into a displayable image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrRenderError {
    #[error("QR encoding failed: {0}")]
    Encode(String),

    #[error("image encoding failed: {0}")]
    Image(String),
}
