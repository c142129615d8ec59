//! QR rendering trait.

use super::QrRenderError;

/// Turns a raw QR challenge into something a browser can display.
#[cfg_attr(test, mockall::automock)]
pub trait QrRenderer: Send + Sync {
    /// Render `payload` as a `data:` URL.
    fn render_data_url(&self, payload: &str) -> Result<String, QrRenderError>;
}
