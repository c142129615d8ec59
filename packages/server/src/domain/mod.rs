//! Domain layer
//!
//! エンティティと、外部クライアントへのインターフェース（trait）を定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

pub mod client;
pub mod entity;
pub mod error;
pub mod qr;

pub use client::{ClientEvent, EventSender, WhatsAppClient};
pub use entity::{Chat, ChatMessage, ChatSummary, ConnectionState, UnansweredMessage};
pub use error::{ClientError, QrRenderError};
pub use qr::QrRenderer;

#[cfg(test)]
pub use client::MockWhatsAppClient;
#[cfg(test)]
pub use qr::MockQrRenderer;
