//! Infrastructure layer
//!
//! Domain 層の trait の具体的な実装と、外部とやり取りするデータ形式を提供します。
//!
//! - `bridge`: WhatsApp Web ブリッジプロセスと HTTP / WebSocket で通信する `WhatsAppClient`
//! - `qr`: QR コードを PNG の data URL に変換する `QrRenderer`
//! - `dto`: HTTP API のレスポンス形式

pub mod bridge;
pub mod dto;
pub mod qr;

pub use bridge::BridgeClient;
pub use qr::PngQrRenderer;
