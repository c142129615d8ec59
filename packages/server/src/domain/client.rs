//! WhatsApp client trait 定義
//!
//! セッション管理・ブラウザ操作・メッセージ解析は外部クライアントの責務です。
//! UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{Chat, ChatMessage, ClientError};

/// Lifecycle events emitted by the client after [`WhatsAppClient::initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A raw QR challenge that must be scanned to pair the account
    Qr(String),
    /// The session is authenticated and usable
    Ready,
    /// The session was lost, with the reason given by the client
    Disconnected(String),
}

/// Channel the client pushes its lifecycle events onto.
pub type EventSender = mpsc::Sender<ClientEvent>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WhatsAppClient: Send + Sync {
    /// Start the session. Lifecycle events are sent on `events` from now on.
    async fn initialize(&self, events: EventSender) -> Result<(), ClientError>;

    /// List every chat known to the session.
    async fn get_chats(&self) -> Result<Vec<Chat>, ClientError>;

    /// Fetch the most recent `limit` messages of a chat.
    async fn fetch_messages(
        &self,
        chat_id: &str,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, ClientError>;
}
