//! Domain entities.

use serde::Serialize;

/// Pairing / connection state of the WhatsApp client.
///
/// Written only by the connection tracker; every HTTP handler reads a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionState {
    /// 認証済みセッションが利用可能かどうか
    pub ready: bool,
    /// 最後に受信した QR コード（data URL 形式）
    pub qr_data_url: Option<String>,
}

impl ConnectionState {
    pub fn has_qr(&self) -> bool {
        self.qr_data_url.is_some()
    }
}

/// A chat as reported by the WhatsApp client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    /// Serialized chat id (e.g. `123@c.us`, `456@g.us`)
    pub id: String,
    pub name: String,
    pub unread_count: u32,
    /// Last activity, seconds since the Unix epoch
    pub timestamp: i64,
    pub is_group: bool,
}

/// A message fetched from a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Sender id
    pub from: String,
    /// `true` when the message was sent by the local account
    pub from_me: bool,
    pub body: String,
    pub timestamp: i64,
}

/// Projection of a [`Chat`] returned by `GET /chats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: String,
    pub name: String,
    pub unread_count: u32,
    pub timestamp: i64,
    pub is_group: bool,
}

impl From<Chat> for ChatSummary {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            name: chat.name,
            unread_count: chat.unread_count,
            timestamp: chat.timestamp,
            is_group: chat.is_group,
        }
    }
}

/// A message in an unread chat that was not sent by the local account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnansweredMessage {
    pub chat_name: String,
    pub chat_id: String,
    pub message: String,
    pub timestamp: i64,
    pub from: String,
}

impl UnansweredMessage {
    pub fn new(chat: &Chat, message: ChatMessage) -> Self {
        Self {
            chat_name: chat.name.clone(),
            chat_id: chat.id.clone(),
            message: message.body,
            timestamp: message.timestamp,
            from: message.from,
        }
    }
}
