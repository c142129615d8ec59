//! Wire format of the bridge API.

use serde::Deserialize;

use crate::domain::{Chat, ChatMessage, ClientEvent};

/// WhatsApp Web id object (`{ "_serialized": "123@c.us" }`)
#[derive(Debug, Clone, Deserialize)]
pub struct SerializedId {
    #[serde(rename = "_serialized")]
    pub serialized: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatDto {
    pub id: SerializedId,
    #[serde(default)]
    pub name: String,
    /// WhatsApp Web reports `-1` for chats manually marked as unread
    #[serde(default)]
    pub unread_count: i64,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub is_group: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub from_me: bool,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub timestamp: i64,
}

/// A frame received on the event socket.
#[derive(Debug, Clone, Deserialize)]
pub struct EventFrameDto {
    pub event: String,
    #[serde(default)]
    pub data: Option<String>,
}

impl From<ChatDto> for Chat {
    fn from(dto: ChatDto) -> Self {
        Self {
            id: dto.id.serialized,
            name: dto.name,
            unread_count: u32::try_from(dto.unread_count).unwrap_or(0),
            timestamp: dto.timestamp,
            is_group: dto.is_group,
        }
    }
}

impl From<MessageDto> for ChatMessage {
    fn from(dto: MessageDto) -> Self {
        Self {
            from: dto.from,
            from_me: dto.from_me,
            body: dto.body,
            timestamp: dto.timestamp,
        }
    }
}

impl EventFrameDto {
    /// Convert to a domain event. Unknown events and `qr` frames without a
    /// payload yield `None`.
    pub fn into_event(self) -> Option<ClientEvent> {
        match self.event.as_str() {
            "qr" => self.data.map(ClientEvent::Qr),
            "ready" => Some(ClientEvent::Ready),
            "disconnected" => Some(ClientEvent::Disconnected(self.data.unwrap_or_default())),
            _ => None,
        }
    }
}
