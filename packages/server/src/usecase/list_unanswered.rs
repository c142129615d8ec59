//! UseCase: 未返信メッセージの取得
//!
//! 未読のあるチャットごとに未読件数分の最新メッセージを取得し、
//! 自分以外が送信したものだけを全チャット分まとめて返します。

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{ConnectionState, UnansweredMessage, WhatsAppClient};

use super::error::QueryError;

/// 未返信メッセージ取得のユースケース
pub struct ListUnansweredUseCase {
    client: Arc<dyn WhatsAppClient>,
    connection: watch::Receiver<ConnectionState>,
}

impl ListUnansweredUseCase {
    pub fn new(
        client: Arc<dyn WhatsAppClient>,
        connection: watch::Receiver<ConnectionState>,
    ) -> Self {
        Self { client, connection }
    }

    /// Collect unanswered messages across all unread chats.
    ///
    /// Chats are queried one after another; the first failing call aborts the
    /// whole query.
    pub async fn execute(&self) -> Result<Vec<UnansweredMessage>, QueryError> {
        if !self.connection.borrow().ready {
            return Err(QueryError::NotReady);
        }

        let chats = self.client.get_chats().await?;
        let mut unanswered = Vec::new();

        for chat in chats.iter().filter(|chat| chat.unread_count > 0) {
            let messages = self
                .client
                .fetch_messages(&chat.id, chat.unread_count)
                .await?;
            unanswered.extend(
                messages
                    .into_iter()
                    .filter(|message| !message.from_me)
                    .map(|message| UnansweredMessage::new(chat, message)),
            );
        }

        Ok(unanswered)
    }
}
