//! UseCase: チャット一覧の取得

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{ChatSummary, ConnectionState, WhatsAppClient};

use super::error::QueryError;

/// チャット一覧取得のユースケース
pub struct ListChatsUseCase {
    /// WhatsApp クライアント（外部ライブラリの抽象化）
    client: Arc<dyn WhatsAppClient>,
    connection: watch::Receiver<ConnectionState>,
}

impl ListChatsUseCase {
    pub fn new(
        client: Arc<dyn WhatsAppClient>,
        connection: watch::Receiver<ConnectionState>,
    ) -> Self {
        Self { client, connection }
    }

    /// List every chat as a [`ChatSummary`].
    ///
    /// # Returns
    ///
    /// * `Err(QueryError::NotReady)` - the client has no session yet; the client is not called
    /// * `Err(QueryError::Client)` - the client call failed
    pub async fn execute(&self) -> Result<Vec<ChatSummary>, QueryError> {
        if !self.connection.borrow().ready {
            return Err(QueryError::NotReady);
        }

        let chats = self.client.get_chats().await?;
        Ok(chats.into_iter().map(ChatSummary::from).collect())
    }
}
