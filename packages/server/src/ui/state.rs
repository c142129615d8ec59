//! Shared application state.

use std::sync::Arc;

use crate::usecase::{GetConnectionStateUseCase, ListChatsUseCase, ListUnansweredUseCase};

/// Shared application state
pub struct AppState {
    /// GetConnectionStateUseCase（接続状態取得のユースケース）
    pub get_connection_state_usecase: Arc<GetConnectionStateUseCase>,
    /// ListChatsUseCase（チャット一覧取得のユースケース）
    pub list_chats_usecase: Arc<ListChatsUseCase>,
    /// ListUnansweredUseCase（未返信メッセージ取得のユースケース）
    pub list_unanswered_usecase: Arc<ListUnansweredUseCase>,
    /// 待ち受けポート（ステータスページに表示）
    pub port: u16,
}
