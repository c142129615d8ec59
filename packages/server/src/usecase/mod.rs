//! UseCase layer
//!
//! - `track_connection`: 外部クライアントのイベントを受けて接続状態を更新する（唯一の書き込み手）
//! - `get_connection_state`: 接続状態のスナップショットを取得
//! - `list_chats`: チャット一覧の取得
//! - `list_unanswered`: 未返信メッセージの取得

pub mod error;
pub mod get_connection_state;
pub mod list_chats;
pub mod list_unanswered;
pub mod track_connection;

pub use error::QueryError;
pub use get_connection_state::GetConnectionStateUseCase;
pub use list_chats::ListChatsUseCase;
pub use list_unanswered::ListUnansweredUseCase;
pub use track_connection::{ConnectionTracker, ReadinessPolicy};
