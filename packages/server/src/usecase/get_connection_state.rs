//! UseCase: 接続状態の取得

use tokio::sync::watch;

use crate::domain::ConnectionState;

/// 接続状態取得のユースケース
pub struct GetConnectionStateUseCase {
    connection: watch::Receiver<ConnectionState>,
}

impl GetConnectionStateUseCase {
    pub fn new(connection: watch::Receiver<ConnectionState>) -> Self {
        Self { connection }
    }

    /// Snapshot of the current state. May observe a state mid-transition.
    pub fn execute(&self) -> ConnectionState {
        self.connection.borrow().clone()
    }
}
