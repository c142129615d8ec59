//! UseCase: 接続ライフサイクルの追跡
//!
//! 外部クライアントはイベントをチャンネルに送信し、`ConnectionTracker` が唯一の
//! 消費者として `ConnectionState` を更新します。HTTP ハンドラは `watch::Receiver`
//! 経由でスナップショットを読むだけなので、ロックは不要です。

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::domain::{ClientEvent, ConnectionState, QrRenderer};

/// What a `Disconnected` event does to the connection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadinessPolicy {
    /// Once ready, stay ready for the lifetime of the process
    #[default]
    Sticky,
    /// Drop back to not-ready and forget the last QR code
    ResetOnDisconnect,
}

/// Single writer of [`ConnectionState`].
pub struct ConnectionTracker {
    state: watch::Sender<ConnectionState>,
    renderer: Arc<dyn QrRenderer>,
    policy: ReadinessPolicy,
}

impl ConnectionTracker {
    pub fn new(renderer: Arc<dyn QrRenderer>, policy: ReadinessPolicy) -> Self {
        let (state, _) = watch::channel(ConnectionState::default());
        Self {
            state,
            renderer,
            policy,
        }
    }

    /// Read handle on the tracked state.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Apply one client event to the state.
    pub fn apply(&self, event: ClientEvent) {
        match event {
            ClientEvent::Qr(payload) => {
                tracing::info!("New QR code generated");
                match self.renderer.render_data_url(&payload) {
                    Ok(data_url) => {
                        self.state
                            .send_modify(|state| state.qr_data_url = Some(data_url));
                        tracing::info!("QR code converted to data URL");
                    }
                    Err(e) => tracing::error!("Error generating QR code: {}", e),
                }
            }
            ClientEvent::Ready => {
                self.state.send_modify(|state| state.ready = true);
                tracing::info!("WhatsApp client is ready!");
            }
            ClientEvent::Disconnected(reason) => {
                tracing::warn!("WhatsApp client disconnected: {}", reason);
                if self.policy == ReadinessPolicy::ResetOnDisconnect {
                    self.state
                        .send_modify(|state| *state = ConnectionState::default());
                }
            }
        }
    }

    /// Consume events until every sender is dropped.
    pub async fn run(self, mut events: mpsc::Receiver<ClientEvent>) {
        while let Some(event) = events.recv().await {
            self.apply(event);
        }
        tracing::debug!("Client event channel closed");
    }
}
