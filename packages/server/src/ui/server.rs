//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::usecase::{GetConnectionStateUseCase, ListChatsUseCase, ListUnansweredUseCase};

use super::{
    handler::{get_chats, get_qr, get_status, get_unanswered, status_page},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the gateway router.
///
/// Cross-origin requests are allowed from anywhere.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(status_page))
        .route("/qr", get(get_qr))
        .route("/status", get(get_status))
        .route("/chats", get(get_chats))
        .route("/unanswered", get(get_unanswered))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// WhatsApp gateway HTTP server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     get_connection_state_usecase,
///     list_chats_usecase,
///     list_unanswered_usecase,
/// );
/// server.run("0.0.0.0".to_string(), 3000).await?;
/// ```
pub struct Server {
    /// GetConnectionStateUseCase（接続状態取得のユースケース）
    get_connection_state_usecase: Arc<GetConnectionStateUseCase>,
    /// ListChatsUseCase（チャット一覧取得のユースケース）
    list_chats_usecase: Arc<ListChatsUseCase>,
    /// ListUnansweredUseCase（未返信メッセージ取得のユースケース）
    list_unanswered_usecase: Arc<ListUnansweredUseCase>,
}

impl Server {
    pub fn new(
        get_connection_state_usecase: Arc<GetConnectionStateUseCase>,
        list_chats_usecase: Arc<ListChatsUseCase>,
        list_unanswered_usecase: Arc<ListUnansweredUseCase>,
    ) -> Self {
        Self {
            get_connection_state_usecase,
            list_chats_usecase,
            list_unanswered_usecase,
        }
    }

    /// Run the gateway until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            get_connection_state_usecase: self.get_connection_state_usecase,
            list_chats_usecase: self.list_chats_usecase,
            list_unanswered_usecase: self.list_unanswered_usecase,
            port,
        });
        let app = build_router(app_state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "WhatsApp service running on {}",
            listener.local_addr()?
        );
        tracing::info!("Visit http://localhost:{} to see service status", port);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
