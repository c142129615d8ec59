//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    domain::{ChatSummary, UnansweredMessage},
    infrastructure::dto::http::{QrCodeDto, StatusDto},
    ui::{error::ApiError, state::AppState},
    usecase::QueryError,
};

/// Current QR code as a data URL
pub async fn get_qr(State(state): State<Arc<AppState>>) -> Result<Json<QrCodeDto>, ApiError> {
    state
        .get_connection_state_usecase
        .execute()
        .qr_data_url
        .map(|qr_code| Json(QrCodeDto { qr_code }))
        .ok_or(ApiError::QrUnavailable)
}

/// Connection status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusDto> {
    let connection = state.get_connection_state_usecase.execute();
    Json(StatusDto::from(&connection))
}

/// List all chats
pub async fn get_chats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChatSummary>>, ApiError> {
    match state.list_chats_usecase.execute().await {
        Ok(chats) => Ok(Json(chats)),
        Err(QueryError::NotReady) => Err(ApiError::NotReady),
        Err(QueryError::Client(e)) => {
            tracing::error!("Error fetching chats: {}", e);
            Err(ApiError::ChatsFailed)
        }
    }
}

/// List messages in unread chats that were not sent by the local account
pub async fn get_unanswered(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UnansweredMessage>>, ApiError> {
    match state.list_unanswered_usecase.execute().await {
        Ok(messages) => Ok(Json(messages)),
        Err(QueryError::NotReady) => Err(ApiError::NotReady),
        Err(QueryError::Client(e)) => {
            tracing::error!("Error fetching unanswered messages: {}", e);
            Err(ApiError::UnansweredFailed)
        }
    }
}
