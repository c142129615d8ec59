//! Event socket pump.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Url;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use crate::domain::{ClientError, ClientEvent, EventSender};

use super::dto::EventFrameDto;

/// Open WebSocket to the bridge event stream
pub(super) type EventSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Decode one text frame of the event socket.
pub(super) fn decode_event(text: &str) -> Option<ClientEvent> {
    match serde_json::from_str::<EventFrameDto>(text) {
        Ok(frame) => {
            let name = frame.event.clone();
            let event = frame.into_event();
            if event.is_none() {
                tracing::debug!("Ignoring bridge event '{}'", name);
            }
            event
        }
        Err(e) => {
            tracing::debug!("Ignoring malformed bridge frame: {}", e);
            None
        }
    }
}

/// Complete the WebSocket handshake with the bridge event stream.
pub(super) async fn connect_events(url: &Url) -> Result<EventSocket, ClientError> {
    let (socket, _) = connect_async(url.as_str())
        .await
        .map_err(|e| ClientError::EventStream(format!("failed to connect to {url}: {e}")))?;
    tracing::info!("Subscribed to bridge events at {}", url);
    Ok(socket)
}

/// Forward the frames of one socket until it closes.
///
/// Returns `false` once the receiving side of `events` is gone.
async fn forward_events(mut socket: EventSocket, events: &EventSender) -> bool {
    while let Some(frame) = socket.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let Some(event) = decode_event(text.as_str()) else {
                    continue;
                };
                if events.send(event).await.is_err() {
                    tracing::debug!("Event receiver dropped, stopping bridge pump");
                    return false;
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Bridge event stream error: {}", e);
                break;
            }
        }
    }
    true
}

/// Forward bridge events onto `events` until the receiving side is dropped.
///
/// Starts from an already open `socket`; a closed or failed socket is reopened
/// after `reconnect_delay`.
pub(super) async fn pump_events(
    url: Url,
    socket: EventSocket,
    events: EventSender,
    reconnect_delay: Duration,
) {
    let mut socket = Some(socket);
    loop {
        if let Some(current) = socket.take() {
            if !forward_events(current, &events).await {
                return;
            }
            tracing::warn!("Bridge event stream closed");
        }

        if events.is_closed() {
            return;
        }
        tokio::time::sleep(reconnect_delay).await;

        match connect_events(&url).await {
            Ok(reopened) => socket = Some(reopened),
            Err(e) => tracing::warn!("{}", e),
        }
    }
}
