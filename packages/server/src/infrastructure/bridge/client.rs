//! HTTP side of the bridge client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use crate::domain::{Chat, ChatMessage, ClientError, EventSender, WhatsAppClient};

use super::{
    dto::{ChatDto, MessageDto},
    events::{connect_events, pump_events},
};

const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// `WhatsAppClient` backed by a WhatsApp Web bridge process.
pub struct BridgeClient {
    http: reqwest::Client,
    /// ブリッジの HTTP ベース URL
    base_url: Url,
    /// イベントソケット再接続までの待ち時間
    reconnect_delay: Duration,
}

impl BridgeClient {
    /// Create a client for the bridge at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Request(format!("invalid bridge URL '{base_url}': {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        })
    }

    pub fn with_reconnect_delay(mut self, reconnect_delay: Duration) -> Self {
        self.reconnect_delay = reconnect_delay;
        self
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Request(format!("bridge URL '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// WebSocket URL of the event stream (`http` → `ws`, `https` → `wss`).
    pub fn events_url(&self) -> Result<Url, ClientError> {
        let mut url = self.endpoint(&["events"])?;
        let scheme = match url.scheme() {
            "http" => "ws",
            "https" => "wss",
            other => {
                return Err(ClientError::EventStream(format!(
                    "unsupported bridge scheme '{other}'"
                )));
            }
        };
        url.set_scheme(scheme)
            .map_err(|_| ClientError::EventStream(format!("cannot switch {url} to {scheme}")))?;
        Ok(url)
    }

    async fn check_status(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, u32)],
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;
        Self::check_status(response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl WhatsAppClient for BridgeClient {
    async fn initialize(&self, events: EventSender) -> Result<(), ClientError> {
        // The bridge may emit `qr` / `ready` while handling `/initialize`,
        // so the event socket must be open before the session starts.
        let events_url = self.events_url()?;
        let socket = connect_events(&events_url).await?;
        tokio::spawn(pump_events(
            events_url,
            socket,
            events,
            self.reconnect_delay,
        ));

        let response = self
            .http
            .post(self.endpoint(&["initialize"])?)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn get_chats(&self) -> Result<Vec<Chat>, ClientError> {
        let chats: Vec<ChatDto> = self.get_json(self.endpoint(&["chats"])?, &[]).await?;
        Ok(chats.into_iter().map(Chat::from).collect())
    }

    async fn fetch_messages(
        &self,
        chat_id: &str,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        let url = self.endpoint(&["chats", chat_id, "messages"])?;
        let messages: Vec<MessageDto> = self.get_json(url, &[("limit", limit)]).await?;
        Ok(messages.into_iter().map(ChatMessage::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        Json, Router,
        extract::{Path, Query, ws::WebSocketUpgrade},
        http::StatusCode,
        response::IntoResponse,
        routing::{get, post},
    };
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::extract::{State, ws::Message};
    use tokio::{
        sync::{broadcast, mpsc},
        time::timeout,
    };

    use super::*;
    use crate::domain::ClientEvent;

    /// Serve `app` on an ephemeral port and return its base URL.
    async fn spawn_bridge(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{}", addr)
    }

    async fn chats() -> Json<serde_json::Value> {
        Json(serde_json::json!([
            {"id": {"_serialized": "x@g.us"}, "name": "A", "unreadCount": 2, "timestamp": 1000, "isGroup": true},
            {"id": {"_serialized": "1@c.us"}, "name": "B", "unreadCount": 0, "timestamp": 900, "isGroup": false}
        ]))
    }

    async fn messages(
        Path(chat_id): Path<String>,
        Query(query): Query<HashMap<String, String>>,
    ) -> Json<serde_json::Value> {
        let limit = query.get("limit").cloned().unwrap_or_default();
        Json(serde_json::json!([
            {"from": chat_id, "fromMe": false, "body": format!("limit={limit}"), "timestamp": 1}
        ]))
    }

    async fn events(ws: WebSocketUpgrade) -> impl IntoResponse {
        ws.on_upgrade(|mut socket| async move {
            let _ = socket
                .send(Message::Text(r#"{"event":"qr","data":"ABC"}"#.into()))
                .await;
            let _ = socket.send(Message::Text("garbage".into())).await;
            let _ = socket
                .send(Message::Text(r#"{"event":"ready"}"#.into()))
                .await;
        })
    }

    fn bridge_router() -> Router {
        Router::new()
            .route("/initialize", post(|| async { StatusCode::OK }))
            .route("/chats", get(chats))
            .route("/chats/{chat_id}/messages", get(messages))
            .route("/events", get(events))
    }

    #[test]
    fn test_endpoint_and_events_url() {
        // テスト項目: ベース URL にパスが連結され、イベント URL は ws スキームになる
        // given (前提条件):
        let client = BridgeClient::new("http://127.0.0.1:3009/", Duration::from_secs(1)).unwrap();

        // when (操作):
        let messages = client.endpoint(&["chats", "x@g.us", "messages"]).unwrap();
        let events = client.events_url().unwrap();

        // then (期待する結果):
        assert_eq!(messages.path(), "/chats/x@g.us/messages");
        assert_eq!(events.as_str(), "ws://127.0.0.1:3009/events");
    }

    #[test]
    fn test_events_url_https_uses_wss() {
        // テスト項目: https のブリッジは wss でイベントを購読する
        let client = BridgeClient::new("https://bridge.local/wa", Duration::from_secs(1)).unwrap();

        let events = client.events_url().unwrap();

        assert_eq!(events.as_str(), "wss://bridge.local/wa/events");
    }

    #[test]
    fn test_new_rejects_relative_url() {
        // テスト項目: 相対 URL はエラーになる
        let result = BridgeClient::new("localhost", Duration::from_secs(1));

        assert!(matches!(result, Err(ClientError::Request(_))));
    }

    #[tokio::test]
    async fn test_get_chats_decodes_bridge_response() {
        // テスト項目: /chats のレスポンスが Chat のリストに変換される
        // given (前提条件):
        let base_url = spawn_bridge(bridge_router()).await;
        let client = BridgeClient::new(&base_url, Duration::from_secs(5)).unwrap();

        // when (操作):
        let chats = client.get_chats().await.unwrap();

        // then (期待する結果):
        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].id, "x@g.us");
        assert_eq!(chats[0].unread_count, 2);
        assert!(chats[0].is_group);
        assert_eq!(chats[1].name, "B");
    }

    #[tokio::test]
    async fn test_fetch_messages_passes_chat_id_and_limit() {
        // テスト項目: チャット ID と件数上限がブリッジに渡される
        let base_url = spawn_bridge(bridge_router()).await;
        let client = BridgeClient::new(&base_url, Duration::from_secs(5)).unwrap();

        let messages = client.fetch_messages("x@g.us", 3).await.unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].from, "x@g.us");
        assert_eq!(messages[0].body, "limit=3");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        // テスト項目: ブリッジのエラーステータスが UnexpectedStatus になる
        // given (前提条件):
        let app = Router::new().route(
            "/chats",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "browser not running") }),
        );
        let base_url = spawn_bridge(app).await;
        let client = BridgeClient::new(&base_url, Duration::from_secs(5)).unwrap();

        // when (操作):
        let result = client.get_chats().await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ClientError::UnexpectedStatus {
                status: 503,
                body: "browser not running".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_undecodable_body_is_reported() {
        // テスト項目: 不正な JSON は Decode エラーになる
        let app = Router::new().route("/chats", get(|| async { "not json" }));
        let base_url = spawn_bridge(app).await;
        let client = BridgeClient::new(&base_url, Duration::from_secs(5)).unwrap();

        let result = client.get_chats().await;

        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_bridge_is_request_error() {
        // テスト項目: 接続できないブリッジは Request エラーになる
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client =
            BridgeClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();

        let result = client.get_chats().await;

        assert!(matches!(result, Err(ClientError::Request(_))));
    }

    #[tokio::test]
    async fn test_initialize_forwards_events() {
        // テスト項目: initialize 後、イベントソケットの qr / ready が転送される
        // given (前提条件):
        let base_url = spawn_bridge(bridge_router()).await;
        let client = BridgeClient::new(&base_url, Duration::from_secs(5))
            .unwrap()
            .with_reconnect_delay(Duration::from_millis(50));
        let (tx, mut rx) = mpsc::channel(16);

        // when (操作):
        client.initialize(tx).await.unwrap();

        // then (期待する結果): 不正なフレームは読み飛ばされる
        assert_eq!(rx.recv().await, Some(ClientEvent::Qr("ABC".to_string())));
        assert_eq!(rx.recv().await, Some(ClientEvent::Ready));
    }

    /// Bridge that broadcasts events to every open socket, independent of
    /// any socket being open, and emits `ready` while handling `/initialize`.
    fn restoring_bridge_router() -> Router {
        async fn initialize(State(bus): State<broadcast::Sender<String>>) -> StatusCode {
            // セッション復元済みのブリッジは初期化中に ready を送る
            let _ = bus.send(r#"{"event":"ready"}"#.to_string());
            StatusCode::OK
        }

        async fn events(
            ws: WebSocketUpgrade,
            State(bus): State<broadcast::Sender<String>>,
        ) -> impl IntoResponse {
            let mut frames = bus.subscribe();
            ws.on_upgrade(move |mut socket| async move {
                while let Ok(frame) = frames.recv().await {
                    if socket.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
            })
        }

        let (bus, _) = broadcast::channel(16);
        Router::new()
            .route("/initialize", post(initialize))
            .route("/events", get(events))
            .with_state(bus)
    }

    #[tokio::test]
    async fn test_initialize_receives_ready_sent_during_initialize() {
        // テスト項目: /initialize の処理中に送られた ready も取りこぼさない
        // given (前提条件):
        let base_url = spawn_bridge(restoring_bridge_router()).await;
        let client = BridgeClient::new(&base_url, Duration::from_secs(5)).unwrap();
        let (tx, mut rx) = mpsc::channel(16);

        // when (操作):
        client.initialize(tx).await.unwrap();

        // then (期待する結果):
        let event = timeout(Duration::from_secs(2), rx.recv()).await;
        assert_eq!(event, Ok(Some(ClientEvent::Ready)));
    }

    #[tokio::test]
    async fn test_initialize_fails_when_event_socket_unavailable() {
        // テスト項目: イベントソケットが開けなければ /initialize を送らずに失敗する
        // given (前提条件): /events を持たないブリッジ
        let initialized = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route(
                "/initialize",
                post(|State(initialized): State<Arc<AtomicUsize>>| async move {
                    initialized.fetch_add(1, Ordering::SeqCst);
                    StatusCode::OK
                }),
            )
            .with_state(initialized.clone());
        let base_url = spawn_bridge(app).await;
        let client = BridgeClient::new(&base_url, Duration::from_secs(5)).unwrap();
        let (tx, _rx) = mpsc::channel(16);

        // when (操作):
        let result = client.initialize(tx).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::EventStream(_))));
        assert_eq!(initialized.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_event_pump_reconnects_after_socket_drop() {
        // テスト項目: イベントソケットが切れても再接続後にイベントが届き続ける
        // given (前提条件): 接続ごとに 1 フレームだけ送って切断するブリッジ
        async fn events(
            ws: WebSocketUpgrade,
            State(connections): State<Arc<AtomicUsize>>,
        ) -> impl IntoResponse {
            let n = connections.fetch_add(1, Ordering::SeqCst) + 1;
            ws.on_upgrade(move |mut socket| async move {
                let frame = format!(r#"{{"event":"qr","data":"{n}"}}"#);
                let _ = socket.send(Message::Text(frame.into())).await;
                let _ = socket.send(Message::Close(None)).await;
            })
        }

        let app = Router::new()
            .route("/initialize", post(|| async { StatusCode::OK }))
            .route("/events", get(events))
            .with_state(Arc::new(AtomicUsize::new(0)));
        let base_url = spawn_bridge(app).await;
        let client = BridgeClient::new(&base_url, Duration::from_secs(5))
            .unwrap()
            .with_reconnect_delay(Duration::from_millis(50));
        let (tx, mut rx) = mpsc::channel(16);

        // when (操作):
        client.initialize(tx).await.unwrap();

        // then (期待する結果): 1 回目と 2 回目の接続のフレームが順に届く
        let first = timeout(Duration::from_secs(2), rx.recv()).await;
        let second = timeout(Duration::from_secs(2), rx.recv()).await;
        assert_eq!(first, Ok(Some(ClientEvent::Qr("1".to_string()))));
        assert_eq!(second, Ok(Some(ClientEvent::Qr("2".to_string()))));
    }
}
