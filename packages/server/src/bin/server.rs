//! WhatsApp Web gateway server.
//!
//! Pairs with a WhatsApp Web bridge process, shows the pairing QR code on a
//! status page and exposes chats and unread messages as JSON.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin wagate-server
//! cargo run --bin wagate-server -- --port 3000 --gateway-url http://127.0.0.1:3009
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use tokio::sync::mpsc;
use wagate_server::{
    domain::WhatsAppClient,
    infrastructure::{BridgeClient, PngQrRenderer},
    ui::Server,
    usecase::{
        ConnectionTracker, GetConnectionStateUseCase, ListChatsUseCase, ListUnansweredUseCase,
        ReadinessPolicy,
    },
};
use wagate_shared::logger::setup_logger;

/// Client events buffered between the bridge pump and the tracker
const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Parser, Debug)]
#[command(name = "wagate-server")]
#[command(about = "HTTP gateway for WhatsApp Web pairing, chats and unread messages", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "WAGATE_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "WAGATE_PORT", default_value = "3000")]
    port: u16,

    /// Base URL of the WhatsApp Web bridge
    #[arg(
        short = 'g',
        long,
        env = "WAGATE_GATEWAY_URL",
        default_value = "http://127.0.0.1:3009"
    )]
    gateway_url: String,

    /// Timeout for each request to the bridge, in seconds
    #[arg(long, env = "WAGATE_REQUEST_TIMEOUT_SECS", default_value = "30")]
    request_timeout_secs: u64,

    /// Return to the not-ready state when the client disconnects
    #[arg(long, env = "WAGATE_RESET_ON_DISCONNECT")]
    reset_on_disconnect: bool,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn readiness_policy(&self) -> ReadinessPolicy {
        if self.reset_on_disconnect {
            ReadinessPolicy::ResetOnDisconnect
        } else {
            ReadinessPolicy::Sticky
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);
    tracing::info!("Starting WhatsApp service...");

    // Initialize dependencies in order:
    // 1. WhatsApp client
    // 2. ConnectionTracker (single writer of the connection state)
    // 3. UseCases
    // 4. Server

    // 1. Create the bridge client
    let client: Arc<dyn WhatsAppClient> = match BridgeClient::new(
        &args.gateway_url,
        Duration::from_secs(args.request_timeout_secs),
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Invalid bridge configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 2. Start tracking client events
    let tracker = ConnectionTracker::new(Arc::new(PngQrRenderer::new()), args.readiness_policy());
    let connection = tracker.subscribe();
    let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    tokio::spawn(tracker.run(events_rx));

    // The HTTP server comes up even if the client never initializes
    {
        let client = client.clone();
        tokio::spawn(async move {
            if let Err(e) = client.initialize(events_tx).await {
                tracing::error!("Failed to initialize WhatsApp client: {}", e);
            }
        });
    }

    // 3. Create UseCases
    let get_connection_state_usecase =
        Arc::new(GetConnectionStateUseCase::new(connection.clone()));
    let list_chats_usecase = Arc::new(ListChatsUseCase::new(client.clone(), connection.clone()));
    let list_unanswered_usecase = Arc::new(ListUnansweredUseCase::new(client, connection));

    // 4. Create and run the server
    let server = Server::new(
        get_connection_state_usecase,
        list_chats_usecase,
        list_unanswered_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
