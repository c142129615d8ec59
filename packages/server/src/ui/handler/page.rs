//! HTML status page.

use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{domain::ConnectionState, ui::state::AppState};

/// Milliseconds between automatic reloads while waiting for the connection
const REFRESH_INTERVAL_MS: u32 = 5000;

pub async fn status_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let connection = state.get_connection_state_usecase.execute();
    Html(render_status_page(&connection, state.port))
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render the status page for `connection`.
///
/// The page reloads itself every 5 seconds until the client is connected.
pub fn render_status_page(connection: &ConnectionState, port: u16) -> String {
    let qr = match &connection.qr_data_url {
        Some(url) => format!(r#"<img src="{}" alt="WhatsApp QR Code">"#, escape_attr(url)),
        None => "Waiting for QR code...".to_string(),
    };
    let status = if connection.ready {
        "Connected"
    } else {
        "Waiting for connection"
    };

    format!(
        r#"<html>
    <head>
        <title>WhatsApp Service</title>
        <style>
            body {{ font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; }}
            .container {{ max-width: 800px; margin: 0 auto; }}
            .status {{ padding: 20px; background: #f0f0f0; border-radius: 5px; margin: 20px 0; }}
            #qrcode {{ margin: 20px 0; }}
            img {{ max-width: 300px; }}
        </style>
    </head>
    <body>
        <div class="container">
            <h1>WhatsApp Service Status</h1>
            <div class="status">
                <p>Service is running on port {port}</p>
                <div id="qrcode">
                    {qr}
                </div>
                <p>Status: {status}</p>
            </div>
        </div>
        <script>
            if (!{ready}) {{
                setTimeout(() => location.reload(), {refresh});
            }}
        </script>
    </body>
</html>
"#,
        port = port,
        qr = qr,
        status = status,
        ready = connection.ready,
        refresh = REFRESH_INTERVAL_MS,
    )
}
