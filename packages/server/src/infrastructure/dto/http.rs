//! HTTP API response DTOs.

use serde::Serialize;

use crate::domain::ConnectionState;

/// `GET /qr` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeDto {
    pub qr_code: String,
}

/// `GET /status` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDto {
    pub connected: bool,
    #[serde(rename = "hasQR")]
    pub has_qr: bool,
}

impl From<&ConnectionState> for StatusDto {
    fn from(state: &ConnectionState) -> Self {
        Self {
            connected: state.ready,
            has_qr: state.has_qr(),
        }
    }
}
