//! PNG data URL rendering of QR challenges.

use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::domain::{QrRenderError, QrRenderer};

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Renders QR challenges as grayscale PNG images wrapped in a `data:` URL.
///
/// Output is deterministic: the same payload always yields the same URL.
#[derive(Debug, Clone)]
pub struct PngQrRenderer {
    /// 1 モジュールあたりのピクセル数
    module_size: u32,
    /// 周囲の余白（モジュール数）
    quiet_zone: u32,
    ec_level: EcLevel,
}

impl Default for PngQrRenderer {
    fn default() -> Self {
        Self {
            module_size: 8,
            quiet_zone: 4,
            ec_level: EcLevel::M,
        }
    }
}

impl PngQrRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `payload` as PNG bytes.
    pub fn render_png(&self, payload: &str) -> Result<Vec<u8>, QrRenderError> {
        if payload.trim().is_empty() {
            return Err(QrRenderError::Encode("QR payload is empty".to_string()));
        }

        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.ec_level)
            .map_err(|e| QrRenderError::Encode(e.to_string()))?;

        let modules = code.width() as u32;
        let quiet_zone = self.quiet_zone;
        let module_size = self.module_size;
        let img_size = (modules + quiet_zone * 2) * module_size;

        let img = GrayImage::from_fn(img_size, img_size, |x, y| {
            let mx = x / module_size;
            let my = y / module_size;
            if mx < quiet_zone
                || my < quiet_zone
                || mx >= quiet_zone + modules
                || my >= quiet_zone + modules
            {
                return Luma([255u8]);
            }
            match code[((mx - quiet_zone) as usize, (my - quiet_zone) as usize)] {
                Color::Dark => Luma([0u8]),
                Color::Light => Luma([255u8]),
            }
        });

        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| QrRenderError::Image(e.to_string()))?;

        Ok(buf.into_inner())
    }
}

impl QrRenderer for PngQrRenderer {
    fn render_data_url(&self, payload: &str) -> Result<String, QrRenderError> {
        let png = self.render_png(payload)?;
        Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png)))
    }
}
