use image::{GrayImage, Luma};
use qrcode::QrCode;

use crate::common::error::{CommError, CommResult};

/// Pixel width of a single module in rendered QR images
pub const QR_MODULE_PX: u32 = 8;

/// Renders `text` as a QR symbol with a 4 module quiet zone. The version and error correction
/// level are left to `qrcode`, which picks the smallest version that fits at level M.
pub fn render_qr(text: &str) -> CommResult<GrayImage> {
    let code = QrCode::new(text.as_bytes()).map_err(|e| CommError::QrEncode(e.to_string()))?;
    let img = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(QR_MODULE_PX, QR_MODULE_PX)
        .build();
    tracing::debug!(width = img.width(), version = ?code.version(), "rendered qr");
    Ok(img)
}
