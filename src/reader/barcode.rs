/// Whether a barcode decoder was compiled into this binary.
pub const BARCODE_DECODE_COMPILED: bool = cfg!(feature = "barcode-decode");

/// Scans `img` for any supported symbology and returns the first hit.
#[cfg(feature = "barcode-decode")]
pub fn scan_barcode(img: &image::DynamicImage) -> Option<String> {
    use rxing::BarcodeFormat;

    let luma = img.to_luma8();
    let (w, h) = luma.dimensions();
    match rxing::helpers::detect_in_luma(luma.into_raw(), w, h, None) {
        Ok(res) => {
            tracing::debug!(format = ?res.getBarcodeFormat(), "barcode found");
            // Code128 carries raw bytes which rxing hands back one char per byte
            match res.getBarcodeFormat() {
                BarcodeFormat::CODE_128 => Some(payload_text(res.getText())),
                _ => Some(res.getText().to_owned()),
            }
        }
        Err(e) => {
            tracing::debug!(error = ?e, "no barcode found");
            None
        }
    }
}

// Payload
//------------------------------------------------------------------------------

/// Reassembles the byte payload of a linear symbol and decodes it as UTF-8, replacing invalid
/// sequences with U+FFFD. Text that can't be a byte payload is returned as is.
#[cfg_attr(not(feature = "barcode-decode"), allow(dead_code))]
pub(crate) fn payload_text(text: &str) -> String {
    let bytes: Option<Vec<u8>> = text.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect();
    match bytes {
        Some(bytes) => {
            let (decoded, had_errors) = encoding_rs::UTF_8.decode_without_bom_handling(&bytes);
            if had_errors {
                tracing::debug!("replaced invalid utf-8 in barcode payload");
            }
            decoded.into_owned()
        }
        None => text.to_owned(),
    }
}
