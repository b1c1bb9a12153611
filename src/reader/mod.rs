mod barcode;

pub use barcode::BARCODE_DECODE_COMPILED;

use std::path::Path;

use image::{DynamicImage, GrayImage};

use crate::common::error::{CommError, CommResult};

// Detection
//------------------------------------------------------------------------------

/// A decoded QR symbol together with its four corners in image coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub text: String,
    pub bounds: [(i32, i32); 4],
}

pub fn detect_qr(img: &DynamicImage) -> Option<Detection> {
    detect_qr_luma(&img.to_luma8())
}

/// Returns the first grid that decodes. Grids that are located but fail to decode are skipped.
pub fn detect_qr_luma(img: &GrayImage) -> Option<Detection> {
    let (w, h) = img.dimensions();
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
            img.get_pixel(x as u32, y as u32).0[0]
        });

    for grid in prepared.detect_grids() {
        match grid.decode() {
            Ok((_meta, text)) => {
                let bounds = grid.bounds.map(|p| (p.x, p.y));
                return Some(Detection { text, bounds });
            }
            Err(e) => tracing::debug!(error = ?e, "qr grid located but not decoded"),
        }
    }
    None
}

// Decoder
//------------------------------------------------------------------------------

/// Reads messages back from image files. Barcode support is a capability fixed when the
/// decoder is built; it is only available if the `barcode-decode` feature was compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    barcode_available: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self { barcode_available: BARCODE_DECODE_COMPILED }
    }

    /// Requesting support that wasn't compiled in still leaves it disabled.
    pub fn with_barcode_support(enabled: bool) -> Self {
        Self { barcode_available: enabled && BARCODE_DECODE_COMPILED }
    }

    pub fn barcode_available(&self) -> bool {
        self.barcode_available
    }

    /// `Ok(None)` means the image was read but holds no QR symbol, or one with an empty
    /// payload.
    pub fn decode_qr_from_image(&self, path: impl AsRef<Path>) -> CommResult<Option<String>> {
        let img = open_image(path.as_ref())?;
        Ok(detect_qr(&img).map(|d| d.text).filter(|text| !text.is_empty()))
    }

    /// `Ok(None)` means the image was read but holds no barcode.
    pub fn decode_barcode_from_image(&self, path: impl AsRef<Path>) -> CommResult<Option<String>> {
        if !self.barcode_available {
            tracing::debug!("barcode decode requested but support is unavailable");
            return Err(CommError::BarcodeDecodeUnavailable);
        }

        #[cfg(feature = "barcode-decode")]
        {
            let img = open_image(path.as_ref())?;
            Ok(barcode::scan_barcode(&img))
        }

        #[cfg(not(feature = "barcode-decode"))]
        {
            let _ = path;
            Err(CommError::BarcodeDecodeUnavailable)
        }
    }
}

fn open_image(path: &Path) -> CommResult<DynamicImage> {
    image::open(path).map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "could not read image");
        CommError::ImageRead { path: path.to_path_buf(), reason: e.to_string() }
    })
}
