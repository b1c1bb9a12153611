use barcoders::sym::code128::Code128;
use image::{GrayImage, Luma};

use crate::common::error::{CommError, CommResult};

/// Character set B selector understood by `barcoders`. Covers printable ASCII.
const CHARSET_B: char = 'Ɓ';

pub const BAR_MODULE_PX: u32 = 3;
pub const BAR_HEIGHT_PX: u32 = 120;
pub const BAR_QUIET_MODULES: u32 = 10;

/// Renders `text` as a Code128 symbol. Empty text, characters outside printable ASCII and
/// anything `barcoders` refuses are returned as [`CommError::BarcodeEncode`] without any
/// attempt at recovery.
pub fn render_barcode(text: &str) -> CommResult<GrayImage> {
    check_charset_b(text)?;
    let code = Code128::new(format!("{CHARSET_B}{text}"))
        .map_err(|e| CommError::BarcodeEncode(e.to_string()))?;
    let modules = code.encode();
    tracing::debug!(modules = modules.len(), "encoded code128");
    Ok(rasterize(&modules))
}

// `barcoders` reads the set selectors anywhere in its input, so they and everything else
// outside set B must be refused before the selector prefix is added.
fn check_charset_b(text: &str) -> CommResult<()> {
    if text.is_empty() {
        return Err(CommError::BarcodeEncode("message is empty".into()));
    }
    match text.chars().find(|c| !(' '..='~').contains(c)) {
        Some(c) => Err(CommError::BarcodeEncode(format!(
            "character {c:?} is outside Code128 set B (printable ASCII)"
        ))),
        None => Ok(()),
    }
}

// Rasterisation
//------------------------------------------------------------------------------

fn rasterize(modules: &[u8]) -> GrayImage {
    let quiet = BAR_QUIET_MODULES as usize;
    let width = (modules.len() as u32 + 2 * BAR_QUIET_MODULES) * BAR_MODULE_PX;
    GrayImage::from_fn(width, BAR_HEIGHT_PX, |x, _| {
        let idx = (x / BAR_MODULE_PX) as usize;
        let dark = idx.checked_sub(quiet).and_then(|i| modules.get(i)).is_some_and(|m| *m == 1);
        if dark {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

#[cfg(test)]
mod code128_tests {
    use test_case::test_case;

    use super::{rasterize, render_barcode, BAR_HEIGHT_PX, BAR_MODULE_PX, BAR_QUIET_MODULES};
    use crate::common::error::CommError;

    #[test]
    fn test_rasterize() {
        let img = rasterize(&[1, 0, 1, 1]);
        let q = BAR_QUIET_MODULES * BAR_MODULE_PX;

        assert_eq!(img.width(), (4 + 2 * BAR_QUIET_MODULES) * BAR_MODULE_PX);
        assert_eq!(img.height(), BAR_HEIGHT_PX);
        assert_eq!(img.get_pixel(0, 0).0[0], 255);
        assert_eq!(img.get_pixel(q, 5).0[0], 0);
        assert_eq!(img.get_pixel(q + BAR_MODULE_PX, 5).0[0], 255);
        assert_eq!(img.get_pixel(q + 3 * BAR_MODULE_PX, 5).0[0], 0);
        assert_eq!(img.get_pixel(img.width() - 1, 5).0[0], 255);
    }

    #[test_case("HELLO")]
    #[test_case("Hello, world! 123")]
    #[test_case("~{}|")]
    fn test_printable_ascii(data: &str) {
        let img = render_barcode(data).unwrap();
        let q = BAR_QUIET_MODULES * BAR_MODULE_PX;

        // At least start, data, check & stop symbols of 11 modules each
        assert!(img.width() >= ((data.len() as u32 + 3) * 11 + 2 * BAR_QUIET_MODULES) * BAR_MODULE_PX);
        assert_eq!(img.width() % BAR_MODULE_PX, 0);
        assert!((0..q).all(|x| img.get_pixel(x, 0).0[0] == 255));
        // Every Code128 symbol starts with a bar
        assert_eq!(img.get_pixel(q, 0).0[0], 0);
    }

    #[test_case(""; "empty")]
    #[test_case("naïve")]
    #[test_case("tab\there")]
    #[test_case("abĆ12"; "set c selector")]
    #[test_case("HELLOÀ\t"; "set a selector then tab")]
    #[test_case("ƁHELLO"; "set b selector")]
    fn test_rejected(data: &str) {
        assert!(matches!(render_barcode(data), Err(CommError::BarcodeEncode(_))));
    }
}
