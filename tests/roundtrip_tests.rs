#[cfg(test)]
mod qr_proptests {

    use proptest::prelude::*;

    use qrcomm::{detect_qr, render_qr};

    fn roundtrip(data: &str) -> Option<String> {
        let img = image::DynamicImage::ImageLuma8(render_qr(data).unwrap());
        detect_qr(&img).map(|d| d.text)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn proptest_printable(data in "[ -~]{1,64}") {
            prop_assert_eq!(roundtrip(&data), Some(data));
        }

        #[test]
        fn proptest_unicode(data in "\\PC{1,24}") {
            prop_assert_eq!(roundtrip(&data), Some(data));
        }
    }

    proptest! {
        #[test]
        #[ignore]
        fn proptest_long(data in "[0-9A-Za-z]{200,1200}") {
            prop_assert_eq!(roundtrip(&data), Some(data));
        }
    }
}

#[cfg(test)]
mod qr_tests {
    use test_case::test_case;

    use qrcomm::{Decoder, Encoder};

    #[test_case("HELLO"; "test_qr_1")]
    #[test_case("Hello, world!🌎"; "test_qr_2")]
    #[test_case("1234567890"; "test_qr_3")]
    #[test_case("https://example.com/?q=qr&lang=en"; "test_qr_4")]
    #[test_case(&"B3@j🎮#Z%8v🍣K!🔑3zC^8📖&r💾F9*🔐b6🌼".repeat(4); "test_qr_5")]
    #[test_case(&"A11111111111111".repeat(20); "test_qr_6")]
    fn test_qr_file(data: &str) {
        let tmp = tempfile::tempdir().unwrap();
        let path = Encoder::new(tmp.path()).unwrap().encode_qr(data).unwrap();

        let decoded = Decoder::new().decode_qr_from_image(&path).expect("Failed to read image");
        assert_eq!(decoded.as_deref(), Some(data));
    }

    #[test]
    fn test_barcode_is_not_qr() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Encoder::new(tmp.path()).unwrap().encode_barcode("HELLO").unwrap();

        assert_eq!(Decoder::new().decode_qr_from_image(&path).unwrap(), None);
    }
}

#[cfg(feature = "barcode-decode")]
mod barcode_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use qrcomm::{Decoder, Encoder};

    #[test_case("HELLO"; "test_barcode_1")]
    #[test_case("Code 128!"; "test_barcode_2")]
    #[test_case("abc-123/xyz"; "test_barcode_3")]
    #[test_case("{curly} [square] ~tilde~"; "test_barcode_4")]
    fn test_barcode_file(data: &str) {
        let tmp = tempfile::tempdir().unwrap();
        let path = Encoder::new(tmp.path()).unwrap().encode_barcode(data).unwrap();

        let decoded = Decoder::new().decode_barcode_from_image(&path).expect("Failed to read image");
        assert_eq!(decoded.as_deref(), Some(data));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn proptest_barcode(data in "[ -~]{1,24}") {
            let tmp = tempfile::tempdir().unwrap();
            let path = Encoder::new(tmp.path()).unwrap().encode_barcode(&data).unwrap();

            let decoded = Decoder::new().decode_barcode_from_image(&path).unwrap();
            prop_assert_eq!(decoded, Some(data));
        }
    }
}

#[cfg(not(feature = "barcode-decode"))]
mod barcode_unavailable_tests {
    use qrcomm::{CommError, Decoder, Encoder};

    #[test]
    fn test_barcode_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Encoder::new(tmp.path()).unwrap().encode_barcode("HELLO").unwrap();

        let dec = Decoder::new();
        assert!(!dec.barcode_available());
        assert!(matches!(
            dec.decode_barcode_from_image(&path),
            Err(CommError::BarcodeDecodeUnavailable)
        ));
    }
}
