use std::fmt::{Debug, Display, Error, Formatter};
use std::path::PathBuf;

// Error
//------------------------------------------------------------------------------

#[derive(Debug)]
pub enum CommError {
    // Filesystem
    Io(std::io::Error),
    ImageRead { path: PathBuf, reason: String },
    ImageWrite { path: PathBuf, reason: String },

    // Encoders
    QrEncode(String),
    BarcodeEncode(String),

    // Decoders
    BarcodeDecodeUnavailable,

    // Capture
    CaptureUnavailable,
    CameraUnavailable { index: u32, reason: String },
    FrameRead(String),
    Display(String),
}

impl Display for CommError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            // Filesystem
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ImageRead { path, reason } => {
                write!(f, "Could not read image {}: {reason}. Check path.", path.display())
            }
            Self::ImageWrite { path, reason } => {
                write!(f, "Could not write image {}: {reason}", path.display())
            }

            // Encoders
            Self::QrEncode(reason) => write!(f, "QR encoding failed: {reason}"),
            Self::BarcodeEncode(reason) => write!(f, "Barcode encoding failed: {reason}"),

            // Decoders
            Self::BarcodeDecodeUnavailable => f.write_str(
                "Barcode decoding is disabled (rxing not compiled in). \
                 Rebuild with `--features barcode-decode` to enable it.",
            ),

            // Capture
            Self::CaptureUnavailable => f.write_str(
                "Live camera capture is disabled (nokhwa/minifb not compiled in). \
                 Rebuild with `--features webcam` to enable it.",
            ),
            Self::CameraUnavailable { index, reason } => {
                write!(f, "Could not open camera {index}: {reason}")
            }
            Self::FrameRead(reason) => write!(f, "Could not read frame: {reason}"),
            Self::Display(reason) => write!(f, "Could not display frame: {reason}"),
        }
    }
}

impl std::error::Error for CommError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CommError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub type CommResult<T> = Result<T, CommError>;

#[cfg(test)]
mod error_tests {
    use std::path::PathBuf;

    use super::CommError;

    #[test]
    fn test_unavailable_names_dependency() {
        let msg = CommError::BarcodeDecodeUnavailable.to_string();
        assert!(msg.contains("rxing"));
        assert!(msg.contains("barcode-decode"));
    }

    #[test]
    fn test_image_read_mentions_path() {
        let err =
            CommError::ImageRead { path: PathBuf::from("missing.png"), reason: "nope".into() };
        assert_eq!(err.to_string(), "Could not read image missing.png: nope. Check path.");
    }

    #[test]
    fn test_io_source() {
        let err = CommError::from(std::io::Error::other("disk full"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
