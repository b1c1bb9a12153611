//! # qrcomm
//!
//! Send short text messages as QR codes or Code128 barcodes and read them back, either from
//! an image file or from a live camera feed.
//!
//! ## Features
//!
//! - **QR Sending**: Render a message as a QR code and save it as a PNG artifact
//! - **Barcode Sending**: Render printable ASCII as a Code128 barcode
//! - **Image Reading**: Decode QR codes and barcodes from image files
//! - **Live Reading**: Outline and print QR codes seen by a camera (`webcam` feature)
//!
//! ## Quick Start
//!
//! ### Sending a message
//!
//! ```rust,no_run
//! use qrcomm::Encoder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let encoder = Encoder::new("out")?;   // Creates ./out if missing
//! let path = encoder.encode_qr("HELLO")?;
//! println!("Saved QR to: {}", path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ### Receiving a message
//!
//! ```rust,no_run
//! use qrcomm::Decoder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let decoder = Decoder::new();
//! match decoder.decode_qr_from_image("out/qr_1700000000.png")? {
//!     Some(msg) => println!("Received message: {msg}"),
//!     None => println!("No QR detected"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Artifacts
//!
//! Every encode writes a new file named `qr_<unix-seconds>.png` or
//! `barcode_<unix-seconds>.png`. When two encodes land in the same second a `_1`, `_2`, ...
//! suffix is added, existing files are never overwritten.
//!
//! ## Cargo Features
//!
//! - **barcode-decode** (default): Barcode reading through `rxing`. Without it
//!   [`Decoder::decode_barcode_from_image`] reports the capability as unavailable
//! - **webcam**: Camera capture through `nokhwa` and a preview window through `minifb`

pub mod builder;
pub mod capture;
pub mod common;
pub mod reader;
pub mod shell;

pub use builder::{render_barcode, render_qr, Encoder};
pub use capture::{CaptureLoop, CaptureReport, CaptureState, FrameSink, FrameSource, Overlay};
pub use common::{ArtifactKind, CommError, CommResult, Config};
pub use reader::{detect_qr, Decoder, Detection};
pub use shell::Shell;
