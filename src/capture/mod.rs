//! Live QR capture.
//!
//! A [`CaptureLoop`] pulls frames from a [`FrameSource`], looks for a QR symbol in each one,
//! outlines it and hands the frame to a [`FrameSink`] until the source runs dry or the operator
//! asks to stop. The camera and window backends are only built with the `webcam` feature.

#[cfg(feature = "webcam")]
mod camera;
mod overlay;
#[cfg(feature = "webcam")]
mod window;

#[cfg(feature = "webcam")]
pub use camera::Camera;
pub use overlay::Overlay;
#[cfg(feature = "webcam")]
pub use window::Window;

use std::io::Write;

use image::{imageops, RgbImage};

use crate::{
    common::{config::Config, error::CommResult},
    reader::detect_qr_luma,
};

/// Whether camera capture and display were compiled into this binary.
pub const CAPTURE_COMPILED: bool = cfg!(feature = "webcam");

// Seams
//------------------------------------------------------------------------------

pub trait FrameSource {
    /// Blocks until the next frame. `Ok(None)` marks the end of the stream.
    fn read_frame(&mut self) -> CommResult<Option<RgbImage>>;
}

pub trait FrameSink {
    /// `caption` carries the text decoded from this frame, if any.
    fn show(&mut self, frame: &RgbImage, caption: Option<&str>) -> CommResult<()>;

    /// Polled once per frame, must not block.
    fn cancel_requested(&mut self) -> bool;
}

// State
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum CaptureState {
    Idle,
    Capturing,
    Decoded,
    Reading,
    Stopped,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum StopReason {
    EndOfStream,
    ReadFailed,
    DisplayFailed,
    Cancelled,
}

#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct CaptureReport {
    pub frames: usize,
    pub decoded: usize,
    pub stop: Option<StopReason>,
}

// Capture loop
//------------------------------------------------------------------------------

pub struct CaptureLoop<S, K> {
    source: S,
    sink: K,
    overlay: Overlay,
    state: CaptureState,
    report: CaptureReport,
}

impl<S: FrameSource, K: FrameSink> CaptureLoop<S, K> {
    pub fn new(source: S, sink: K, overlay: Overlay) -> Self {
        Self { source, sink, overlay, state: CaptureState::Idle, report: CaptureReport::default() }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn report(&self) -> &CaptureReport {
        &self.report
    }

    /// Runs a single iteration. Decoded text is written to `out` as `Decoded: <text>`.
    pub fn step(&mut self, out: &mut impl Write) -> CommResult<CaptureState> {
        if self.state == CaptureState::Stopped {
            return Ok(self.state);
        }

        self.state = CaptureState::Capturing;
        let mut frame = match self.source.read_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return Ok(self.stop(StopReason::EndOfStream)),
            Err(e) => {
                tracing::warn!(error = %e, "frame read failed, stopping capture");
                return Ok(self.stop(StopReason::ReadFailed));
            }
        };
        self.report.frames += 1;

        let detection = detect_qr_luma(&imageops::grayscale(&frame)).filter(|d| !d.text.is_empty());
        self.state = match &detection {
            Some(det) => {
                self.overlay.annotate(&mut frame, det);
                writeln!(out, "Decoded: {}", det.text)?;
                self.report.decoded += 1;
                CaptureState::Decoded
            }
            None => CaptureState::Reading,
        };

        let caption = detection.as_ref().map(|d| d.text.as_str());
        if let Err(e) = self.sink.show(&frame, caption) {
            self.stop(StopReason::DisplayFailed);
            return Err(e);
        }

        if self.sink.cancel_requested() {
            return Ok(self.stop(StopReason::Cancelled));
        }
        Ok(self.state)
    }

    /// Steps until stopped. Source and sink are dropped, and so released, on return.
    pub fn run(mut self, out: &mut impl Write) -> CommResult<CaptureReport> {
        while self.step(out)? != CaptureState::Stopped {}
        tracing::info!(
            frames = self.report.frames,
            decoded = self.report.decoded,
            stop = ?self.report.stop,
            "capture finished"
        );
        Ok(self.report)
    }

    fn stop(&mut self, reason: StopReason) -> CaptureState {
        tracing::debug!(?reason, "capture stopping");
        self.report.stop = Some(reason);
        self.state = CaptureState::Stopped;
        self.state
    }
}

// Entry point
//------------------------------------------------------------------------------

/// Opens the configured camera and runs the capture loop against a display window.
#[cfg(feature = "webcam")]
pub fn run_camera(config: &Config, out: &mut impl Write) -> CommResult<CaptureReport> {
    let camera = Camera::open(config.camera)?;
    let overlay = Overlay::load(config.font.as_deref());
    writeln!(out, "Show a QR code to the camera. Press 'q' to quit.")?;
    CaptureLoop::new(camera, Window::new(), overlay).run(out)
}

#[cfg(not(feature = "webcam"))]
pub fn run_camera(config: &Config, out: &mut impl Write) -> CommResult<CaptureReport> {
    let _ = (config, out);
    tracing::debug!("live capture requested but support is unavailable");
    Err(crate::common::error::CommError::CaptureUnavailable)
}

/// Rebuilds a camera frame from raw RGB bytes. A buffer that doesn't match `width * height`
/// is a read failure, not the end of the stream.
#[cfg_attr(not(feature = "webcam"), allow(dead_code))]
pub(crate) fn frame_from_raw(width: u32, height: u32, raw: Vec<u8>) -> CommResult<RgbImage> {
    let len = raw.len();
    RgbImage::from_raw(width, height, raw).ok_or_else(|| {
        crate::common::error::CommError::FrameRead(format!(
            "{len} bytes do not fill a {width}x{height} RGB frame"
        ))
    })
}

/// Packs an RGB frame into the `0RGB` words a framebuffer window expects.
#[cfg_attr(not(feature = "webcam"), allow(dead_code))]
pub(crate) fn pack_0rgb(frame: &RgbImage, buf: &mut Vec<u32>) {
    buf.clear();
    buf.extend(
        frame.pixels().map(|p| (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2])),
    );
}
