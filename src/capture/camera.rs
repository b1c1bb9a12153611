use image::RgbImage;
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{CameraIndex, RequestedFormat, RequestedFormatType},
};

use super::{frame_from_raw, FrameSource};
use crate::common::error::{CommError, CommResult};

/// A native camera stream. The stream is stopped when the value is dropped.
pub struct Camera {
    inner: nokhwa::Camera,
    index: u32,
}

impl Camera {
    pub fn open(index: u32) -> CommResult<Self> {
        let unavailable = |e: nokhwa::NokhwaError| {
            tracing::debug!(index, error = %e, "camera unavailable");
            CommError::CameraUnavailable { index, reason: e.to_string() }
        };

        let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut inner = nokhwa::Camera::new(CameraIndex::Index(index), format).map_err(unavailable)?;
        inner.open_stream().map_err(unavailable)?;

        tracing::debug!(index, format = ?inner.camera_format(), "camera stream open");
        Ok(Self { inner, index })
    }
}

impl FrameSource for Camera {
    fn read_frame(&mut self) -> CommResult<Option<RgbImage>> {
        let buf = self.inner.frame().map_err(|e| CommError::FrameRead(e.to_string()))?;
        let decoded =
            buf.decode_image::<RgbFormat>().map_err(|e| CommError::FrameRead(e.to_string()))?;

        // Rebuilt from raw parts so nokhwa's image version never leaks out
        let (w, h) = (decoded.width(), decoded.height());
        frame_from_raw(w, h, decoded.into_raw()).map(Some)
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        match self.inner.stop_stream() {
            Ok(()) => tracing::debug!(index = self.index, "camera released"),
            Err(e) => tracing::warn!(index = self.index, error = %e, "camera release failed"),
        }
    }
}
