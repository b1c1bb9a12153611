use image::RgbImage;
use minifb::{Key, WindowOptions};

use super::{pack_0rgb, FrameSink};
use crate::common::error::{CommError, CommResult};

pub const WINDOW_TITLE: &str = "QR Receiver";
pub const QUIT_KEY: Key = Key::Q;

/// A framebuffer window, opened on the first frame so it can match the camera resolution.
/// Closing the window counts as a cancel request. The window closes when dropped.
#[derive(Default)]
pub struct Window {
    inner: Option<minifb::Window>,
    size: (usize, usize),
    buffer: Vec<u32>,
    title: String,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&mut self, size: (usize, usize)) -> CommResult<()> {
        if self.inner.is_some() && self.size == size {
            return Ok(());
        }

        // Drop any previous window before opening a new one
        self.inner = None;
        let win = minifb::Window::new(WINDOW_TITLE, size.0, size.1, WindowOptions::default())
            .map_err(|e| CommError::Display(e.to_string()))?;
        tracing::debug!(width = size.0, height = size.1, "window opened");

        self.inner = Some(win);
        self.size = size;
        self.title = WINDOW_TITLE.to_string();
        Ok(())
    }
}

impl FrameSink for Window {
    fn show(&mut self, frame: &RgbImage, caption: Option<&str>) -> CommResult<()> {
        let (w, h) = (frame.width() as usize, frame.height() as usize);
        self.ensure_open((w, h))?;
        pack_0rgb(frame, &mut self.buffer);

        let title = match caption {
            Some(text) => format!("{WINDOW_TITLE} - {text}"),
            None => WINDOW_TITLE.to_string(),
        };

        let Some(win) = self.inner.as_mut() else {
            return Err(CommError::Display("window closed".into()));
        };
        if title != self.title {
            win.set_title(&title);
            self.title = title;
        }
        win.update_with_buffer(&self.buffer, w, h).map_err(|e| CommError::Display(e.to_string()))
    }

    fn cancel_requested(&mut self) -> bool {
        self.inner.as_ref().is_some_and(|win| !win.is_open() || win.is_key_down(QUIT_KEY))
    }
}
