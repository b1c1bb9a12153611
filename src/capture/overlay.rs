use std::path::{Path, PathBuf};

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_text_mut};

use crate::reader::Detection;

pub const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const TEXT_COLOR: Rgb<u8> = Rgb([0, 200, 0]);
const OUTLINE_PX: u32 = 2;
const TEXT_SCALE: f32 = 28.0;
const TEXT_ORIGIN: (i32, i32) = (10, 10);

/// Searched in order when no font is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

// Overlay
//------------------------------------------------------------------------------

/// Draws detection feedback onto camera frames. The outline is always drawn, the decoded
/// text only when a font could be loaded.
#[derive(Clone, Default)]
pub struct Overlay {
    font: Option<FontArc>,
}

impl Overlay {
    pub fn new(font: Option<FontArc>) -> Self {
        Self { font }
    }

    /// Loads `configured` if given, otherwise the first usable system font.
    pub fn load(configured: Option<&Path>) -> Self {
        let candidates: Vec<PathBuf> = match configured {
            Some(p) => vec![p.to_path_buf()],
            None => FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
        };

        let font = candidates.iter().find_map(|p| match load_font(p) {
            Ok(font) => {
                tracing::debug!(path = %p.display(), "overlay font loaded");
                Some(font)
            }
            Err(reason) => {
                if configured.is_some() {
                    tracing::warn!(path = %p.display(), %reason, "overlay font unusable");
                }
                None
            }
        });

        if font.is_none() {
            tracing::info!("no overlay font, decoded text goes to the window title only");
        }
        Self { font }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn annotate(&self, frame: &mut RgbImage, det: &Detection) {
        draw_outline(frame, &det.bounds);
        if let Some(font) = &self.font {
            let (x, y) = TEXT_ORIGIN;
            draw_text_mut(frame, TEXT_COLOR, x, y, PxScale::from(TEXT_SCALE), font, &det.text);
        }
    }
}

fn load_font(path: &Path) -> Result<FontArc, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    FontArc::try_from_vec(bytes).map_err(|e| e.to_string())
}

fn draw_outline(frame: &mut RgbImage, bounds: &[(i32, i32); 4]) {
    for (i, &(x0, y0)) in bounds.iter().enumerate() {
        let (x1, y1) = bounds[(i + 1) % bounds.len()];
        for off in 0..OUTLINE_PX {
            let off = off as f32;
            draw_line_segment_mut(
                frame,
                (x0 as f32 + off, y0 as f32 + off),
                (x1 as f32 + off, y1 as f32 + off),
                OUTLINE_COLOR,
            );
        }
    }
}
