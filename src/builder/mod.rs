mod code128;
mod qr;

pub use code128::render_barcode;
pub use qr::render_qr;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat};

use crate::common::{
    artifact::{create_artifact, unix_timestamp, ArtifactKind},
    error::{CommError, CommResult},
};

/// Turns messages into image artifacts inside a single output directory.
#[derive(Debug, Clone)]
pub struct Encoder {
    out_dir: PathBuf,
}

impl Encoder {
    /// Creates the output directory if it is missing.
    pub fn new(out_dir: impl Into<PathBuf>) -> CommResult<Self> {
        let out_dir = out_dir.into();
        fs::create_dir_all(&out_dir)?;
        Ok(Self { out_dir })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn encode_qr(&self, text: &str) -> CommResult<PathBuf> {
        let img = render_qr(text)?;
        self.save(ArtifactKind::Qr, &img)
    }

    pub fn encode_barcode(&self, text: &str) -> CommResult<PathBuf> {
        let img = render_barcode(text)?;
        self.save(ArtifactKind::Barcode, &img)
    }

    fn save(&self, kind: ArtifactKind, img: &GrayImage) -> CommResult<PathBuf> {
        // The directory may have been removed since startup
        fs::create_dir_all(&self.out_dir)?;

        let (path, file) = create_artifact(&self.out_dir, kind, unix_timestamp())?;
        let mut writer = BufWriter::new(file);
        let res = img
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| e.to_string())
            .and_then(|_| writer.flush().map_err(|e| e.to_string()));

        if let Err(reason) = res {
            let _ = fs::remove_file(&path);
            return Err(CommError::ImageWrite { path, reason });
        }

        tracing::debug!(path = %path.display(), kind = kind.prefix(), "saved artifact");
        Ok(path)
    }
}
