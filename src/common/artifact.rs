use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::CommResult;

pub const ARTIFACT_EXT: &str = "png";

// Artifact kind
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ArtifactKind {
    Qr,
    Barcode,
}

impl ArtifactKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Qr => "qr",
            Self::Barcode => "barcode",
        }
    }

    /// `<prefix>_<ts>.png` for `seq == 0`, `<prefix>_<ts>_<seq>.png` otherwise.
    pub fn file_name(self, ts: i64, seq: u32) -> String {
        match seq {
            0 => format!("{}_{ts}.{ARTIFACT_EXT}", self.prefix()),
            n => format!("{}_{ts}_{n}.{ARTIFACT_EXT}", self.prefix()),
        }
    }
}

pub fn unix_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

// Creation
//------------------------------------------------------------------------------

/// Creates a fresh artifact file in `dir`. Files are opened with `create_new`, so two
/// encodes within the same second get increasing suffixes instead of clobbering each other.
pub fn create_artifact(dir: &Path, kind: ArtifactKind, ts: i64) -> CommResult<(PathBuf, File)> {
    let mut seq = 0;
    loop {
        let path = dir.join(kind.file_name(ts, seq));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path.display(), "artifact exists, bumping suffix");
                seq += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
