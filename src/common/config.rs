use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_OUT_DIR: &str = "out";

/// Runtime settings. Every flag is optional; with none given the tool behaves as the plain
/// interactive menu writing into `./out`.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "qrcomm", version, about = "Send and receive text messages as QR codes and barcodes")]
pub struct Config {
    /// Directory receiving generated images
    #[arg(long, env = "QRCOMM_OUT_DIR", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Camera device index used for live QR capture
    #[arg(long, env = "QRCOMM_CAMERA", default_value_t = 0)]
    pub camera: u32,

    /// TrueType font used to print decoded text over camera frames
    #[arg(long, env = "QRCOMM_FONT")]
    pub font: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self { out_dir: PathBuf::from(DEFAULT_OUT_DIR), camera: 0, font: None }
    }
}
