//! Interactive menu driving the encoders, decoders and live capture.

use std::io::{BufRead, Write};

use crate::{
    builder::Encoder,
    capture::run_camera,
    common::{config::Config, error::CommResult},
    reader::Decoder,
};

pub const MENU: &str = "\n=== QR & Barcode Communication ===
1) Send message as QR
2) Receive message from QR image
3) Receive message from QR via webcam
4) Send message as Barcode (Code128)
5) Receive message from Barcode image
0) Exit";

pub const FAREWELL: &str = "Bye!";

// Choice
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Choice {
    SendQr,
    ReceiveQrImage,
    ReceiveQrCamera,
    SendBarcode,
    ReceiveBarcodeImage,
    Exit,
}

impl Choice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::SendQr),
            "2" => Some(Self::ReceiveQrImage),
            "3" => Some(Self::ReceiveQrCamera),
            "4" => Some(Self::SendBarcode),
            "5" => Some(Self::ReceiveBarcodeImage),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Trims whitespace and any surrounding double quotes, as left by drag-and-drop or
/// "copy as path".
pub fn clean_path(input: &str) -> &str {
    input.trim().trim_matches('"')
}

// Shell
//------------------------------------------------------------------------------

enum Flow {
    Continue,
    Exit,
}

pub struct Shell<R, W> {
    input: R,
    out: W,
    config: Config,
    encoder: Encoder,
    decoder: Decoder,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Fails only if the output directory can't be created.
    pub fn new(input: R, out: W, config: Config) -> CommResult<Self> {
        let encoder = Encoder::new(&config.out_dir)?;
        Ok(Self::with_parts(input, out, config, encoder, Decoder::new()))
    }

    pub fn with_parts(input: R, out: W, config: Config, encoder: Encoder, decoder: Decoder) -> Self {
        Self { input, out, config, encoder, decoder }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until the operator picks `0` or input ends. Action failures are reported and the
    /// menu comes back; only errors writing to the output end the loop early.
    pub fn run(&mut self) -> CommResult<()> {
        loop {
            writeln!(self.out, "{MENU}")?;
            let Some(line) = self.prompt("Choose: ")? else {
                return self.farewell();
            };

            let flow = match Choice::parse(&line) {
                Some(choice) => self.dispatch(choice)?,
                None => {
                    writeln!(self.out, "Invalid choice. Try again.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                return self.farewell();
            }
        }
    }

    fn dispatch(&mut self, choice: Choice) -> CommResult<Flow> {
        tracing::debug!(?choice, "dispatching");
        match choice {
            Choice::SendQr => {
                let Some(text) = self.prompt("Enter message to send: ")? else {
                    return Ok(Flow::Exit);
                };
                match self.encoder.encode_qr(&text) {
                    Ok(path) => writeln!(self.out, "Saved QR to: {}", path.display())?,
                    Err(e) => writeln!(self.out, "Error: {e}")?,
                }
            }
            Choice::ReceiveQrImage => {
                let Some(path) = self.prompt("Enter QR image path: ")? else {
                    return Ok(Flow::Exit);
                };
                let res = self.decoder.decode_qr_from_image(clean_path(&path));
                self.report_decoded(res, "No QR detected / couldn't decode.")?;
            }
            Choice::ReceiveQrCamera => {
                if let Err(e) = run_camera(&self.config, &mut self.out) {
                    writeln!(self.out, "{e}")?;
                }
            }
            Choice::SendBarcode => {
                let Some(text) = self.prompt("Enter message to send: ")? else {
                    return Ok(Flow::Exit);
                };
                match self.encoder.encode_barcode(&text) {
                    Ok(path) => writeln!(self.out, "Saved Barcode to: {}", path.display())?,
                    Err(e) => writeln!(self.out, "Error: {e}")?,
                }
            }
            Choice::ReceiveBarcodeImage => {
                let Some(path) = self.prompt("Enter Barcode image path: ")? else {
                    return Ok(Flow::Exit);
                };
                let res = self.decoder.decode_barcode_from_image(clean_path(&path));
                self.report_decoded(res, "No barcode detected / couldn't decode.")?;
            }
            Choice::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn report_decoded(&mut self, res: CommResult<Option<String>>, not_found: &str) -> CommResult<()> {
        match res {
            Ok(Some(text)) => writeln!(self.out, "Received message: {text}")?,
            Ok(None) => writeln!(self.out, "{not_found}")?,
            Err(e) => {
                writeln!(self.out, "{e}")?;
                writeln!(self.out, "{not_found}")?;
            }
        }
        Ok(())
    }

    /// Reads one line without its line ending. `None` once input is exhausted.
    fn prompt(&mut self, msg: &str) -> CommResult<Option<String>> {
        write!(self.out, "{msg}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // Keep the farewell off the prompt line
            writeln!(self.out)?;
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn farewell(&mut self) -> CommResult<()> {
        writeln!(self.out, "{FAREWELL}")?;
        self.out.flush()?;
        Ok(())
    }
}
