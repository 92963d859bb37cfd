//! Frame sources.
//!
//! A source delivers one already-delimited capture. Sources own all I/O so
//! the decoders stay pure. Captures longer than [`MAX_FRAME_LEN`] are cut
//! at the cap and flagged.

mod hex;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::MAX_FRAME_LEN;

pub use hex::parse_hex;

/// Raw capture bytes as delivered by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub data: Vec<u8>,
    /// The input was longer than the cap and has been cut.
    pub truncated: bool,
}

pub trait FrameSource {
    fn read_frame(&mut self) -> Result<RawFrame, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex digit {found:?} on line {line}")]
    InvalidHex { line: usize, found: char },
    #[error("odd number of hex digits")]
    OddHexDigits,
}

/// How the bytes of a capture are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputEncoding {
    /// Raw frame bytes.
    #[default]
    Binary,
    /// Hexadecimal text; whitespace and `#` comments are ignored.
    Hex,
}

/// Reads a whole stream as a single frame.
pub struct ReaderSource<R> {
    reader: R,
    encoding: InputEncoding,
    limit: usize,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R, encoding: InputEncoding) -> Self {
        Self {
            reader,
            encoding,
            limit: MAX_FRAME_LEN,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl ReaderSource<File> {
    pub fn open(path: &Path, encoding: InputEncoding) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::new(file, encoding))
    }
}

impl<R: Read> FrameSource for ReaderSource<R> {
    fn read_frame(&mut self) -> Result<RawFrame, SourceError> {
        let mut data = match self.encoding {
            InputEncoding::Binary => {
                let mut data = Vec::new();
                let cap = u64::try_from(self.limit).unwrap_or(u64::MAX).saturating_add(1);
                (&mut self.reader).take(cap).read_to_end(&mut data)?;
                data
            }
            InputEncoding::Hex => {
                let mut text = String::new();
                self.reader.read_to_string(&mut text)?;
                parse_hex(&text)?
            }
        };

        let truncated = data.len() > self.limit;
        if truncated {
            debug!(limit = self.limit, "capture exceeds frame cap; extra bytes ignored");
            data.truncate(self.limit);
        }
        Ok(RawFrame { data, truncated })
    }
}
