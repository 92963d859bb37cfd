//! Frame tracing: decode one frame layer by layer and render each layer as
//! soon as it is decoded.
//!
//! Rendering follows the decode order, so a fatal error part way through
//! leaves everything rendered so far intact and appends a note. NetRom
//! problems are rendered inline and do not change the frame status.

mod render;
mod writer;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::protocols::ax25::control::parse_control;
use crate::protocols::ax25::layout::MAX_FRAME_LEN;
use crate::protocols::ax25::pid::parse_payload;
use crate::protocols::ax25::{Ax25Error, Envelope, parse_header, split_envelope};
use render::{render_control, render_header, render_payload};
use writer::TraceWriter;

/// Current trace schema version.
pub const TRACE_VERSION: u32 = 1;

/// How far decoding of a frame got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStatus {
    /// AX.25 frame decoded, including frames with NetRom-level notes.
    Decoded,
    /// 2-byte acknowledgement of a sent frame.
    AckReply,
    /// Fewer bytes than the smallest valid AX.25 header.
    TooShort,
    /// Frame ended inside the control field or payload header.
    Truncated,
}

impl TraceStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, TraceStatus::Decoded | TraceStatus::AckReply)
    }
}

/// Rendered trace of a single frame.
///
/// # Examples
/// ```
/// use ax25trace_core::{TraceStatus, trace_frame};
///
/// let trace = trace_frame(&[0x34, 0x12]);
/// assert_eq!(trace.status, TraceStatus::AckReply);
/// assert_eq!(trace.to_text(), "AckRply: [4660]\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Trace schema version (not the binary version).
    pub report_version: u32,
    /// Length of the capture as decoded, at most `MAX_FRAME_LEN`.
    pub frame_len: usize,
    pub status: TraceStatus,
    /// Rendered lines, without terminators.
    pub lines: Vec<String>,
}

impl Trace {
    /// Console rendering, one `\n` after every line.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// Decode and render one captured frame.
///
/// Bytes past [`MAX_FRAME_LEN`] are ignored and not counted in
/// [`Trace::frame_len`].
pub fn trace_frame(bytes: &[u8]) -> Trace {
    let bytes = &bytes[..bytes.len().min(MAX_FRAME_LEN)];
    let mut out = TraceWriter::new();
    let status = match render_frame(&mut out, bytes) {
        Ok(status) => status,
        Err(err) => {
            debug!(%err, frame_len = bytes.len(), "frame decode stopped");
            out.break_line();
            out.push(format_args!("({err})"));
            out.end_line();
            match err {
                Ax25Error::TooShort { .. } => TraceStatus::TooShort,
                Ax25Error::MissingControl | Ax25Error::Truncated(_) => TraceStatus::Truncated,
            }
        }
    };

    Trace {
        report_version: TRACE_VERSION,
        frame_len: bytes.len(),
        status,
        lines: out.into_lines(),
    }
}

fn render_frame(out: &mut TraceWriter, bytes: &[u8]) -> Result<TraceStatus, Ax25Error> {
    let cursor = match split_envelope(bytes) {
        Envelope::AckReply { sequence } => {
            out.push(format_args!("AckRply: [{sequence}]"));
            out.end_line();
            return Ok(TraceStatus::AckReply);
        }
        Envelope::Ax25 { ack_request, frame } => {
            if let Some(sequence) = ack_request {
                out.push(format_args!("AckRqst: [{sequence}]"));
            }
            frame
        }
    };

    let (header, rest) = parse_header(cursor)?;
    render_header(out, &header);

    let (control, rest) = parse_control(rest, &header.destination, &header.source)?;
    render_control(out, &control, header.source.is_dama());
    if !control.frame_type.carries_payload() {
        out.end_line();
        return Ok(TraceStatus::Decoded);
    }

    let payload = parse_payload(rest, control.frame_type)?;
    render_payload(out, &payload);
    Ok(TraceStatus::Decoded)
}
