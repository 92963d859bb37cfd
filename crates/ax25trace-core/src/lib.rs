//! ax25trace core library for single-frame AX.25 and NetRom diagnostics.
//!
//! One captured frame goes in, a human-readable trace comes out. Decoding
//! is layered (envelope -> addresses -> control -> protocol id -> NetRom
//! L3 -> NetRom L4) and each layer is rendered as soon as it decodes, so a
//! truncated frame still shows everything up to the point of failure.
//!
//! Parsing is byte-oriented and side-effect free; all I/O is isolated in
//! the `source` module.
//!
//! Invariants:
//! - No byte outside the capture is ever read.
//! - Rendering is deterministic for a given input.
//! - NetRom-level problems never fail the enclosing AX.25 frame.
//!
//! # Examples
//! ```
//! use ax25trace_core::trace_frame;
//!
//! let mut frame = Vec::new();
//! for (call, flags) in [(b"ID    ", 0xe0u8), (b"G8PZT ", 0x63u8)] {
//!     frame.extend(call.iter().map(|b| b << 1));
//!     frame.push(flags);
//! }
//! frame.extend_from_slice(&[0x03, 0xf0]);
//! frame.extend_from_slice(b"hi");
//!
//! let trace = trace_frame(&frame);
//! assert_eq!(trace.lines[0], "G8PZT-1 > ID <UI C> ilen=2 pid=240 DATA:");
//! assert_eq!(trace.lines[1], "hi");
//! ```

mod protocols;
mod source;
mod trace;

#[cfg(test)]
mod testutil;

pub use protocols::ax25::layout::{MAX_FRAME_LEN, MIN_FRAME_LEN};
pub use protocols::ax25::{
    Address, AddressRole, Ax25Error, CommandResponse, ControlField, Decoded, Envelope, Frame,
    FrameType, Header, Modulo, Payload, PayloadBody, ProtocolId, Segmentation, decode_frame,
    split_envelope,
};
pub use protocols::common::Truncated;
pub use protocols::netrom::{
    L4Flags, NetRomError, NetRomHeader, NetRomPacket, NodesBroadcast, NodesEntry, Opcode,
    Transport, TransportFields,
};
pub use source::{FrameSource, InputEncoding, RawFrame, ReaderSource, SourceError, parse_hex};
pub use trace::{TRACE_VERSION, Trace, TraceStatus, trace_frame};
