//! AX.25 link-layer decoding.
//!
//! Layers are decoded strictly left to right. Each step takes a
//! [`FrameCursor`](crate::protocols::common::FrameCursor), consumes a
//! prefix and returns the cursor over what is left:
//! envelope (ack reply / ack request) -> address field -> control field ->
//! protocol id -> NetRom or text payload.
//!
//! The source address decides the control-field width, the control field
//! decides whether a protocol id follows, and the protocol id decides
//! whether NetRom headers follow.

pub mod address;
pub mod control;
pub mod error;
pub mod layout;
pub mod parser;
pub mod pid;

pub use address::{Address, AddressRole};
pub use control::{CommandResponse, ControlField, FrameType, Modulo};
pub use error::Ax25Error;
pub use parser::{Decoded, Envelope, Frame, Header, decode_frame, parse_header, split_envelope};
pub use pid::{Payload, PayloadBody, ProtocolId, Segmentation};
