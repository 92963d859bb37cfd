use tracing::debug;

use super::address::{Address, AddressRole, parse_address, parse_digipeaters};
use super::control::{ControlField, parse_control};
use super::error::Ax25Error;
use super::layout;
use super::pid::{Payload, parse_payload};
use crate::protocols::common::FrameCursor;

/// What the host interface handed us, before any AX.25 parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope<'a> {
    /// A 2-byte acknowledgement of a previously sent frame.
    AckReply { sequence: u16 },
    /// An AX.25 frame, possibly behind an ack-request prefix.
    Ax25 {
        ack_request: Option<u8>,
        frame: FrameCursor<'a>,
    },
}

/// Guess whether a frame carries a 2-byte ack-request prefix.
///
/// The prefix is a little-endian serial number. Serials stay small, so the
/// second byte is nearly always zero, and that is the only signal there is.
/// An AX.25 frame whose second address byte is zero matches too; nothing
/// in the bytes can tell the two apart.
pub fn looks_like_ack_request(bytes: &[u8]) -> bool {
    matches!(bytes, [_, 0, ..])
}

/// Classify the raw capture. Input past [`layout::MAX_FRAME_LEN`] is cut.
pub fn split_envelope(bytes: &[u8]) -> Envelope<'_> {
    let bytes = &bytes[..bytes.len().min(layout::MAX_FRAME_LEN)];
    if let Ok(sequence) = <[u8; layout::ACK_REPLY_LEN]>::try_from(bytes) {
        return Envelope::AckReply {
            sequence: u16::from_le_bytes(sequence),
        };
    }

    let cursor = FrameCursor::new(bytes);
    if looks_like_ack_request(bytes) {
        let sequence = bytes[0];
        debug!(sequence, "ack-request prefix assumed");
        let frame =
            FrameCursor::new(cursor.read_up_to(layout::ACK_REQUEST_PREFIX_LEN..bytes.len()));
        return Envelope::Ax25 {
            ack_request: Some(sequence),
            frame,
        };
    }

    Envelope::Ax25 {
        ack_request: None,
        frame: cursor,
    }
}

/// Address field of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub destination: Address,
    pub source: Address,
    pub digipeaters: Vec<Address>,
}

pub fn parse_header(cursor: FrameCursor<'_>) -> Result<(Header, FrameCursor<'_>), Ax25Error> {
    if cursor.len() < layout::MIN_FRAME_LEN {
        return Err(Ax25Error::TooShort { len: cursor.len() });
    }
    let (destination, rest) = parse_address(cursor, AddressRole::Destination)?;
    let (source, rest) = parse_address(rest, AddressRole::Source)?;
    let (digipeaters, rest) = if source.is_last() {
        (Vec::new(), rest)
    } else {
        parse_digipeaters(rest)
    };

    Ok((
        Header {
            destination,
            source,
            digipeaters,
        },
        rest,
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    pub ack_request: Option<u8>,
    pub header: Header,
    pub control: ControlField,
    /// Present for I and UI frames only.
    pub payload: Option<Payload<'a>>,
}

impl Frame<'_> {
    pub fn is_dama(&self) -> bool {
        self.header.source.is_dama()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<'a> {
    AckReply { sequence: u16 },
    Frame(Frame<'a>),
}

/// Decode one captured frame into its layered structure.
///
/// # Examples
/// ```
/// use ax25trace_core::{Decoded, FrameType, decode_frame};
///
/// let mut raw = vec![0x92, 0x88, 0x40, 0x40, 0x40, 0x40, 0xe0];
/// raw.extend_from_slice(&[0x8e, 0x70, 0xa0, 0xb4, 0xa8, 0x40, 0x63]);
/// raw.extend_from_slice(&[0x03, 0xf0]);
/// raw.extend_from_slice(b"hello");
///
/// let Decoded::Frame(frame) = decode_frame(&raw)? else {
///     panic!("expected an AX.25 frame");
/// };
/// assert_eq!(frame.header.source.to_string(), "G8PZT-1");
/// assert_eq!(frame.control.frame_type, FrameType::UnnumberedInformation);
/// # Ok::<(), ax25trace_core::Ax25Error>(())
/// ```
pub fn decode_frame(bytes: &[u8]) -> Result<Decoded<'_>, Ax25Error> {
    let (ack_request, cursor) = match split_envelope(bytes) {
        Envelope::AckReply { sequence } => return Ok(Decoded::AckReply { sequence }),
        Envelope::Ax25 { ack_request, frame } => (ack_request, frame),
    };

    let (header, rest) = parse_header(cursor)?;
    let (control, rest) = parse_control(rest, &header.destination, &header.source)?;
    let payload = if control.frame_type.carries_payload() {
        Some(parse_payload(rest, control.frame_type)?)
    } else {
        None
    };

    Ok(Decoded::Frame(Frame {
        ack_request,
        header,
        control,
        payload,
    }))
}

#[cfg(test)]
mod tests {
    use super::{Decoded, Envelope, decode_frame, parse_header, split_envelope};
    use crate::protocols::ax25::control::FrameType;
    use crate::protocols::ax25::error::Ax25Error;
    use crate::protocols::ax25::pid::ProtocolId;
    use crate::protocols::common::FrameCursor;
    use crate::testutil::{encode_address, ui_text_frame};

    #[test]
    fn two_byte_frame_is_an_ack_reply() {
        for (low, high) in [(0u8, 0u8), (5, 0), (0x34, 0x12), (0xff, 0xff)] {
            let bytes = [low, high];
            assert_eq!(
                split_envelope(&bytes),
                Envelope::AckReply {
                    sequence: u16::from(low) + 256 * u16::from(high)
                }
            );
        }
    }

    #[test]
    fn only_exactly_two_bytes_are_an_ack_reply() {
        for bytes in [&[0x34u8][..], &[0x34, 0x12, 0x56][..]] {
            assert!(matches!(
                split_envelope(bytes),
                Envelope::Ax25 {
                    ack_request: None,
                    ..
                }
            ));
        }
    }

    #[test]
    fn zero_second_byte_strips_ack_request_prefix() {
        let mut bytes = vec![9, 0];
        bytes.extend_from_slice(&ui_text_frame(b"x"));
        match split_envelope(&bytes) {
            Envelope::Ax25 { ack_request, frame } => {
                assert_eq!(ack_request, Some(9));
                assert_eq!(frame.len(), bytes.len() - 2);
            }
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[test]
    fn oversized_capture_is_capped() {
        let mut bytes = ui_text_frame(b"");
        bytes.resize(1500, b'a');
        match split_envelope(&bytes) {
            Envelope::Ax25 { frame, .. } => assert_eq!(frame.len(), 1000),
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[test]
    fn ordinary_frame_passes_through() {
        let bytes = ui_text_frame(b"x");
        match split_envelope(&bytes) {
            Envelope::Ax25 { ack_request, frame } => {
                assert_eq!(ack_request, None);
                assert_eq!(frame.len(), bytes.len());
            }
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[test]
    fn header_rejects_short_frames() {
        let bytes = [0x40u8; 14];
        let err = parse_header(FrameCursor::new(&bytes)).unwrap_err();
        assert_eq!(err, Ax25Error::TooShort { len: 14 });
    }

    #[test]
    fn header_with_digipeaters() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&encode_address("ID", 0, 0xe0));
        bytes.extend_from_slice(&encode_address("G8PZT", 1, 0x60));
        bytes.extend_from_slice(&encode_address("RELAY", 0, 0xe0));
        bytes.extend_from_slice(&encode_address("WIDE", 2, 0x61));
        bytes.extend_from_slice(&[0x03, 0xf0]);

        let (header, rest) = parse_header(FrameCursor::new(&bytes)).unwrap();
        assert_eq!(header.digipeaters.len(), 2);
        assert_eq!(header.digipeaters[1].to_string(), "WIDE-2");
        assert_eq!(rest.as_slice(), &[0x03, 0xf0]);
    }

    #[test]
    fn decode_ui_text_frame() {
        let bytes = ui_text_frame(b"hello");
        let decoded = decode_frame(&bytes).unwrap();
        let Decoded::Frame(frame) = decoded else {
            panic!("expected frame");
        };
        assert_eq!(frame.ack_request, None);
        assert_eq!(frame.header.destination.to_string(), "ID");
        assert_eq!(frame.control.frame_type, FrameType::UnnumberedInformation);
        let payload = frame.payload.expect("payload");
        assert_eq!(payload.protocol, ProtocolId::NoLayer3);
        assert_eq!(payload.data, b"hello");
    }

    #[test]
    fn supervisory_frame_has_no_payload() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&encode_address("ID", 0, 0xe0));
        bytes.extend_from_slice(&encode_address("G8PZT", 1, 0x61));
        bytes.push(0x41);
        let Decoded::Frame(frame) = decode_frame(&bytes).unwrap() else {
            panic!("expected frame");
        };
        assert_eq!(frame.control.frame_type, FrameType::ReceiveReady);
        assert_eq!(frame.payload, None);
    }

    #[test]
    fn missing_control_after_digipeaters() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&encode_address("ID", 0, 0xe0));
        bytes.extend_from_slice(&encode_address("G8PZT", 1, 0x60));
        bytes.extend_from_slice(&encode_address("RELAY", 0, 0x61));
        assert_eq!(decode_frame(&bytes).unwrap_err(), Ax25Error::MissingControl);
    }

    #[test]
    fn decoding_is_repeatable() {
        let bytes = ui_text_frame(b"same");
        assert_eq!(decode_frame(&bytes), decode_frame(&bytes));
    }
}
