use tracing::trace;

use super::control::FrameType;
use super::error::Ax25Error;
use super::layout;
use crate::protocols::common::FrameCursor;
use crate::protocols::netrom::{NetRomError, NetRomPacket, parse_netrom};

/// Layer-3 protocol family, keyed on the masked protocol id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolId {
    NoLayer3,
    NetRom,
    Ip,
    Arp,
    /// Segment whose real protocol id is not known in this frame.
    Segment,
    Texnet,
    LinkQuality,
    AppleTalk,
    AppleTalkArp,
    Rarp,
    Other(u8),
}

const PROTOCOL_IDS: [(u8, ProtocolId); 10] = [
    (layout::PID_NO_LAYER3, ProtocolId::NoLayer3),
    (layout::PID_NETROM, ProtocolId::NetRom),
    (layout::PID_IP, ProtocolId::Ip),
    (layout::PID_ARP, ProtocolId::Arp),
    (layout::PID_SEGMENT, ProtocolId::Segment),
    (layout::PID_TEXNET, ProtocolId::Texnet),
    (layout::PID_LINK_QUALITY, ProtocolId::LinkQuality),
    (layout::PID_APPLETALK, ProtocolId::AppleTalk),
    (layout::PID_APPLETALK_ARP, ProtocolId::AppleTalkArp),
    (layout::PID_RARP, ProtocolId::Rarp),
];

impl ProtocolId {
    pub fn from_raw(pid: u8) -> Self {
        let masked = pid & layout::PID_MASK;
        PROTOCOL_IDS
            .iter()
            .find(|(value, _)| *value == masked)
            .map(|(_, protocol)| *protocol)
            .unwrap_or(ProtocolId::Other(pid))
    }

    /// Short name shown after the pid, if the family has one.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ProtocolId::NoLayer3 => Some("DATA:"),
            ProtocolId::NetRom => Some("NET/ROM"),
            ProtocolId::Ip => Some("IP"),
            ProtocolId::Arp => Some("ARP"),
            ProtocolId::Segment => Some("SEG"),
            ProtocolId::Texnet => Some("TEXNET"),
            ProtocolId::LinkQuality => Some("LQ"),
            ProtocolId::AppleTalk => Some("APPLETALK"),
            ProtocolId::AppleTalkArp => Some("AARP"),
            ProtocolId::Rarp => Some("RARP"),
            ProtocolId::Other(_) => None,
        }
    }
}

/// Segmentation descriptor from a segmented payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmentation {
    pub first: bool,
    pub remaining: u8,
}

impl Segmentation {
    fn from_raw(segnum: u8) -> Self {
        Self {
            first: segnum & layout::SEG_FIRST != 0,
            remaining: segnum & layout::SEG_REMAINING_MASK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadBody<'a> {
    Text(&'a [u8]),
    NetRom(Result<NetRomPacket<'a>, NetRomError>),
    /// Reported by type only.
    Undecoded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload<'a> {
    /// Protocol id after resolving any segmentation header.
    pub pid: u8,
    pub protocol: ProtocolId,
    pub segment: Option<Segmentation>,
    pub data: &'a [u8],
    pub body: PayloadBody<'a>,
}

/// Consume the protocol id (and segmentation header) of an I or UI frame
/// and route the remaining bytes by protocol family.
pub fn parse_payload(
    cursor: FrameCursor<'_>,
    frame_type: FrameType,
) -> Result<Payload<'_>, Ax25Error> {
    let (mut pid, mut rest) = cursor.take_u8()?;

    let mut segment = None;
    if pid == layout::PID_SEGMENT {
        let (segnum, tail) = rest.take_u8()?;
        rest = tail;
        let descriptor = Segmentation::from_raw(segnum);
        if descriptor.first {
            let (inner, tail) = rest.take_u8()?;
            pid = inner;
            rest = tail;
        }
        trace!(first = descriptor.first, remaining = descriptor.remaining, "segmented payload");
        segment = Some(descriptor);
    }

    let protocol = ProtocolId::from_raw(pid);
    let data = rest.as_slice();
    let body = match protocol {
        ProtocolId::NoLayer3 => PayloadBody::Text(data),
        ProtocolId::NetRom => PayloadBody::NetRom(parse_netrom(
            data,
            frame_type == FrameType::UnnumberedInformation,
        )),
        _ => PayloadBody::Undecoded,
    };

    Ok(Payload {
        pid,
        protocol,
        segment,
        data,
        body,
    })
}
