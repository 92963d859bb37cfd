use std::fmt;

use super::address::Address;
use super::error::Ax25Error;
use super::layout;
use crate::protocols::common::FrameCursor;

/// Link-layer frame type, classified from the control field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Information,
    UnnumberedInformation,
    ReceiveReady,
    ReceiveNotReady,
    Reject,
    SetAsyncBalancedMode,
    SetAsyncBalancedModeExtended,
    Disconnect,
    DisconnectedMode,
    UnnumberedAck,
    FrameReject,
    /// Unrecognized control value, kept whole for display.
    Unknown(u16),
}

const SUPERVISORY_TYPES: [(u8, FrameType); 3] = [
    (layout::CTRL_RR, FrameType::ReceiveReady),
    (layout::CTRL_RNR, FrameType::ReceiveNotReady),
    (layout::CTRL_REJ, FrameType::Reject),
];

const UNNUMBERED_TYPES: [(u8, FrameType); 7] = [
    (layout::CTRL_SABM, FrameType::SetAsyncBalancedMode),
    (layout::CTRL_SABME, FrameType::SetAsyncBalancedModeExtended),
    (layout::CTRL_DISC, FrameType::Disconnect),
    (layout::CTRL_DM, FrameType::DisconnectedMode),
    (layout::CTRL_UA, FrameType::UnnumberedAck),
    (layout::CTRL_FRMR, FrameType::FrameReject),
    (layout::CTRL_UI, FrameType::UnnumberedInformation),
];

impl FrameType {
    /// Classify a (possibly two-byte) control value.
    pub fn classify(ctrl: u16) -> Self {
        if ctrl & layout::CTRL_INFORMATION_BIT == 0 {
            return FrameType::Information;
        }
        let (table, key): (&[(u8, FrameType)], u8) = if ctrl & layout::CTRL_SUPERVISORY_BIT == 0 {
            (&SUPERVISORY_TYPES[..], (ctrl & layout::CTRL_SUPERVISORY_MASK) as u8)
        } else {
            (&UNNUMBERED_TYPES[..], (ctrl & !layout::CTRL_POLL_FINAL & 0xff) as u8)
        };
        table
            .iter()
            .find(|(value, _)| *value == key)
            .map(|(_, frame_type)| *frame_type)
            .unwrap_or(FrameType::Unknown(ctrl))
    }

    /// Only I and UI frames carry a protocol id and payload.
    pub fn carries_payload(&self) -> bool {
        matches!(
            self,
            FrameType::Information | FrameType::UnnumberedInformation
        )
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = match self {
            FrameType::Information => "I",
            FrameType::UnnumberedInformation => "UI",
            FrameType::ReceiveReady => "RR",
            FrameType::ReceiveNotReady => "RNR",
            FrameType::Reject => "REJ",
            FrameType::SetAsyncBalancedMode => "C",
            FrameType::SetAsyncBalancedModeExtended => "SABME",
            FrameType::Disconnect => "D",
            FrameType::DisconnectedMode => "DM",
            FrameType::UnnumberedAck => "UA",
            FrameType::FrameReject => "FRMR",
            FrameType::Unknown(ctrl) => return write!(f, "ctrl={ctrl}"),
        };
        f.write_str(mnemonic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulo {
    Eight,
    OneTwentyEight,
}

impl Modulo {
    pub fn value(&self) -> u16 {
        match self {
            Modulo::Eight => 8,
            Modulo::OneTwentyEight => 128,
        }
    }

    fn sequence_mask(&self) -> u16 {
        self.value() - 1
    }
}

/// Outcome of combining the destination and source C/R bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResponse {
    Command,
    Response,
    /// Both or neither bit set: pre-v2 station.
    Legacy,
}

impl CommandResponse {
    pub fn from_addresses(destination: &Address, source: &Address) -> Self {
        match (
            destination.command_response_bit(),
            source.command_response_bit(),
        ) {
            (true, false) => CommandResponse::Command,
            (false, true) => CommandResponse::Response,
            _ => CommandResponse::Legacy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlField {
    pub raw: u16,
    pub frame_type: FrameType,
    pub modulo: Modulo,
    pub command_response: CommandResponse,
    pub poll_final: bool,
    pub receive_seq: Option<u8>,
    pub send_seq: Option<u8>,
}

impl ControlField {
    pub fn is_unnumbered(&self) -> bool {
        is_unnumbered(self.raw)
    }
}

fn is_unnumbered(ctrl: u16) -> bool {
    ctrl & layout::CTRL_KIND_MASK == layout::CTRL_UNNUMBERED
}

/// Decode the control field following the address field.
///
/// The source address selects the modulo; modulo-128 I and S frames carry a
/// second control byte.
pub fn parse_control<'a>(
    cursor: FrameCursor<'a>,
    destination: &Address,
    source: &Address,
) -> Result<(ControlField, FrameCursor<'a>), Ax25Error> {
    let (first, mut rest) = cursor
        .take_u8()
        .map_err(|_| Ax25Error::MissingControl)?;
    let mut ctrl = u16::from(first);

    let modulo = if source.uses_modulo_128() {
        Modulo::OneTwentyEight
    } else {
        Modulo::Eight
    };
    if modulo == Modulo::OneTwentyEight && !is_unnumbered(ctrl) {
        let (second, tail) = rest.take_u8()?;
        ctrl |= u16::from(second) << 8;
        rest = tail;
    }

    let poll_final_bit = if modulo == Modulo::OneTwentyEight && !is_unnumbered(ctrl) {
        layout::CTRL_EXTENDED_POLL_FINAL
    } else {
        layout::CTRL_POLL_FINAL
    };

    let frame_type = FrameType::classify(ctrl);
    let mask = modulo.sequence_mask();
    let (receive_seq, send_seq) = if is_unnumbered(ctrl) {
        (None, None)
    } else {
        let nr_shift = match modulo {
            Modulo::Eight => 5,
            Modulo::OneTwentyEight => 9,
        };
        let receive = ((ctrl >> nr_shift) & mask) as u8;
        let send = (frame_type == FrameType::Information).then(|| ((ctrl >> 1) & mask) as u8);
        (Some(receive), send)
    };

    Ok((
        ControlField {
            raw: ctrl,
            frame_type,
            modulo,
            command_response: CommandResponse::from_addresses(destination, source),
            poll_final: ctrl & poll_final_bit != 0,
            receive_seq,
            send_seq,
        },
        rest,
    ))
}
