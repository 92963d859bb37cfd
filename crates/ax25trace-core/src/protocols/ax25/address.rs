use std::fmt;

use super::layout;
use crate::protocols::common::text::push_printable;
use crate::protocols::common::{FrameCursor, Truncated};

/// Position an address occupies, which decides what the SSID flag bits mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRole {
    Destination,
    Source,
    Digipeater,
    /// Callsign carried inside a NetRom header or routing entry.
    NetRom,
}

/// A decoded 7-byte AX.25 address field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    callsign: String,
    ssid: u8,
    ssid_byte: u8,
    role: AddressRole,
}

impl Address {
    /// Decode a shifted-ASCII callsign and its SSID byte.
    ///
    /// Shifted spaces are skipped wherever they appear; other unprintable
    /// characters are escaped as `{0xNN}`.
    ///
    /// # Examples
    /// ```
    /// use ax25trace_core::{Address, AddressRole};
    ///
    /// let mut field = [b' ' << 1; 7];
    /// for (slot, ch) in field.iter_mut().zip(b"G8PZT") {
    ///     *slot = ch << 1;
    /// }
    /// field[6] = 0x60 | (1 << 1) | 0x01;
    ///
    /// let address = Address::decode(&field, AddressRole::Source);
    /// assert_eq!(address.to_string(), "G8PZT-1");
    /// assert!(address.is_last());
    /// ```
    pub fn decode(field: &[u8; layout::ADDRESS_LEN], role: AddressRole) -> Self {
        let mut callsign = String::with_capacity(layout::CALLSIGN_LEN);
        for ch in field[..layout::CALLSIGN_LEN]
            .iter()
            .map(|byte| (byte >> 1) & 0x7f)
            .filter(|ch| *ch != b' ')
        {
            push_printable(&mut callsign, ch);
        }
        let ssid_byte = field[layout::SSID_OFFSET];
        Self {
            callsign,
            ssid: (ssid_byte >> 1) & layout::SSID_VALUE_MASK,
            ssid_byte,
            role,
        }
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    pub fn ssid(&self) -> u8 {
        self.ssid
    }

    /// Raw SSID byte, for callers that need to inspect flags in place.
    pub fn ssid_byte(&self) -> u8 {
        self.ssid_byte
    }

    pub fn role(&self) -> AddressRole {
        self.role
    }

    /// Extension bit: this is the last address of the address field.
    pub fn is_last(&self) -> bool {
        self.ssid_byte & layout::SSID_EXTENSION != 0
    }

    /// Command/response bit. Only meaningful on the destination/source pair.
    pub fn command_response_bit(&self) -> bool {
        matches!(self.role, AddressRole::Destination | AddressRole::Source)
            && self.ssid_byte & layout::SSID_COMMAND_RESPONSE != 0
    }

    /// Has-been-repeated bit of a digipeater entry.
    pub fn has_been_repeated(&self) -> bool {
        self.role == AddressRole::Digipeater && self.ssid_byte & layout::SSID_REPEATED != 0
    }

    /// Source address with the DAMA bit cleared (DAMA master present).
    pub fn is_dama(&self) -> bool {
        self.role == AddressRole::Source && self.ssid_byte & layout::SSID_DAMA == 0
    }

    /// Source address with the EAX25 bit cleared selects modulo-128 control.
    pub fn uses_modulo_128(&self) -> bool {
        self.role == AddressRole::Source && self.ssid_byte & layout::SSID_EAX25 == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.callsign)?;
        if self.ssid > 0 {
            write!(f, "-{}", self.ssid)?;
        }
        Ok(())
    }
}

pub fn parse_address(
    cursor: FrameCursor<'_>,
    role: AddressRole,
) -> Result<(Address, FrameCursor<'_>), Truncated> {
    let (field, rest) = cursor.take_array::<{ layout::ADDRESS_LEN }>()?;
    Ok((Address::decode(field, role), rest))
}

/// Decode the digipeater chain following the source address.
///
/// Stops after the entry carrying the extension bit, or when fewer than
/// seven bytes remain. The consumed length is `cursor.len() - rest.len()`.
pub fn parse_digipeaters(mut cursor: FrameCursor<'_>) -> (Vec<Address>, FrameCursor<'_>) {
    let mut digipeaters = Vec::new();
    while let Ok((address, rest)) = parse_address(cursor, AddressRole::Digipeater) {
        cursor = rest;
        let last = address.is_last();
        digipeaters.push(address);
        if last {
            break;
        }
    }
    (digipeaters, cursor)
}
