use std::ops::Range;

use super::error::NetRomError;
use super::layout;
use crate::protocols::ax25::address::{Address, AddressRole};
use crate::protocols::common::{FrameCursor, Truncated};

/// Transport opcode from the low nibble of the opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    ProtocolExtension,
    ConnectRequest,
    ConnectAck,
    DisconnectRequest,
    DisconnectAck,
    Info,
    InfoAck,
    Reset,
    ConnectRequestExtended,
    Unknown(u8),
}

const OPCODES: [(u8, Opcode); 9] = [
    (layout::L4_OP_PROTOCOL_EXTENSION, Opcode::ProtocolExtension),
    (layout::L4_OP_CONNECT_REQUEST, Opcode::ConnectRequest),
    (layout::L4_OP_CONNECT_ACK, Opcode::ConnectAck),
    (layout::L4_OP_DISCONNECT_REQUEST, Opcode::DisconnectRequest),
    (layout::L4_OP_DISCONNECT_ACK, Opcode::DisconnectAck),
    (layout::L4_OP_INFO, Opcode::Info),
    (layout::L4_OP_INFO_ACK, Opcode::InfoAck),
    (layout::L4_OP_RESET, Opcode::Reset),
    (
        layout::L4_OP_CONNECT_REQUEST_EXTENDED,
        Opcode::ConnectRequestExtended,
    ),
];

impl Opcode {
    pub fn from_raw(byte: u8) -> Self {
        let op = byte & layout::L4_OPCODE_MASK;
        OPCODES
            .iter()
            .find(|(value, _)| *value == op)
            .map(|(_, opcode)| *opcode)
            .unwrap_or(Opcode::Unknown(op))
    }

    /// Minimum transport header length for this opcode.
    pub fn min_len(&self) -> usize {
        match self {
            Opcode::ConnectRequest | Opcode::ConnectRequestExtended => {
                layout::L4_CONNECT_REQUEST_LEN
            }
            Opcode::ConnectAck => layout::L4_CONNECT_ACK_LEN,
            _ => layout::L4_MIN_LEN,
        }
    }
}

/// Choke/Nak/More flags from the high nibble of the opcode byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L4Flags(u8);

impl L4Flags {
    pub fn from_raw(byte: u8) -> Self {
        Self(byte & layout::L4_FLAGS_MASK)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn choke(&self) -> bool {
        self.0 & layout::L4_FLAG_CHOKE != 0
    }

    pub fn nak(&self) -> bool {
        self.0 & layout::L4_FLAG_NAK != 0
    }

    pub fn more(&self) -> bool {
        self.0 & layout::L4_FLAG_MORE != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFields<'a> {
    ProtocolExtension {
        family: u8,
        protocol: u8,
    },
    ConnectRequest {
        window: u8,
        origin: Address,
        origin_node: Address,
        timeout: Option<u16>,
        vendor: Option<u8>,
        vendor_extra: Option<u8>,
    },
    ConnectAck {
        window: u8,
        peer_circuit: [u8; 2],
    },
    /// Connect ack with the choke flag set.
    ConnectNak,
    DisconnectRequest,
    DisconnectAck,
    Info {
        send_seq: u8,
        receive_seq: u8,
        data: &'a [u8],
    },
    InfoAck {
        receive_seq: u8,
    },
    Reset {
        peer_circuit: [u8; 2],
    },
    ConnectRequestExtended {
        service: u16,
        window: u8,
        origin: Address,
        origin_node: Address,
        flags: Option<u8>,
    },
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport<'a> {
    pub circuit: [u8; 2],
    pub opcode: Opcode,
    pub flags: L4Flags,
    pub fields: TransportFields<'a>,
}

/// Decode a NetRom transport header (and, for Info, its payload).
pub fn parse_transport(bytes: &[u8]) -> Result<Transport<'_>, NetRomError> {
    let cursor = FrameCursor::new(bytes);
    cursor.require_len(layout::L4_MIN_LEN).map_err(malformed)?;

    let opcode_byte = cursor.read_u8(layout::L4_OPCODE_OFFSET).map_err(malformed)?;
    let opcode = Opcode::from_raw(opcode_byte);
    let flags = L4Flags::from_raw(opcode_byte);
    cursor.require_len(opcode.min_len()).map_err(malformed)?;

    let circuit_bytes = cursor.read_slice(layout::L4_CIRCUIT_RANGE).map_err(malformed)?;
    let circuit = [circuit_bytes[0], circuit_bytes[1]];
    let fields = parse_fields(&cursor, opcode, flags).map_err(malformed)?;

    Ok(Transport {
        circuit,
        opcode,
        flags,
        fields,
    })
}

fn parse_fields<'a>(
    cursor: &FrameCursor<'a>,
    opcode: Opcode,
    flags: L4Flags,
) -> Result<TransportFields<'a>, Truncated> {
    let fields = match opcode {
        Opcode::ProtocolExtension => TransportFields::ProtocolExtension {
            family: cursor.read_u8(0)?,
            protocol: cursor.read_u8(1)?,
        },
        Opcode::ConnectRequest => TransportFields::ConnectRequest {
            window: cursor.read_u8(layout::L4_WINDOW_OFFSET)?,
            origin: read_address(cursor, layout::L4_ORIGIN_RANGE)?,
            origin_node: read_address(cursor, layout::L4_ORIGIN_NODE_RANGE)?,
            timeout: cursor.read_u16_le(layout::L4_TIMEOUT_RANGE).ok(),
            vendor: cursor.read_u8(layout::L4_VENDOR_OFFSET).ok(),
            vendor_extra: cursor.read_u8(layout::L4_VENDOR_EXTRA_OFFSET).ok(),
        },
        Opcode::ConnectAck if flags.choke() => TransportFields::ConnectNak,
        Opcode::ConnectAck => TransportFields::ConnectAck {
            window: cursor.read_u8(layout::L4_WINDOW_OFFSET)?,
            peer_circuit: read_circuit(cursor, layout::L4_PEER_CIRCUIT_RANGE)?,
        },
        Opcode::DisconnectRequest => TransportFields::DisconnectRequest,
        Opcode::DisconnectAck => TransportFields::DisconnectAck,
        Opcode::Info => TransportFields::Info {
            send_seq: cursor.read_u8(layout::L4_TX_SEQ_OFFSET)?,
            receive_seq: cursor.read_u8(layout::L4_RX_SEQ_OFFSET)?,
            data: cursor.read_slice(layout::L4_INFO_DATA_OFFSET..cursor.len())?,
        },
        Opcode::InfoAck => TransportFields::InfoAck {
            receive_seq: cursor.read_u8(layout::L4_RX_SEQ_OFFSET)?,
        },
        Opcode::Reset => TransportFields::Reset {
            peer_circuit: read_circuit(cursor, layout::L4_PEER_CIRCUIT_RANGE)?,
        },
        Opcode::ConnectRequestExtended => TransportFields::ConnectRequestExtended {
            service: cursor.read_u16_le(layout::L4_SERVICE_RANGE)?,
            window: cursor.read_u8(layout::L4_WINDOW_OFFSET)?,
            origin: read_address(cursor, layout::L4_ORIGIN_RANGE)?,
            origin_node: read_address(cursor, layout::L4_ORIGIN_NODE_RANGE)?,
            flags: cursor.read_u8(layout::L4_CONNECT_FLAGS_OFFSET).ok(),
        },
        Opcode::Unknown(_) => TransportFields::Unknown,
    };
    Ok(fields)
}

fn read_address(cursor: &FrameCursor<'_>, range: Range<usize>) -> Result<Address, Truncated> {
    let bytes = cursor.read_slice(range)?;
    let field: &[u8; 7] = bytes.try_into().map_err(|_| Truncated {
        needed: 7,
        actual: bytes.len(),
    })?;
    Ok(Address::decode(field, AddressRole::NetRom))
}

fn read_circuit(cursor: &FrameCursor<'_>, range: Range<usize>) -> Result<[u8; 2], Truncated> {
    let bytes = cursor.read_slice(range)?;
    Ok([bytes[0], bytes[1]])
}

fn malformed(err: Truncated) -> NetRomError {
    NetRomError::MalformedL4Header {
        needed: err.needed,
        actual: err.actual,
    }
}

#[cfg(test)]
mod tests {
    use super::{L4Flags, Opcode, TransportFields, parse_transport};
    use crate::protocols::netrom::error::NetRomError;
    use crate::testutil::encode_address;

    fn connect_request(opcode: u8) -> Vec<u8> {
        let mut bytes = vec![0x12, 0x34, 0x00, 0x00, opcode, 4];
        bytes.extend_from_slice(&encode_address("G8PZT", 0, 0x60));
        bytes.extend_from_slice(&encode_address("GB7PZT", 1, 0x60));
        bytes
    }

    #[test]
    fn short_header_is_malformed() {
        let err = parse_transport(&[0, 0, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            NetRomError::MalformedL4Header {
                needed: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn connect_request_at_minimum_length_has_no_optional_fields() {
        let bytes = connect_request(0x01);
        assert_eq!(bytes.len(), 20);
        let transport = parse_transport(&bytes).unwrap();
        assert_eq!(transport.circuit, [0x12, 0x34]);
        assert_eq!(transport.opcode, Opcode::ConnectRequest);
        match transport.fields {
            TransportFields::ConnectRequest {
                window,
                origin,
                origin_node,
                timeout,
                vendor,
                vendor_extra,
            } => {
                assert_eq!(window, 4);
                assert_eq!(origin.to_string(), "G8PZT");
                assert_eq!(origin_node.to_string(), "GB7PZT-1");
                assert_eq!(timeout, None);
                assert_eq!(vendor, None);
                assert_eq!(vendor_extra, None);
            }
            other => panic!("unexpected fields: {other:?}"),
        }
    }

    #[test]
    fn connect_request_with_vendor_extension() {
        let mut bytes = connect_request(0x01);
        bytes.extend_from_slice(&[0x2c, 0x01, b'Z', 0x07]);
        let transport = parse_transport(&bytes).unwrap();
        match transport.fields {
            TransportFields::ConnectRequest {
                timeout,
                vendor,
                vendor_extra,
                ..
            } => {
                assert_eq!(timeout, Some(300));
                assert_eq!(vendor, Some(b'Z'));
                assert_eq!(vendor_extra, Some(0x07));
            }
            other => panic!("unexpected fields: {other:?}"),
        }
    }

    #[test]
    fn connect_request_below_minimum_is_malformed() {
        let bytes = connect_request(0x01);
        let err = parse_transport(&bytes[..19]).unwrap_err();
        assert_eq!(
            err,
            NetRomError::MalformedL4Header {
                needed: 20,
                actual: 19
            }
        );
    }

    #[test]
    fn connect_ack_needs_window_byte() {
        let err = parse_transport(&[1, 2, 3, 4, 0x02]).unwrap_err();
        assert!(matches!(err, NetRomError::MalformedL4Header { needed: 6, .. }));

        let transport = parse_transport(&[1, 2, 3, 4, 0x02, 8]).unwrap();
        assert_eq!(
            transport.fields,
            TransportFields::ConnectAck {
                window: 8,
                peer_circuit: [3, 4]
            }
        );
    }

    #[test]
    fn choked_connect_ack_is_a_nak() {
        let transport = parse_transport(&[1, 2, 3, 4, 0x82, 8]).unwrap();
        assert_eq!(transport.fields, TransportFields::ConnectNak);
        assert!(transport.flags.choke());
    }

    #[test]
    fn info_carries_sequence_numbers_and_data() {
        let bytes = [0x01, 0x02, 3, 4, 0x25, b'o', b'k', b'\r'];
        let transport = parse_transport(&bytes).unwrap();
        assert!(transport.flags.more());
        assert!(!transport.flags.nak());
        assert_eq!(
            transport.fields,
            TransportFields::Info {
                send_seq: 3,
                receive_seq: 4,
                data: b"ok\r"
            }
        );
    }

    #[test]
    fn extended_connect_request_reads_service_and_flags() {
        let mut bytes = connect_request(0x08);
        bytes[2] = 0x10;
        bytes[3] = 0x27;
        bytes.push(0x03);
        let transport = parse_transport(&bytes).unwrap();
        match transport.fields {
            TransportFields::ConnectRequestExtended { service, flags, .. } => {
                assert_eq!(service, 10000);
                assert_eq!(flags, Some(3));
            }
            other => panic!("unexpected fields: {other:?}"),
        }
    }

    #[test]
    fn extended_connect_request_at_minimum_length_has_no_flags() {
        let bytes = connect_request(0x08);
        assert_eq!(bytes.len(), 20);
        let transport = parse_transport(&bytes).unwrap();
        assert_eq!(transport.opcode, Opcode::ConnectRequestExtended);
        match transport.fields {
            TransportFields::ConnectRequestExtended {
                service,
                window,
                origin,
                origin_node,
                flags,
            } => {
                assert_eq!(service, 0);
                assert_eq!(window, 4);
                assert_eq!(origin.to_string(), "G8PZT");
                assert_eq!(origin_node.to_string(), "GB7PZT-1");
                assert_eq!(flags, None);
            }
            other => panic!("unexpected fields: {other:?}"),
        }
    }

    #[test]
    fn disconnect_opcodes_carry_no_fields() {
        let request = parse_transport(&[1, 2, 3, 4, 0x03]).unwrap();
        assert_eq!(request.opcode, Opcode::DisconnectRequest);
        assert_eq!(request.fields, TransportFields::DisconnectRequest);

        let ack = parse_transport(&[1, 2, 3, 4, 0x04]).unwrap();
        assert_eq!(ack.opcode, Opcode::DisconnectAck);
        assert_eq!(ack.fields, TransportFields::DisconnectAck);
    }

    #[test]
    fn info_ack_reads_receive_sequence_from_byte_three() {
        let transport = parse_transport(&[1, 2, 7, 9, 0x06]).unwrap();
        assert_eq!(transport.fields, TransportFields::InfoAck { receive_seq: 9 });
    }

    #[test]
    fn reset_reads_peer_circuit() {
        let transport = parse_transport(&[1, 2, 0xab, 0xcd, 0x07]).unwrap();
        assert_eq!(transport.circuit, [1, 2]);
        assert_eq!(
            transport.fields,
            TransportFields::Reset {
                peer_circuit: [0xab, 0xcd]
            }
        );
    }

    #[test]
    fn protocol_extension_reports_leading_bytes() {
        let transport = parse_transport(&[0x0c, 0xcc, 0, 0, 0x00]).unwrap();
        assert_eq!(
            transport.fields,
            TransportFields::ProtocolExtension {
                family: 0x0c,
                protocol: 0xcc
            }
        );
    }

    #[test]
    fn unknown_opcode_is_representable() {
        let transport = parse_transport(&[0, 0, 0, 0, 0x4b]).unwrap();
        assert_eq!(transport.opcode, Opcode::Unknown(0x0b));
        assert_eq!(transport.fields, TransportFields::Unknown);
        assert!(transport.flags.nak());
    }

    #[test]
    fn flags_mask_high_nibble() {
        let flags = L4Flags::from_raw(0xe5);
        assert_eq!(flags.bits(), 0xe0);
        assert!(flags.choke() && flags.nak() && flags.more());
    }
}
