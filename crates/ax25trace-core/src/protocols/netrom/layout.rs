// Layer 3.
pub const NODES_BROADCAST_MARKER: u8 = 0xff;
pub const ROUTING_POLL_MARKER: u8 = 0xfe;
pub const L3_HEADER_LEN: usize = 15;
pub const L3_SOURCE_RANGE: std::ops::Range<usize> = 0..7;
pub const L3_DESTINATION_RANGE: std::ops::Range<usize> = 7..14;
pub const L3_TTL_OFFSET: usize = 14;

// Layer 4, offsets relative to the start of the transport header.
pub const L4_MIN_LEN: usize = 5;
pub const L4_CONNECT_REQUEST_LEN: usize = 20;
pub const L4_CONNECT_ACK_LEN: usize = 6;
pub const L4_CIRCUIT_RANGE: std::ops::Range<usize> = 0..2;
pub const L4_PEER_CIRCUIT_RANGE: std::ops::Range<usize> = 2..4;
pub const L4_TX_SEQ_OFFSET: usize = 2;
pub const L4_RX_SEQ_OFFSET: usize = 3;
pub const L4_OPCODE_OFFSET: usize = 4;
pub const L4_WINDOW_OFFSET: usize = 5;
pub const L4_SERVICE_RANGE: std::ops::Range<usize> = 2..4;
pub const L4_ORIGIN_RANGE: std::ops::Range<usize> = 6..13;
pub const L4_ORIGIN_NODE_RANGE: std::ops::Range<usize> = 13..20;
pub const L4_TIMEOUT_RANGE: std::ops::Range<usize> = 20..22;
pub const L4_VENDOR_OFFSET: usize = 22;
pub const L4_VENDOR_EXTRA_OFFSET: usize = 23;
pub const L4_CONNECT_FLAGS_OFFSET: usize = 20;
pub const L4_INFO_DATA_OFFSET: usize = 5;

pub const L4_OPCODE_MASK: u8 = 0x0f;
pub const L4_FLAGS_MASK: u8 = 0xf0;
pub const L4_FLAG_CHOKE: u8 = 0x80;
pub const L4_FLAG_NAK: u8 = 0x40;
pub const L4_FLAG_MORE: u8 = 0x20;

pub const L4_OP_PROTOCOL_EXTENSION: u8 = 0x00;
pub const L4_OP_CONNECT_REQUEST: u8 = 0x01;
pub const L4_OP_CONNECT_ACK: u8 = 0x02;
pub const L4_OP_DISCONNECT_REQUEST: u8 = 0x03;
pub const L4_OP_DISCONNECT_ACK: u8 = 0x04;
pub const L4_OP_INFO: u8 = 0x05;
pub const L4_OP_INFO_ACK: u8 = 0x06;
pub const L4_OP_RESET: u8 = 0x07;
pub const L4_OP_CONNECT_REQUEST_EXTENDED: u8 = 0x08;

// Nodes broadcast.
pub const NODES_ALIAS_LEN: usize = 6;
pub const NODES_ENTRY_LEN: usize = 21;
pub const NODES_CALL_RANGE: std::ops::Range<usize> = 0..7;
pub const NODES_ALIAS_RANGE: std::ops::Range<usize> = 7..13;
pub const NODES_VIA_RANGE: std::ops::Range<usize> = 13..20;
pub const NODES_QUALITY_OFFSET: usize = 20;
