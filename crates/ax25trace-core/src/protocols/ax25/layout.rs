// Frame geometry.
/// Largest capture handed to the decoder; bytes beyond it are ignored.
pub const MAX_FRAME_LEN: usize = 1000;
pub const ADDRESS_LEN: usize = 7;
pub const CALLSIGN_LEN: usize = 6;
pub const SSID_OFFSET: usize = 6;
pub const MIN_FRAME_LEN: usize = 15;

// Host-interface wrappers.
pub const ACK_REPLY_LEN: usize = 2;
pub const ACK_REQUEST_PREFIX_LEN: usize = 2;

// SSID byte bits.
pub const SSID_EXTENSION: u8 = 0x01;
pub const SSID_DAMA: u8 = 0x20;
pub const SSID_EAX25: u8 = 0x40;
pub const SSID_REPEATED: u8 = 0x80;
pub const SSID_COMMAND_RESPONSE: u8 = 0x80;
pub const SSID_VALUE_MASK: u8 = 0x0f;

// Control field.
pub const CTRL_INFORMATION_BIT: u16 = 0x01;
pub const CTRL_SUPERVISORY_BIT: u16 = 0x02;
pub const CTRL_KIND_MASK: u16 = 0x03;
pub const CTRL_UNNUMBERED: u16 = 0x03;
pub const CTRL_SUPERVISORY_MASK: u16 = 0x0f;
pub const CTRL_POLL_FINAL: u16 = 0x10;
pub const CTRL_EXTENDED_POLL_FINAL: u16 = 0x100;

pub const CTRL_RR: u8 = 0x01;
pub const CTRL_RNR: u8 = 0x05;
pub const CTRL_REJ: u8 = 0x09;
pub const CTRL_UI: u8 = 0x03;
pub const CTRL_DM: u8 = 0x0f;
pub const CTRL_SABM: u8 = 0x2f;
pub const CTRL_DISC: u8 = 0x43;
pub const CTRL_UA: u8 = 0x63;
pub const CTRL_SABME: u8 = 0x6f;
pub const CTRL_FRMR: u8 = 0x87;

// Protocol identifiers, compared after masking with PID_MASK.
pub const PID_MASK: u8 = 0x3f;
pub const PID_TEXNET: u8 = 0x03;
pub const PID_LINK_QUALITY: u8 = 0x04;
pub const PID_SEGMENT: u8 = 0x08;
pub const PID_APPLETALK: u8 = 0x0a;
pub const PID_APPLETALK_ARP: u8 = 0x0b;
pub const PID_IP: u8 = 0x0c;
pub const PID_ARP: u8 = 0x0d;
pub const PID_RARP: u8 = 0x0e;
pub const PID_NETROM: u8 = 0x0f;
pub const PID_NO_LAYER3: u8 = 0x30;

// Segmentation byte.
pub const SEG_FIRST: u8 = 0x80;
pub const SEG_REMAINING_MASK: u8 = 0x7f;
