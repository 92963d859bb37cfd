//! NetRom network (L3) and transport (L4) decoding.
//!
//! NetRom rides in AX.25 I/UI frames with pid 0xCF. The first L3 byte picks
//! one of three forms: a Nodes broadcast (0xFF, only meaningful in UI
//! frames), a routing poll (0xFE), or a 15-byte network header followed by
//! a transport header whose opcode decides its own length and layout.
//!
//! Errors here never fail the enclosing frame: they are kept in the decode
//! result and rendered as a note.

pub mod error;
pub mod l3;
pub mod l4;
pub mod layout;
pub mod nodes;

pub use error::NetRomError;
pub use l3::{NetRomHeader, NetRomPacket, parse_netrom};
pub use l4::{L4Flags, Opcode, Transport, TransportFields};
pub use nodes::{NodesBroadcast, NodesEntry};
