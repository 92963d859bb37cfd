use tracing::debug;

use super::error::NetRomError;
use super::l4::{Transport, parse_transport};
use super::layout;
use super::nodes::{NodesBroadcast, parse_nodes_broadcast};
use crate::protocols::ax25::address::{Address, AddressRole};
use crate::protocols::common::FrameCursor;
use crate::protocols::common::text::{ALIAS_LEN, read_alias};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetRomHeader {
    pub source: Address,
    pub destination: Address,
    pub ttl: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetRomPacket<'a> {
    NodesBroadcast(NodesBroadcast),
    /// 0xFF outside a UI frame: INP3 routing information, not decoded.
    RoutingInfo { len: usize },
    /// Request for a Nodes broadcast; `None` when the alias is missing.
    RoutingPoll { alias: Option<String> },
    Network {
        header: NetRomHeader,
        transport: Result<Transport<'a>, NetRomError>,
    },
}

/// Decode a NetRom L3 packet. `unnumbered` is true when the enclosing
/// AX.25 frame was UI, the only frame type that carries Nodes broadcasts.
pub fn parse_netrom(bytes: &[u8], unnumbered: bool) -> Result<NetRomPacket<'_>, NetRomError> {
    let cursor = FrameCursor::new(bytes);
    match cursor.read_u8(0) {
        Ok(layout::NODES_BROADCAST_MARKER) => {
            let body = cursor.read_up_to(1..bytes.len());
            if unnumbered {
                return Ok(NetRomPacket::NodesBroadcast(parse_nodes_broadcast(body)));
            }
            debug!(len = body.len(), "routing info frame skipped");
            return Ok(NetRomPacket::RoutingInfo { len: body.len() });
        }
        Ok(layout::ROUTING_POLL_MARKER) => {
            let alias =
                (cursor.len() > 1).then(|| read_alias(cursor.read_up_to(1..1 + ALIAS_LEN)));
            return Ok(NetRomPacket::RoutingPoll { alias });
        }
        _ => {}
    }

    let (header, rest) = cursor
        .take_array::<{ layout::L3_HEADER_LEN }>()
        .map_err(|err| NetRomError::HeaderTooShort {
            needed: err.needed,
            actual: err.actual,
        })?;
    let header = decode_header(header);
    let transport = parse_transport(rest.as_slice());
    if let Err(err) = &transport {
        debug!(%err, "netrom transport header rejected");
    }

    Ok(NetRomPacket::Network { header, transport })
}

fn decode_header(bytes: &[u8; layout::L3_HEADER_LEN]) -> NetRomHeader {
    let mut source = [0u8; 7];
    source.copy_from_slice(&bytes[layout::L3_SOURCE_RANGE]);
    let mut destination = [0u8; 7];
    destination.copy_from_slice(&bytes[layout::L3_DESTINATION_RANGE]);
    NetRomHeader {
        source: Address::decode(&source, AddressRole::NetRom),
        destination: Address::decode(&destination, AddressRole::NetRom),
        ttl: bytes[layout::L3_TTL_OFFSET],
    }
}
