use super::layout;
use crate::protocols::ax25::address::{Address, AddressRole};
use crate::protocols::common::FrameCursor;
use crate::protocols::common::text::read_alias;

/// A Nodes broadcast: the sender's alias and its routing table entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodesBroadcast {
    pub sender_alias: String,
    /// Broadcast length, alias included.
    pub len: usize,
    pub entries: Vec<NodesEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodesEntry {
    pub node: Address,
    pub alias: String,
    pub via: Address,
    pub quality: u8,
}

/// Decode a Nodes broadcast body (the bytes after the 0xFF marker).
///
/// A trailing partial entry is dropped.
pub fn parse_nodes_broadcast(bytes: &[u8]) -> NodesBroadcast {
    let cursor = FrameCursor::new(bytes);
    let sender_alias = read_alias(cursor.read_up_to(0..layout::NODES_ALIAS_LEN));

    let entries = cursor
        .read_up_to(layout::NODES_ALIAS_LEN..bytes.len())
        .chunks_exact(layout::NODES_ENTRY_LEN)
        .map(decode_entry)
        .collect();

    NodesBroadcast {
        sender_alias,
        len: bytes.len(),
        entries,
    }
}

fn decode_entry(entry: &[u8]) -> NodesEntry {
    let mut node = [0u8; 7];
    node.copy_from_slice(&entry[layout::NODES_CALL_RANGE]);
    let mut via = [0u8; 7];
    via.copy_from_slice(&entry[layout::NODES_VIA_RANGE]);
    NodesEntry {
        node: Address::decode(&node, AddressRole::NetRom),
        alias: read_alias(&entry[layout::NODES_ALIAS_RANGE]),
        via: Address::decode(&via, AddressRole::NetRom),
        quality: entry[layout::NODES_QUALITY_OFFSET],
    }
}

#[cfg(test)]
mod tests {
    use super::parse_nodes_broadcast;
    use crate::testutil::encode_address;

    fn entry(node: &str, alias: &[u8; 6], via: &str, quality: u8) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&encode_address(node, 0, 0x60));
        bytes.extend_from_slice(alias);
        bytes.extend_from_slice(&encode_address(via, 2, 0x60));
        bytes.push(quality);
        bytes
    }

    #[test]
    fn alias_only_broadcast_has_no_entries() {
        let broadcast = parse_nodes_broadcast(b"LINUX ");
        assert_eq!(broadcast.sender_alias, "LINUX");
        assert_eq!(broadcast.len, 6);
        assert!(broadcast.entries.is_empty());
    }

    #[test]
    fn decodes_each_full_entry() {
        let mut bytes = b"PZTDOM".to_vec();
        bytes.extend(entry("GB7PZT", b"PZTBBS", "G8PZT", 200));
        bytes.extend(entry("GB7XYZ", b"XYZ   ", "G8PZT", 150));

        let broadcast = parse_nodes_broadcast(&bytes);
        assert_eq!(broadcast.sender_alias, "PZTDOM");
        assert_eq!(broadcast.len, 48);
        assert_eq!(broadcast.entries.len(), 2);
        assert_eq!(broadcast.entries[0].node.to_string(), "GB7PZT");
        assert_eq!(broadcast.entries[0].alias, "PZTBBS");
        assert_eq!(broadcast.entries[0].via.to_string(), "G8PZT-2");
        assert_eq!(broadcast.entries[0].quality, 200);
        assert_eq!(broadcast.entries[1].alias, "XYZ");
    }

    #[test]
    fn trailing_partial_entry_is_dropped() {
        let mut bytes = b"LINUX ".to_vec();
        bytes.extend(entry("GB7PZT", b"PZTBBS", "G8PZT", 200));
        bytes.extend_from_slice(&[0x40; 20]);

        let broadcast = parse_nodes_broadcast(&bytes);
        assert_eq!(broadcast.entries.len(), 1);
    }

    #[test]
    fn short_alias_field_is_tolerated() {
        let broadcast = parse_nodes_broadcast(b"AB");
        assert_eq!(broadcast.sender_alias, "AB");
        assert!(broadcast.entries.is_empty());
    }
}
