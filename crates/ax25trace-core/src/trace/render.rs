use super::writer::TraceWriter;
use crate::protocols::ax25::{
    CommandResponse, ControlField, Header, Payload, PayloadBody, Segmentation,
};
use crate::protocols::common::text::{push_hex, push_printable, render_text};
use crate::protocols::netrom::{
    NetRomError, NetRomPacket, NodesBroadcast, Opcode, Transport, TransportFields,
};

/// Indent for the second line of a connect request, lining up under the
/// NetRom header.
const CONTINUATION_INDENT: &str = "         ";

pub(crate) fn render_header(out: &mut TraceWriter, header: &Header) {
    if !out.at_line_start() {
        out.push_str(" ");
    }
    out.push(format_args!("{} > {}", header.source, header.destination));
    for digi in &header.digipeaters {
        out.push(format_args!(",{digi}"));
        if digi.has_been_repeated() {
            out.push_str("*");
        }
    }
}

pub(crate) fn render_control(out: &mut TraceWriter, control: &ControlField, dama: bool) {
    out.push(format_args!(" <{} ", control.frame_type));
    let (marker, poll_final) = match control.command_response {
        CommandResponse::Command => ("C", " P"),
        CommandResponse::Response => ("R", " F"),
        CommandResponse::Legacy => ("V1", " P"),
    };
    out.push_str(marker);
    if control.poll_final {
        out.push_str(poll_final);
    }
    if let Some(nr) = control.receive_seq {
        out.push(format_args!(" R{nr}"));
    }
    if let Some(ns) = control.send_seq {
        out.push(format_args!(" S{ns}"));
    }
    out.push_str(">");
    if dama {
        out.push_str(" [DAMA]");
    }
}

pub(crate) fn render_payload(out: &mut TraceWriter, payload: &Payload<'_>) {
    if let Some(Segmentation { first, remaining }) = payload.segment {
        let which = if first { "first segment" } else { "segment" };
        out.push(format_args!(" [{which}: ({remaining} left)]"));
    }
    out.push(format_args!(" ilen={} pid={}", payload.data.len(), payload.pid));
    if let Some(label) = payload.protocol.label() {
        out.push(format_args!(" {label}"));
    }
    out.end_line();

    match &payload.body {
        PayloadBody::Text(data) => out.push_str(&render_text(data)),
        PayloadBody::NetRom(packet) => render_netrom(out, packet),
        PayloadBody::Undecoded => {}
    }
}

fn render_netrom(out: &mut TraceWriter, packet: &Result<NetRomPacket<'_>, NetRomError>) {
    out.push_str("  ");
    match packet {
        Ok(NetRomPacket::NodesBroadcast(broadcast)) => render_nodes(out, broadcast),
        Ok(NetRomPacket::RoutingInfo { len }) => {
            out.push(format_args!("INP3 routing info ({len} bytes, not decoded)"));
            out.end_line();
        }
        Ok(NetRomPacket::RoutingPoll { alias }) => {
            match alias {
                Some(alias) => out.push(format_args!("Routing poll from {alias}")),
                None => out.push_str("Routing poll (bad)"),
            }
            out.end_line();
        }
        Ok(NetRomPacket::Network { header, transport }) => {
            out.push(format_args!(
                "NTRM: {} to {} ttl={}",
                header.source, header.destination, header.ttl
            ));
            match transport {
                Ok(transport) => render_transport(out, transport),
                Err(err) => {
                    out.push(format_args!(" ({err})"));
                    out.end_line();
                }
            }
        }
        Err(err) => {
            out.push(format_args!("({err})"));
            out.end_line();
        }
    }
}

fn render_nodes(out: &mut TraceWriter, broadcast: &NodesBroadcast) {
    out.push(format_args!(
        "NODES broadcast from {} len = {}",
        broadcast.sender_alias, broadcast.len
    ));
    out.end_line();
    for entry in &broadcast.entries {
        out.push(format_args!(
            "    {}:{} via {} qlty={}",
            entry.node, entry.alias, entry.via, entry.quality
        ));
        out.end_line();
    }
}

fn render_transport(out: &mut TraceWriter, transport: &Transport<'_>) {
    if let TransportFields::ProtocolExtension { family, protocol } = &transport.fields {
        out.push(format_args!(" pf={family:02x} prot={protocol:02x}"));
        out.end_line();
        return;
    }

    let [high, low] = transport.circuit;
    out.push(format_args!(" cct={high:02X}{low:02X}"));

    match &transport.fields {
        TransportFields::ConnectRequest {
            window,
            origin,
            origin_node,
            timeout,
            vendor,
            vendor_extra,
        } => {
            out.push(format_args!(" <CONN REQ> w={window}"));
            out.end_line();
            out.push(format_args!("{CONTINUATION_INDENT}{origin} at {origin_node}"));
            if let Some(timeout) = timeout {
                out.push(format_args!(" t/o={timeout}"));
            }
            let mut vendor_text = String::new();
            if let Some(vendor) = vendor {
                vendor_text.push(' ');
                push_printable(&mut vendor_text, *vendor);
            }
            if let Some(extra) = vendor_extra {
                vendor_text.push(' ');
                push_hex(&mut vendor_text, *extra);
            }
            out.push_str(&vendor_text);
        }
        TransportFields::ConnectAck {
            window,
            peer_circuit: [peer_high, peer_low],
        } => out.push(format_args!(
            " <CONN ACK> w={window} my_cct={peer_high:02X}{peer_low:02X}"
        )),
        TransportFields::ConnectNak => out.push_str(" <CONN NAK>"),
        TransportFields::DisconnectRequest => out.push_str(" <DISC REQ>"),
        TransportFields::DisconnectAck => out.push_str(" <DISC ACK>"),
        TransportFields::Info {
            send_seq,
            receive_seq,
            ..
        } => out.push(format_args!(" <INFO S{send_seq} R{receive_seq}>")),
        TransportFields::InfoAck { receive_seq } => {
            out.push(format_args!(" <INFO ACK R{receive_seq}>"))
        }
        TransportFields::Reset {
            peer_circuit: [peer_high, peer_low],
        } => out.push(format_args!(" <RSET> my_cct={peer_high:02X}{peer_low:02X}")),
        TransportFields::ConnectRequestExtended {
            service,
            window,
            origin,
            origin_node,
            flags,
        } => {
            out.push(format_args!(" <CONN REQX> svc={service} w={window}"));
            out.end_line();
            out.push(format_args!("{CONTINUATION_INDENT}{origin} at {origin_node}"));
            if let Some(flags) = flags {
                out.push(format_args!(" flg={flags}"));
            }
        }
        TransportFields::Unknown => {
            if let Opcode::Unknown(op) = transport.opcode {
                out.push(format_args!(" <op={op}>"));
            }
        }
        TransportFields::ProtocolExtension { .. } => {}
    }

    if transport.flags.choke() && transport.opcode != Opcode::ConnectAck {
        out.push_str(" <CHOKE>");
    }
    if transport.flags.nak() {
        out.push_str(" <NAK>");
    }
    if transport.flags.more() {
        out.push_str(" <MORE>");
    }
    out.end_line();

    if let TransportFields::Info { data, .. } = &transport.fields {
        out.push_str("  DATA: ");
        out.push_str(&render_text(data));
    }
}
