//! Printable-text conventions.
//!
//! Packet radio terminates lines with CR; LF bytes are dropped and CR is
//! rendered as a line break. Bytes outside `32..=127` are escaped as
//! `{0xNN}`.

use std::fmt::Write;

/// Longest alias carried by NetRom routing frames.
pub const ALIAS_LEN: usize = 6;

/// Render a payload run as printable text, always ending with a newline.
pub fn render_text(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 1);
    for &byte in bytes {
        match byte {
            b'\n' => {}
            b'\r' => out.push('\n'),
            _ => push_printable(&mut out, byte),
        }
    }
    out.push('\n');
    out
}

/// Push a byte as-is when printable, otherwise as an escaped hex token.
pub fn push_printable(out: &mut String, byte: u8) {
    if (32..=127).contains(&byte) {
        out.push(byte as char);
    } else {
        push_hex(out, byte);
    }
}

pub fn push_hex(out: &mut String, byte: u8) {
    let _ = write!(out, "{{0x{byte:02x}}}");
}

/// Read a NetRom alias: at most six bytes, stopping at the first
/// whitespace or NUL byte. Unprintable bytes are escaped.
pub fn read_alias(bytes: &[u8]) -> String {
    let mut alias = String::with_capacity(ALIAS_LEN);
    for &byte in bytes
        .iter()
        .take(ALIAS_LEN)
        .take_while(|b| !b.is_ascii_whitespace() && **b != 0)
    {
        push_printable(&mut alias, byte);
    }
    alias
}

#[cfg(test)]
mod tests {
    use super::{read_alias, render_text};

    #[test]
    fn drops_linefeed_and_breaks_on_carriage_return() {
        assert_eq!(render_text(b"ab\r\ncd"), "ab\ncd\n");
    }

    #[test]
    fn escapes_unprintable_bytes() {
        assert_eq!(render_text(&[b'x', 0x07, 0xc3]), "x{0x07}{0xc3}\n");
    }

    #[test]
    fn keeps_space_and_del_range_bounds() {
        assert_eq!(render_text(&[32, 127, 31, 128]), " \u{7f}{0x1f}{0x80}\n");
    }

    #[test]
    fn empty_run_is_a_bare_newline() {
        assert_eq!(render_text(&[]), "\n");
    }

    #[test]
    fn alias_stops_at_space() {
        assert_eq!(read_alias(b"LINUX "), "LINUX");
        assert_eq!(read_alias(b"AB CDEF"), "AB");
    }

    #[test]
    fn alias_is_capped_at_six_characters() {
        assert_eq!(read_alias(b"ABCDEFGH"), "ABCDEF");
    }

    #[test]
    fn alias_escapes_unprintable_bytes() {
        assert_eq!(
            read_alias(&[b'A', 0x0b, 0xc8, 0x07, b'B', b'C']),
            "A{0x0b}{0xc8}{0x07}BC"
        );
    }

    #[test]
    fn alias_handles_short_input() {
        assert_eq!(read_alias(b"XY"), "XY");
        assert_eq!(read_alias(b""), "");
    }
}
