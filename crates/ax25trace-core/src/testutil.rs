//! Frame builders shared by unit tests.

/// Encode a callsign as a 7-byte AX.25 address field.
///
/// `flags` holds the bits outside the SSID value (C/H, reserved, extension).
pub(crate) fn encode_address(callsign: &str, ssid: u8, flags: u8) -> [u8; 7] {
    let mut field = [b' ' << 1; 7];
    for (slot, ch) in field.iter_mut().zip(callsign.bytes()) {
        *slot = ch << 1;
    }
    field[6] = flags | ((ssid & 0x0f) << 1);
    field
}

/// `G8PZT-1 > ID` UI command carrying `text` with pid 0xF0.
pub(crate) fn ui_text_frame(text: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&encode_address("ID", 0, 0xe0));
    bytes.extend_from_slice(&encode_address("G8PZT", 1, 0x61));
    bytes.extend_from_slice(&[0x03, 0xf0]);
    bytes.extend_from_slice(text);
    bytes
}
