use super::SourceError;

/// Decode hexadecimal text into bytes.
///
/// Whitespace is ignored and `#` starts a comment running to the end of the
/// line.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, SourceError> {
    let mut bytes = Vec::with_capacity(text.len() / 2);
    let mut high: Option<u8> = None;

    for (index, line) in text.lines().enumerate() {
        let data = line.split('#').next().unwrap_or_default();
        for ch in data.chars().filter(|ch| !ch.is_whitespace()) {
            let nibble = ch.to_digit(16).ok_or(SourceError::InvalidHex {
                line: index + 1,
                found: ch,
            })? as u8;
            match high.take() {
                Some(high) => bytes.push((high << 4) | nibble),
                None => high = Some(nibble),
            }
        }
    }

    if high.is_some() {
        return Err(SourceError::OddHexDigits);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::parse_hex;
    use crate::source::SourceError;

    #[test]
    fn ignores_whitespace_and_comments() {
        let bytes = parse_hex("# header\n92 88 40\n  4040 # tail\n").unwrap();
        assert_eq!(bytes, vec![0x92, 0x88, 0x40, 0x40, 0x40]);
    }

    #[test]
    fn accepts_mixed_case() {
        assert_eq!(parse_hex("aBcD").unwrap(), vec![0xab, 0xcd]);
    }

    #[test]
    fn rejects_odd_digit_count() {
        assert!(matches!(parse_hex("abc"), Err(SourceError::OddHexDigits)));
    }

    #[test]
    fn reports_line_of_bad_digit() {
        let err = parse_hex("00\n0g").unwrap_err();
        assert!(matches!(err, SourceError::InvalidHex { line: 2, found: 'g' }));
    }
}
