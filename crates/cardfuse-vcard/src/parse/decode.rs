//! Content decoding for property values.
//!
//! Quoted-printable shows up in vCard 2.1 exports (and in 3.0 files
//! produced by older phones); charsets are UTF-8 or Latin-1 in practice.
//! Decoding happens once at parse time so the rest of the pipeline only
//! ever sees UTF-8 text.

/// Decodes a quoted-printable value into raw bytes.
///
/// `=XX` hex escapes become the named byte. Soft line breaks are already
/// consumed by the lexer; a malformed escape is kept literally rather than
/// rejected, since contact exports are full of them.
#[must_use]
pub fn decode_quoted_printable(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'=' {
            if let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).copied().and_then(hex_digit),
                bytes.get(i + 2).copied().and_then(hex_digit),
            ) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    out
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

/// Interprets decoded bytes as text: UTF-8 when valid, Latin-1 otherwise.
#[must_use]
pub fn bytes_to_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Rewrites decoded control characters so the value stays emittable as a
/// single vCard content line. Newlines become the `\n` escape; other
/// structural characters are left alone because in quoted-printable
/// sources they were literal wire bytes (e.g. ADR component separators).
#[must_use]
pub fn sanitize_decoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_plain_ascii() {
        assert_eq!(decode_quoted_printable("hello"), b"hello");
    }

    #[test]
    fn decode_hex_escape() {
        assert_eq!(decode_quoted_printable("a=20b"), b"a b");
        assert_eq!(decode_quoted_printable("=41=42"), b"AB");
    }

    #[test]
    fn decode_lowercase_hex() {
        assert_eq!(decode_quoted_printable("=c3=a9"), vec![0xC3, 0xA9]);
    }

    #[test]
    fn decode_malformed_escape_is_literal() {
        assert_eq!(decode_quoted_printable("=G1"), b"=G1");
        assert_eq!(decode_quoted_printable("100%=")[..], b"100%="[..]);
    }

    #[test]
    fn utf8_bytes_decode_as_utf8() {
        // C3 A9 is 'é' in UTF-8
        assert_eq!(bytes_to_text(&[0xC3, 0xA9]), "é");
    }

    #[test]
    fn invalid_utf8_falls_back_to_latin1() {
        // E9 alone is 'é' in Latin-1 but invalid UTF-8
        assert_eq!(bytes_to_text(&[0xE9]), "é");
    }

    #[test]
    fn sanitize_escapes_newlines() {
        assert_eq!(sanitize_decoded("a\r\nb\nc"), "a\\nb\\nc");
        assert_eq!(sanitize_decoded("no newline"), "no newline");
    }
}
