//! vCard text escaping.

/// Escapes a text value for vCard serialization.
///
/// Escapes backslash, newline, comma, and semicolon.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\r' => {} // Skip CR (use \n for newlines)
            _ => result.push(c),
        }
    }

    result
}

/// Escapes a parameter value for vCard serialization.
///
/// Uses RFC 6868 caret encoding for special characters.
/// Returns `(value, needs_quotes)`.
#[must_use]
pub fn escape_param_value(s: &str) -> (String, bool) {
    let mut result = String::with_capacity(s.len());
    let mut needs_quotes = false;

    for c in s.chars() {
        match c {
            '^' => result.push_str("^^"),
            '\n' => result.push_str("^n"),
            '"' => {
                result.push_str("^'");
                needs_quotes = true;
            }
            ':' | ';' | ',' => {
                result.push(c);
                needs_quotes = true;
            }
            _ if c.is_control() => {
                // Skip other control characters
            }
            _ => result.push(c),
        }
    }

    (result, needs_quotes)
}
