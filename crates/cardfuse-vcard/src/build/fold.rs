//! vCard line folding.

/// Maximum line length in octets (not characters) per RFC 6350.
const MAX_LINE_OCTETS: usize = 75;

/// Folds a line to the maximum length.
///
/// Lines longer than 75 octets are folded by inserting CRLF + space.
/// Folds at UTF-8 character boundaries.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut segments: Vec<String> = Vec::new();
    let mut current = String::with_capacity(MAX_LINE_OCTETS);
    let mut budget = MAX_LINE_OCTETS;

    for c in line.chars() {
        if current.len() + c.len_utf8() > budget {
            segments.push(std::mem::take(&mut current));
            // Continuation lines carry a leading space inside the limit.
            budget = MAX_LINE_OCTETS - 1;
        }
        current.push(c);
    }
    segments.push(current);

    segments.join("\r\n ")
}
