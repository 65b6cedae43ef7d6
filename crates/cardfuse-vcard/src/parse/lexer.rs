//! vCard lexer for line unfolding and content line parsing.
//!
//! Folding rules are shared with iCalendar (RFC 5545 §3.1): a physical
//! line starting with a single space or tab continues the previous logical
//! line. vCard 2.1 adds a second continuation style for quoted-printable
//! values, where a trailing `=` marks a soft line break.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::core::VCardParameter;

/// A logical line with the 1-based number of its first physical line.
#[derive(Debug, Clone)]
pub struct LogicalLine {
    pub text: String,
    pub number: usize,
}

/// Splits raw input into logical lines, merging folded continuations.
///
/// Handles CRLF and bare LF endings, drops the fold marker plus exactly
/// one leading whitespace character, and joins quoted-printable soft line
/// breaks (a quoted-printable property line ending in `=` continues on the
/// next physical line with the `=` removed).
#[must_use]
pub fn split_logical_lines(input: &str) -> Vec<LogicalLine> {
    let mut lines: Vec<LogicalLine> = Vec::new();
    let mut current: Option<LogicalLine> = None;
    let mut qp_continuation = false;

    for (idx, raw) in input.lines().enumerate() {
        let number = idx + 1;

        if qp_continuation {
            qp_continuation = false;
            if let Some(cur) = current.as_mut() {
                cur.text.push_str(raw);
                if take_soft_break(&mut cur.text) {
                    qp_continuation = true;
                }
                continue;
            }
        }

        if let Some(rest) = raw.strip_prefix([' ', '\t']) {
            if let Some(cur) = current.as_mut() {
                cur.text.push_str(rest);
            } else {
                // Continuation with nothing to continue; treat as a line.
                current = Some(LogicalLine {
                    text: rest.to_string(),
                    number,
                });
            }
        } else {
            if let Some(cur) = current.take() {
                if !cur.text.is_empty() {
                    lines.push(cur);
                }
            }
            current = Some(LogicalLine {
                text: raw.to_string(),
                number,
            });
        }

        if let Some(cur) = current.as_mut() {
            if take_soft_break(&mut cur.text) {
                qp_continuation = true;
            }
        }
    }

    if let Some(cur) = current.take() {
        if !cur.text.is_empty() {
            lines.push(cur);
        }
    }

    lines
}

/// Removes a trailing quoted-printable soft break, returning whether one
/// was present. Only lines whose name/parameter segment declares
/// QUOTED-PRINTABLE qualify; a bare `=` anywhere else is data.
fn take_soft_break(text: &mut String) -> bool {
    if !text.ends_with('=') {
        return false;
    }
    let head = text.split(':').next().unwrap_or("");
    if !head.to_ascii_uppercase().contains("QUOTED-PRINTABLE") {
        return false;
    }
    text.pop();
    true
}

/// A parsed content line before value interpretation.
#[derive(Debug, Clone)]
pub struct ContentLine {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name (uppercase).
    pub name: String,
    /// Parameters.
    pub params: Vec<VCardParameter>,
    /// Raw value string.
    pub value: String,
}

/// Parses a single content line into its components.
///
/// Format: `[group.]name[;param[=value]]*:value`. A parameter without `=`
/// is a vCard 2.1 shorthand: encodings fold into ENCODING, everything else
/// into TYPE.
///
/// ## Errors
/// Returns an error if the line is malformed or missing the colon separator.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    // Find the colon separating name/params from value
    let colon_pos = find_value_separator(line).ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            "missing colon separator",
        )
    })?;

    let (name_params, value) = line.split_at(colon_pos);
    let value = &value[1..]; // Skip the colon

    // Parse group and name
    let (group, name_params) = parse_group(name_params);

    // Split name from parameters
    let (name, params_str) = if let Some(semi_pos) = name_params.find(';') {
        (&name_params[..semi_pos], Some(&name_params[semi_pos + 1..]))
    } else {
        (name_params, None)
    };

    // Validate property name
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            format!("invalid property name: {name}"),
        ));
    }

    // Parse parameters
    let params = if let Some(params_str) = params_str {
        parse_parameters(params_str, line_num)?
    } else {
        Vec::new()
    };

    Ok(ContentLine {
        group: group.map(String::from),
        name: name.to_ascii_uppercase(),
        params,
        value: value.to_string(),
    })
}

/// Finds the colon that separates name/params from value.
///
/// Must handle quoted parameter values that may contain colons.
fn find_value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

/// Parses optional group prefix.
fn parse_group(s: &str) -> (Option<&str>, &str) {
    if let Some(dot_pos) = s.find('.') {
        let potential_group = &s[..dot_pos];
        // Group must be alphanumeric + hyphen
        if !potential_group.is_empty()
            && potential_group
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return (Some(potential_group), &s[dot_pos + 1..]);
        }
    }
    (None, s)
}

/// Parses parameter string into parameters.
fn parse_parameters(s: &str, line_num: usize) -> ParseResult<Vec<VCardParameter>> {
    let mut params = Vec::new();
    let mut remaining = s;

    while !remaining.is_empty() {
        let (param, rest) = parse_single_parameter(remaining, line_num)?;
        params.push(param);
        remaining = rest;
    }

    Ok(params)
}

/// Parses a single parameter and returns the remaining string.
fn parse_single_parameter(s: &str, line_num: usize) -> ParseResult<(VCardParameter, &str)> {
    // A parameter either has `name=value(s)` form or is a bare 2.1 token.
    let boundary = s.find(['=', ';']);

    match boundary {
        Some(pos) if s.as_bytes()[pos] == b'=' => {
            let name = &s[..pos];
            if name.is_empty() {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidParameter,
                    line_num,
                    "empty parameter name",
                ));
            }
            let (values, remaining) = parse_param_values(&s[pos + 1..]);
            Ok((VCardParameter::multi(name, values), remaining))
        }
        Some(pos) => {
            // Bare token followed by another parameter
            let token = &s[..pos];
            if token.is_empty() {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidParameter,
                    line_num,
                    "empty parameter",
                ));
            }
            Ok((bare_parameter(token), &s[pos + 1..]))
        }
        None => {
            if s.is_empty() {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidParameter,
                    line_num,
                    "empty parameter",
                ));
            }
            Ok((bare_parameter(s), ""))
        }
    }
}

/// Interprets a vCard 2.1 bare parameter token.
fn bare_parameter(token: &str) -> VCardParameter {
    if token.eq_ignore_ascii_case("QUOTED-PRINTABLE")
        || token.eq_ignore_ascii_case("BASE64")
        || token.eq_ignore_ascii_case("8BIT")
    {
        VCardParameter::new("ENCODING", token)
    } else {
        VCardParameter::type_param(token)
    }
}

/// Parses parameter values (comma-separated, possibly quoted).
fn parse_param_values(s: &str) -> (Vec<String>, &str) {
    let mut values = Vec::new();
    let mut chars = s.chars().peekable();
    let mut current_value = String::new();
    let mut in_quotes = false;
    let mut consumed = 0;

    while let Some(&c) = chars.peek() {
        consumed += c.len_utf8();

        match c {
            '"' => {
                chars.next();
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                chars.next();
                values.push(std::mem::take(&mut current_value));
            }
            ';' if !in_quotes => {
                // Next parameter
                chars.next();
                if !current_value.is_empty() || !values.is_empty() {
                    values.push(current_value);
                }
                return (values, &s[consumed..]);
            }
            '^' if !in_quotes => {
                // RFC 6868 caret encoding
                chars.next();
                if let Some(&next) = chars.peek() {
                    consumed += next.len_utf8();
                    chars.next();
                    match next {
                        'n' => current_value.push('\n'),
                        '\'' => current_value.push('"'),
                        '^' => current_value.push('^'),
                        _ => {
                            current_value.push('^');
                            current_value.push(next);
                        }
                    }
                } else {
                    current_value.push('^');
                }
            }
            _ => {
                chars.next();
                current_value.push(c);
            }
        }
    }

    // End of string
    if !current_value.is_empty() || !values.is_empty() {
        values.push(current_value);
    }

    (values, "")
}
