//! vCard document parser.

use super::decode::{bytes_to_text, decode_quoted_printable, sanitize_decoded};
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{ContentLine, LogicalLine, parse_content_line, split_logical_lines};
use crate::core::{VCard, VCardProperty, VCardVersion, names};

/// Parses a vCard document into one or more vCards.
///
/// ## Errors
/// Returns a parse error if any block is malformed. Use [`parse_lenient`]
/// to skip bad blocks instead.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<Vec<VCard>> {
    let lines = split_logical_lines(input);
    tracing::trace!(count = lines.len(), "Split logical lines");

    let mut parser = Parser::new(lines);
    let mut cards = Vec::new();

    while parser.seek_begin() {
        cards.push(parser.parse_vcard()?);
    }

    tracing::debug!(count = cards.len(), "Parsed vCards");
    Ok(cards)
}

/// Outcome of a lenient document scan.
#[derive(Debug, Default)]
pub struct LenientParse {
    /// Blocks that parsed cleanly.
    pub cards: Vec<VCard>,
    /// One diagnostic per skipped block.
    pub skipped: Vec<ParseError>,
}

/// Parses a vCard document, skipping malformed blocks.
///
/// A block missing its END:VCARD, or containing an unparseable content
/// line, is dropped and reported in `skipped`; scanning resumes at the
/// next BEGIN:VCARD so one bad export entry never poisons the rest of the
/// file. Content outside BEGIN/END pairs is ignored.
#[must_use]
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_lenient(input: &str) -> LenientParse {
    let lines = split_logical_lines(input);
    let mut parser = Parser::new(lines);
    let mut result = LenientParse::default();

    while parser.seek_begin() {
        match parser.parse_vcard() {
            Ok(card) => result.cards.push(card),
            Err(err) => {
                tracing::warn!(line = err.line, error = %err, "Skipping malformed vCard block");
                result.skipped.push(err);
            }
        }
    }

    tracing::debug!(
        parsed = result.cards.len(),
        skipped = result.skipped.len(),
        "Lenient parse finished"
    );
    result
}

struct Parser {
    lines: Vec<LogicalLine>,
    pos: usize,
}

impl Parser {
    fn new(lines: Vec<LogicalLine>) -> Self {
        Self { lines, pos: 0 }
    }

    /// Advances to the next BEGIN:VCARD line and consumes it.
    /// Returns false at end of input.
    fn seek_begin(&mut self) -> bool {
        while self.pos < self.lines.len() {
            let line = &self.lines[self.pos];
            self.pos += 1;
            if is_begin(&line.text) {
                return true;
            }
        }
        false
    }

    /// Parses one vCard body, positioned just after its BEGIN:VCARD line.
    ///
    /// On error the position is left at the offending line, so a lenient
    /// caller resumes scanning from there; in particular a nested
    /// BEGIN:VCARD (evidence of a missing END) is re-seen by `seek_begin`.
    fn parse_vcard(&mut self) -> ParseResult<VCard> {
        let start_line = self.lines[self.pos - 1].number;
        let mut version = VCardVersion::default();
        let mut properties = Vec::new();

        while self.pos < self.lines.len() {
            let line = &self.lines[self.pos];
            let line_num = line.number;

            if is_begin(&line.text) {
                // Previous block never closed; leave pos on this BEGIN.
                return Err(ParseError::new(
                    ParseErrorKind::UnterminatedBlock,
                    start_line,
                    "vCard not closed with END:VCARD before next BEGIN:VCARD",
                ));
            }

            self.pos += 1;

            if line.text.eq_ignore_ascii_case("END:VCARD") {
                return Ok(VCard {
                    version,
                    properties,
                });
            }

            let content_line = parse_content_line(&line.text, line_num)?;

            if content_line.name == names::VERSION {
                version = VCardVersion::parse(&content_line.value).ok_or_else(|| {
                    ParseError::new(
                        ParseErrorKind::UnsupportedVersion,
                        line_num,
                        format!("unsupported vCard version: {}", content_line.value),
                    )
                })?;
            } else {
                properties.push(build_property(content_line));
            }
        }

        Err(ParseError::new(
            ParseErrorKind::UnterminatedBlock,
            start_line,
            "vCard not closed with END:VCARD",
        ))
    }
}

fn is_begin(text: &str) -> bool {
    text.eq_ignore_ascii_case("BEGIN:VCARD")
}

/// Converts a content line into a property, decoding quoted-printable
/// values declared by an ENCODING parameter.
///
/// Decoded properties drop their ENCODING/CHARSET parameters: the value
/// is plain UTF-8 from here on and the serializer emits it as such.
fn build_property(line: ContentLine) -> VCardProperty {
    let is_qp = line
        .params
        .iter()
        .any(|p| p.name == "ENCODING" && p.has_value("QUOTED-PRINTABLE"));

    let (raw_value, value, params) = if is_qp {
        let decoded = bytes_to_text(&decode_quoted_printable(&line.value));
        let raw = sanitize_decoded(&decoded);
        let params = line
            .params
            .into_iter()
            .filter(|p| p.name != "ENCODING" && p.name != "CHARSET")
            .collect();
        (raw.clone(), unescape_text(&raw), params)
    } else {
        let value = unescape_text(&line.value);
        (line.value, value, line.params)
    };

    VCardProperty {
        group: line.group,
        name: line.name,
        params,
        value,
        raw_value,
    }
}

/// Unescapes a vCard text value.
///
/// vCard escapes: \n, \N (newline), \, (comma), \; (semicolon), \\ (backslash)
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('n' | 'N') => {
                    chars.next();
                    result.push('\n');
                }
                Some(',') => {
                    chars.next();
                    result.push(',');
                }
                Some(';') => {
                    chars.next();
                    result.push(';');
                }
                Some('\\') => {
                    chars.next();
                    result.push('\\');
                }
                _ => result.push(c),
            }
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_VCARD: &str = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:John Doe\r\n\
N:Doe;John;;;\r\n\
EMAIL:john@example.com\r\n\
END:VCARD\r\n";

    #[test]
    fn parse_simple_vcard() {
        let cards = parse(SIMPLE_VCARD).unwrap();
        assert_eq!(cards.len(), 1);

        let card = &cards[0];
        assert_eq!(card.version, VCardVersion::V4);
        assert_eq!(card.formatted_name(), Some("John Doe"));
        assert_eq!(card.emails(), vec!["john@example.com"]);
    }

    #[test]
    fn parse_with_groups() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Jane Doe\r\n\
item1.TEL:+1-555-555-5555\r\n\
item1.X-ABLABEL:Work\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        let card = &cards[0];

        let tel_props = card.get_properties("TEL");
        assert_eq!(tel_props.len(), 1);
        assert_eq!(tel_props[0].group, Some("item1".to_string()));
    }

    #[test]
    fn parse_with_parameters() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Jane Doe\r\n\
TEL;TYPE=home,voice;PREF=1:+1-555-555-5555\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        let card = &cards[0];

        let tel = card.get_property("TEL").unwrap();
        assert!(tel.has_type("home"));
        assert!(tel.has_type("voice"));
    }

    #[test]
    fn parse_v21_vcard() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
FN:John Doe\r\n\
TEL;HOME:555-0100\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        assert_eq!(cards[0].version, VCardVersion::V21);
        assert!(cards[0].get_property("TEL").unwrap().has_type("home"));
    }

    #[test]
    fn parse_multiple_vcards() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:John Doe\r\n\
END:VCARD\r\n\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Jane Doe\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].formatted_name(), Some("John Doe"));
        assert_eq!(cards[1].formatted_name(), Some("Jane Doe"));
    }

    #[test]
    fn parse_folded_lines() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:John Doe with a very long name \r\n that spans multiple lines\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        assert_eq!(
            cards[0].formatted_name(),
            Some("John Doe with a very long name that spans multiple lines")
        );
    }

    #[test]
    fn parse_quoted_printable_value() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
FN;ENCODING=QUOTED-PRINTABLE;CHARSET=UTF-8:Ren=C3=A9 M=C3=BCller\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        let fn_prop = cards[0].get_property("FN").unwrap();
        assert_eq!(fn_prop.value, "René Müller");
        // Encoding parameters are consumed by decoding.
        assert!(fn_prop.get_param("ENCODING").is_none());
        assert!(fn_prop.get_param("CHARSET").is_none());
    }

    #[test]
    fn parse_quoted_printable_latin1() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
FN;ENCODING=QUOTED-PRINTABLE;CHARSET=ISO-8859-1:Ren=E9\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        assert_eq!(cards[0].formatted_name(), Some("René"));
    }

    #[test]
    fn parse_quoted_printable_soft_break() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
NOTE;ENCODING=QUOTED-PRINTABLE:first half =\r\nsecond half\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        let note = cards[0].get_property("NOTE").unwrap();
        assert_eq!(note.value, "first half second half");
    }

    #[test]
    fn parse_missing_end_fails() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:John Doe\r\n";

        let result = parse(input);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind, ParseErrorKind::UnterminatedBlock);
    }

    #[test]
    fn parse_unsupported_version_fails() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:9.9\r\n\
FN:John Doe\r\n\
END:VCARD\r\n";

        assert!(parse(input).is_err());
    }

    #[test]
    fn lenient_skips_unterminated_block() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Broken Record\r\n\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Good Record\r\n\
END:VCARD\r\n";

        let result = parse_lenient(input);
        assert_eq!(result.cards.len(), 1);
        assert_eq!(result.cards[0].formatted_name(), Some("Good Record"));
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].kind, ParseErrorKind::UnterminatedBlock);
    }

    #[test]
    fn lenient_skips_trailing_unterminated_block() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Good Record\r\n\
END:VCARD\r\n\
BEGIN:VCARD\r\n\
FN:Never Closed\r\n";

        let result = parse_lenient(input);
        assert_eq!(result.cards.len(), 1);
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn lenient_ignores_stray_content() {
        let input = "\
some junk line\r\n\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Only Record\r\n\
END:VCARD\r\n\
trailing junk\r\n";

        let result = parse_lenient(input);
        assert_eq!(result.cards.len(), 1);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn unescape_basic() {
        assert_eq!(unescape_text("a\\,b\\;c\\\\d\\ne"), "a,b;c\\d\ne");
        assert_eq!(unescape_text("plain"), "plain");
    }
}
