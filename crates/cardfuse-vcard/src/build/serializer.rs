//! vCard serialization.
//!
//! Properties are emitted in stored order. Merged output promises stable
//! first-seen property order, so no canonical re-sorting happens here.

use super::escape::escape_param_value;
use super::fold::fold_line;
use crate::core::{VCard, VCardParameter, VCardProperty};

/// Serializes one or more vCards to a string.
///
/// Produces output with proper line folding, parameter escaping, and CRLF
/// line endings. Property values are emitted verbatim from their wire form.
#[must_use]
pub fn serialize(cards: &[VCard]) -> String {
    let mut output = String::new();

    for card in cards {
        serialize_vcard(card, &mut output);
    }

    output
}

/// Serializes a single vCard to a string.
#[must_use]
pub fn serialize_single(card: &VCard) -> String {
    let mut output = String::new();
    serialize_vcard(card, &mut output);
    output
}

fn serialize_vcard(card: &VCard, output: &mut String) {
    output.push_str("BEGIN:VCARD\r\n");

    // VERSION must be first after BEGIN
    output.push_str("VERSION:");
    output.push_str(card.version.as_str());
    output.push_str("\r\n");

    for prop in &card.properties {
        serialize_property(prop, output);
    }

    output.push_str("END:VCARD\r\n");
}

fn serialize_property(prop: &VCardProperty, output: &mut String) {
    let mut line = String::new();

    // Group prefix
    if let Some(ref group) = prop.group {
        line.push_str(group);
        line.push('.');
    }

    // Property name
    line.push_str(&prop.name);

    // Parameters
    for param in &prop.params {
        serialize_parameter(param, &mut line);
    }

    // Value
    line.push(':');
    line.push_str(&prop.raw_value);

    // Fold and add to output
    output.push_str(&fold_line(&line));
    output.push_str("\r\n");
}

fn serialize_parameter(param: &VCardParameter, output: &mut String) {
    output.push(';');
    output.push_str(&param.name);
    output.push('=');

    if param.values.is_empty() {
        return;
    }

    for (i, value) in param.values.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }

        let (escaped, needs_quotes) = escape_param_value(value);

        if needs_quotes {
            output.push('"');
            output.push_str(&escaped);
            output.push('"');
        } else {
            output.push_str(&escaped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{VCardVersion, names};

    #[test]
    fn serialize_simple_vcard() {
        let mut card = VCard::with_version(VCardVersion::V4);
        card.add_property(VCardProperty::text("FN", "John Doe"));

        let output = serialize_single(&card);

        assert!(output.starts_with("BEGIN:VCARD\r\n"));
        assert!(output.contains("VERSION:4.0\r\n"));
        assert!(output.contains("FN:John Doe\r\n"));
        assert!(output.ends_with("END:VCARD\r\n"));
    }

    #[test]
    fn serialize_v3_vcard() {
        let mut card = VCard::with_version(VCardVersion::V3);
        card.add_property(VCardProperty::text("FN", "John Doe"));

        let output = serialize_single(&card);
        assert!(output.contains("VERSION:3.0\r\n"));
    }

    #[test]
    fn serialize_with_group() {
        let mut card = VCard::new();
        let mut prop = VCardProperty::text("TEL", "+1-555-555-5555");
        prop.group = Some("item1".to_string());
        card.add_property(prop);

        let output = serialize_single(&card);
        assert!(output.contains("item1.TEL:+1-555-555-5555\r\n"));
    }

    #[test]
    fn serialize_with_parameters() {
        let mut card = VCard::new();
        let mut prop = VCardProperty::text("TEL", "+1-555-555-5555");
        prop.add_type("home");
        prop.add_type("voice");
        card.add_property(prop);

        let output = serialize_single(&card);
        assert!(output.contains("TEL;TYPE=home,voice:+1-555-555-5555\r\n"));
    }

    #[test]
    fn serialize_escapes_text() {
        let mut card = VCard::new();
        card.add_property(VCardProperty::text(
            names::NOTE,
            "Line1\nLine2; with special, chars",
        ));

        let output = serialize_single(&card);
        assert!(output.contains("NOTE:Line1\\nLine2\\; with special\\, chars\r\n"));
    }

    #[test]
    fn serialize_preserves_property_order() {
        let mut card = VCard::new();
        card.add_property(VCardProperty::text("EMAIL", "a@example.com"));
        card.add_property(VCardProperty::text("FN", "Order Test"));
        card.add_property(VCardProperty::text("TEL", "555-0100"));

        let output = serialize_single(&card);
        let email_pos = output.find("EMAIL").unwrap();
        let fn_pos = output.find("FN:").unwrap();
        let tel_pos = output.find("TEL").unwrap();
        assert!(email_pos < fn_pos);
        assert!(fn_pos < tel_pos);
    }

    #[test]
    fn serialize_multiple_vcards() {
        let cards = vec![
            {
                let mut c = VCard::new();
                c.add_property(VCardProperty::text("FN", "John Doe"));
                c
            },
            {
                let mut c = VCard::new();
                c.add_property(VCardProperty::text("FN", "Jane Doe"));
                c
            },
        ];

        let output = serialize(&cards);

        assert_eq!(output.matches("BEGIN:VCARD").count(), 2);
        assert_eq!(output.matches("END:VCARD").count(), 2);
    }

    #[test]
    fn serialize_folds_long_lines() {
        let mut card = VCard::new();
        let long_value = "X".repeat(100);
        card.add_property(VCardProperty::text("NOTE", &long_value));

        let output = serialize_single(&card);
        assert!(output.contains("\r\n "));
    }
}
