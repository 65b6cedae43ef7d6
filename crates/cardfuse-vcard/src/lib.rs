//! vCard model, parser, and serializer.
//!
//! ## Overview
//!
//! Implements the slice of vCard (RFC 6350, RFC 2426, and the vCard 2.1
//! spec) needed to merge contact exports: content-line lexing with
//! unfolding, quoted-printable and charset recovery, a tolerant document
//! parser, and a serializer that re-folds lines and emits plain UTF-8.
//!
//! ## Usage
//!
//! ### Parsing
//!
//! ```rust
//! use cardfuse_vcard::parse;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:4.0\r\n\
//! FN:John Doe\r\n\
//! EMAIL:john@example.com\r\n\
//! END:VCARD\r\n";
//!
//! let cards = parse(input).unwrap();
//! assert_eq!(cards[0].formatted_name(), Some("John Doe"));
//! ```
//!
//! ### Serializing
//!
//! ```rust
//! use cardfuse_vcard::{VCard, VCardProperty, serialize};
//!
//! let mut card = VCard::new();
//! card.add_property(VCardProperty::text("FN", "Jane Doe"));
//! card.add_property(VCardProperty::text("EMAIL", "jane@example.com"));
//!
//! let output = serialize(&[card]);
//! assert!(output.contains("FN:Jane Doe"));
//! ```
//!
//! ## Round-Trip Fidelity
//!
//! Properties keep the wire-form value they were parsed with (after
//! unfolding and content decoding) and serialization emits it verbatim in
//! the order properties were stored, so a parse/serialize cycle never
//! rewrites a contact's display values.

pub mod build;
pub mod core;
pub mod parse;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use build::{serialize, serialize_single};
pub use core::{VCard, VCardParameter, VCardProperty, VCardVersion};
pub use parse::{LenientParse, ParseError, ParseResult, parse, parse_lenient};
