//! vCard parsing.
//!
//! ## Usage
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
//! let cards = parse::parse(input).unwrap();
//! assert_eq!(cards[0].formatted_name(), Some("John Doe"));
//! ```
//!
//! ## Features
//!
//! - vCard 2.1, 3.0, and 4.0 blocks
//! - Line folding/unfolding, including quoted-printable soft line breaks
//! - Quoted-printable value decoding with Latin-1 fallback
//! - Property groups (item1.TEL) and bare 2.1 type parameters (TEL;HOME:)
//! - Lenient document scanning that skips malformed blocks with diagnostics

mod decode;
mod error;
mod lexer;
mod parser;

pub use decode::{bytes_to_text, decode_quoted_printable};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{ContentLine, LogicalLine, parse_content_line, split_logical_lines};
pub use parser::{LenientParse, parse, parse_lenient, unescape_text};
