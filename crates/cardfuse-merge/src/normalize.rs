//! Comparison-only field normalization.
//!
//! Every function here is pure: it derives a canonical string from a raw
//! field value and never touches the record the value came from. The
//! canonical forms exist solely for equality testing; output always uses
//! the original display values.

use cardfuse_core::PhoneMatch;

/// Honorific tokens stripped from the front of a name.
const HONORIFICS: &[&str] = &[
    "mr", "mrs", "ms", "miss", "mx", "dr", "prof", "rev", "sir", "fr", "capt", "lt", "sgt",
];

/// Generational/credential suffixes stripped from the end of a name.
const SUFFIXES: &[&str] = &[
    "jr", "sr", "ii", "iii", "iv", "esq", "phd", "md", "dds", "jd",
];

/// Canonicalizes a person name for comparison.
///
/// Lowercases, collapses whitespace, strips honorifics and suffixes, and
/// rewrites `"Last, First"` into `first last` token order so both input
/// styles compare equal.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let reordered = reorder_comma_form(raw);

    let mut tokens: Vec<String> = reordered
        .split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| c == '.' || c == ',')
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect();

    // Strip leading honorifics ("Dr. Jane Roe" -> "jane roe").
    while tokens
        .first()
        .is_some_and(|t| HONORIFICS.contains(&t.as_str()))
    {
        tokens.remove(0);
    }

    // Strip trailing suffixes ("John Smith Jr" -> "john smith").
    while tokens
        .last()
        .is_some_and(|t| SUFFIXES.contains(&t.as_str()))
    {
        tokens.pop();
    }

    tokens.join(" ")
}

/// Rewrites `"Last, First"` as `"First Last"`. A single trailing comma
/// segment that is only a suffix ("Smith, Jr.") is not a reordering.
fn reorder_comma_form(raw: &str) -> String {
    let Some((before, after)) = raw.split_once(',') else {
        return raw.to_string();
    };

    let after_token = after.trim().trim_matches('.').to_lowercase();
    if SUFFIXES.contains(&after_token.as_str()) {
        return before.to_string();
    }

    format!("{after} {before}")
}

/// Canonicalizes a telephone number for comparison.
///
/// Drops `tel:` URI scheme and URI parameters (`;ext=...`), then strips
/// everything except digits and one leading `+`. No country-code
/// inference happens here.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    let mut s = raw.trim();
    if let Some(rest) = strip_prefix_ignore_case(s, "tel:") {
        s = rest;
    }
    if let Some((number, _uri_params)) = s.split_once(';') {
        s = number;
    }

    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_digit() {
            out.push(c);
        } else if c == '+' && i == 0 {
            out.push(c);
        }
    }
    out
}

/// Compares two canonical phone numbers under the configured mode.
///
/// Strict mode wants identical digit sequences (a leading `+` is
/// ignored). Lenient mode additionally accepts one number being a suffix
/// of the other when the shorter side has at least seven digits, which
/// tolerates a missing country or area code.
#[must_use]
pub fn phones_match(a: &str, b: &str, mode: PhoneMatch) -> bool {
    let a = a.strip_prefix('+').unwrap_or(a);
    let b = b.strip_prefix('+').unwrap_or(b);

    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }

    match mode {
        PhoneMatch::Strict => false,
        PhoneMatch::Lenient => {
            let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
            short.len() >= MIN_SUFFIX_DIGITS && long.ends_with(short)
        }
    }
}

/// Minimum digits for a lenient suffix match.
const MIN_SUFFIX_DIGITS: usize = 7;

/// Canonicalizes an email address for comparison.
///
/// Lowercases the whole address, local part included. Alias tags are kept:
/// `user+tag@example.com` stays distinct from `user@example.com`.
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    let s = raw.trim();
    let s = strip_prefix_ignore_case(s, "mailto:").unwrap_or(s);
    s.to_lowercase()
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}
