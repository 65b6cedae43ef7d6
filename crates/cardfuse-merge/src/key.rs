//! Derived comparison keys.

use cardfuse_vcard::VCard;
use cardfuse_vcard::core::names;

use crate::normalize::{normalize_email, normalize_name, normalize_phone};

/// The canonical identity facets of one record, derived on demand for
/// matching and discarded afterwards. The record itself stays untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactKey {
    /// Canonical full name, when the record has a non-empty FN.
    pub name: Option<String>,
    /// Canonical phone numbers, first-seen order, de-duplicated.
    pub phones: Vec<String>,
    /// Canonical email addresses, first-seen order, de-duplicated.
    pub emails: Vec<String>,
}

impl ContactKey {
    /// Derives the comparison key for a record.
    #[must_use]
    pub fn from_card(card: &VCard) -> Self {
        let name = card
            .formatted_name()
            .map(normalize_name)
            .filter(|n| !n.is_empty());

        let mut phones = Vec::new();
        for prop in card.get_properties(names::TEL) {
            let canonical = normalize_phone(&prop.value);
            if !canonical.is_empty() && !phones.contains(&canonical) {
                phones.push(canonical);
            }
        }

        let mut emails = Vec::new();
        for prop in card.get_properties(names::EMAIL) {
            let canonical = normalize_email(&prop.value);
            if !canonical.is_empty() && !emails.contains(&canonical) {
                emails.push(canonical);
            }
        }

        Self {
            name,
            phones,
            emails,
        }
    }
}
