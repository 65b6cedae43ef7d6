//! Pairwise duplicate decision.

use cardfuse_core::MergeOptions;

use crate::key::ContactKey;
use crate::normalize::phones_match;

/// Decides whether two records denote the same contact.
///
/// A match requires one of:
/// - equal canonical names, corroborated by a shared phone or email;
/// - any shared canonical phone number (a strong identity signal);
/// - any shared canonical email address.
///
/// The name clause is subsumed by the other two (its corroboration is
/// itself a shared phone or email), so the decision reduces to a contact
/// point overlap. Name equality alone is never sufficient; unrelated
/// people share names. The relation is symmetric but not transitive;
/// grouping policy decides how chains of matches are consolidated.
#[must_use]
pub fn is_match(a: &ContactKey, b: &ContactKey, options: &MergeOptions) -> bool {
    phones_overlap(a, b, options) || emails_overlap(a, b)
}

fn phones_overlap(a: &ContactKey, b: &ContactKey, options: &MergeOptions) -> bool {
    a.phones
        .iter()
        .any(|p| b.phones.iter().any(|q| phones_match(p, q, options.phone_match)))
}

fn emails_overlap(a: &ContactKey, b: &ContactKey) -> bool {
    a.emails.iter().any(|e| b.emails.contains(e))
}
