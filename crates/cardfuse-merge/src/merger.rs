//! Collapsing a group of matched records into one.

use std::collections::HashMap;

use cardfuse_core::{CoreError, CoreResult, MergeOptions};
use cardfuse_vcard::build::escape_text;
use cardfuse_vcard::core::{VCard, VCardProperty, names};

use crate::normalize::{normalize_email, normalize_phone, phones_match};

/// Properties that describe the contact as a whole; a merged record keeps
/// the single most complete value.
const SINGLE_VALUE: &[&str] = &[
    names::FN,
    names::N,
    names::BDAY,
    "ANNIVERSARY",
    "GENDER",
    names::ORG,
    names::TITLE,
    "ROLE",
    "TZ",
    "GEO",
    names::UID,
    "REV",
    "PRODID",
    "KIND",
];

/// Properties unioned across the group with exact-value de-duplication.
const MULTI_VALUE: &[&str] = &[
    names::ADR,
    names::URL,
    names::IMPP,
    names::NICKNAME,
    names::CATEGORIES,
    "LANG",
    "RELATED",
    "MEMBER",
    "KEY",
    "PHOTO",
    "SOUND",
    "LOGO",
];

enum Disposition {
    /// Longest non-empty value wins; ties break to first-seen.
    Single,
    /// Unioned, de-duplicated by canonical phone number.
    Phone,
    /// Unioned, de-duplicated by canonical email address.
    Email,
    /// Unioned, de-duplicated by exact wire value.
    MultiExact,
    /// Distinct values concatenated with the configured delimiter.
    Note,
    /// Unknown/custom: unioned, collapsed only when byte-identical.
    Opaque,
}

fn disposition(name: &str) -> Disposition {
    if name == names::TEL {
        Disposition::Phone
    } else if name == names::EMAIL {
        Disposition::Email
    } else if name == names::NOTE {
        Disposition::Note
    } else if SINGLE_VALUE.contains(&name) {
        Disposition::Single
    } else if MULTI_VALUE.contains(&name) {
        Disposition::MultiExact
    } else {
        Disposition::Opaque
    }
}

/// One output position, claimed in first-seen order.
enum Slot {
    Prop(VCardProperty),
    Note {
        group: Option<String>,
        params: Vec<cardfuse_vcard::VCardParameter>,
        texts: Vec<String>,
    },
}

/// Merges a group of matched records into one.
///
/// Every input property lands in exactly one output property; the only
/// collapses are the per-kind de-duplications described on
/// [`Disposition`]. Output order is the first-seen order of each property
/// across the group, and the merged card carries the first record's
/// version.
///
/// ## Errors
/// Returns [`CoreError::InvariantViolation`] for an empty group; callers
/// only build groups from existing records, so this never surfaces in a
/// normal run.
pub fn merge_group(cards: &[&VCard], options: &MergeOptions) -> CoreResult<VCard> {
    let Some(first) = cards.first() else {
        return Err(CoreError::InvariantViolation(
            "merge_group called with an empty group",
        ));
    };

    if cards.len() == 1 {
        return Ok((*first).clone());
    }

    let mut merger = GroupMerger::new(options);
    for card in cards {
        for prop in &card.properties {
            merger.absorb(prop);
        }
    }

    Ok(VCard {
        version: first.version,
        properties: merger.finish(),
    })
}

struct GroupMerger<'a> {
    options: &'a MergeOptions,
    slots: Vec<Slot>,
    /// Single-value property name -> slot.
    singles: HashMap<String, usize>,
    /// Canonical phone -> slot.
    phones: Vec<(String, usize)>,
    /// Canonical email -> slot.
    emails: HashMap<String, usize>,
    /// (name, wire value) -> slot for exact-union properties.
    exact: HashMap<(String, String), usize>,
    note: Option<usize>,
    /// Opaque slots, linearly compared (byte-identical collapse).
    opaque: Vec<usize>,
}

impl<'a> GroupMerger<'a> {
    fn new(options: &'a MergeOptions) -> Self {
        Self {
            options,
            slots: Vec::new(),
            singles: HashMap::new(),
            phones: Vec::new(),
            emails: HashMap::new(),
            exact: HashMap::new(),
            note: None,
            opaque: Vec::new(),
        }
    }

    fn absorb(&mut self, prop: &VCardProperty) {
        match disposition(&prop.name) {
            Disposition::Single => self.absorb_single(prop),
            Disposition::Phone => self.absorb_phone(prop),
            Disposition::Email => self.absorb_email(prop),
            Disposition::MultiExact => self.absorb_exact(prop),
            Disposition::Note => self.absorb_note(prop),
            Disposition::Opaque => self.absorb_opaque(prop),
        }
    }

    fn absorb_single(&mut self, prop: &VCardProperty) {
        if let Some(&slot) = self.singles.get(&prop.name) {
            if let Slot::Prop(existing) = &mut self.slots[slot] {
                // Longer value assumed more complete; ties keep first-seen.
                if prop.raw_value.len() > existing.raw_value.len() {
                    *existing = prop.clone();
                }
            }
        } else {
            let slot = self.push(Slot::Prop(prop.clone()));
            self.singles.insert(prop.name.clone(), slot);
        }
    }

    fn absorb_phone(&mut self, prop: &VCardProperty) {
        let canonical = normalize_phone(&prop.value);
        if !canonical.is_empty() {
            let matched = self
                .phones
                .iter()
                .find(|(existing, _)| {
                    phones_match(&canonical, existing, self.options.phone_match)
                })
                .map(|(_, slot)| *slot);
            if let Some(slot) = matched {
                self.merge_types(slot, prop);
                return;
            }
        }
        let slot = self.push(Slot::Prop(prop.clone()));
        self.phones.push((canonical, slot));
    }

    fn absorb_email(&mut self, prop: &VCardProperty) {
        let canonical = normalize_email(&prop.value);
        if !canonical.is_empty() {
            if let Some(&slot) = self.emails.get(&canonical) {
                self.merge_types(slot, prop);
                return;
            }
        }
        let slot = self.push(Slot::Prop(prop.clone()));
        self.emails.insert(canonical, slot);
    }

    fn absorb_exact(&mut self, prop: &VCardProperty) {
        let key = (prop.name.clone(), prop.raw_value.clone());
        if let Some(&slot) = self.exact.get(&key) {
            self.merge_types(slot, prop);
        } else {
            let slot = self.push(Slot::Prop(prop.clone()));
            self.exact.insert(key, slot);
        }
    }

    fn absorb_note(&mut self, prop: &VCardProperty) {
        if let Some(slot) = self.note {
            if let Slot::Note { texts, .. } = &mut self.slots[slot] {
                if !texts.contains(&prop.value) {
                    texts.push(prop.value.clone());
                }
            }
        } else {
            let slot = self.push(Slot::Note {
                group: prop.group.clone(),
                params: prop.params.clone(),
                texts: vec![prop.value.clone()],
            });
            self.note = Some(slot);
        }
    }

    fn absorb_opaque(&mut self, prop: &VCardProperty) {
        for &slot in &self.opaque {
            if let Slot::Prop(existing) = &self.slots[slot] {
                if existing == prop {
                    return;
                }
            }
        }
        let slot = self.push(Slot::Prop(prop.clone()));
        self.opaque.push(slot);
    }

    /// Folds the TYPE values of a collapsed duplicate into the surviving
    /// occurrence, so no home/work tag is lost.
    fn merge_types(&mut self, slot: usize, dropped: &VCardProperty) {
        let Some(type_param) = dropped.get_param("TYPE") else {
            return;
        };
        if let Slot::Prop(existing) = &mut self.slots[slot] {
            for value in type_param.values.clone() {
                if !existing.has_type(&value) {
                    existing.add_type(value);
                }
            }
        }
    }

    fn push(&mut self, slot: Slot) -> usize {
        self.slots.push(slot);
        self.slots.len() - 1
    }

    fn finish(self) -> Vec<VCardProperty> {
        let delimiter = &self.options.note_delimiter;
        self.slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Prop(prop) => prop,
                Slot::Note {
                    group,
                    params,
                    texts,
                } => {
                    let value = texts.join(delimiter);
                    VCardProperty {
                        group,
                        name: names::NOTE.to_string(),
                        params,
                        raw_value: escape_text(&value),
                        value,
                    }
                }
            })
            .collect()
    }
}
