//! vCard wrapper type.

use super::property::{VCardProperty, names};

/// vCard version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VCardVersion {
    /// vCard 2.1 (the pre-RFC spec still produced by phone exports).
    V21,
    /// vCard 3.0 (RFC 2426).
    #[default]
    V3,
    /// vCard 4.0 (RFC 6350).
    V4,
}

impl VCardVersion {
    /// Parses from a version string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "2.1" => Some(Self::V21),
            "3.0" => Some(Self::V3),
            "4.0" => Some(Self::V4),
            _ => None,
        }
    }

    /// Returns the version string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V21 => "2.1",
            Self::V3 => "3.0",
            Self::V4 => "4.0",
        }
    }
}

impl core::str::FromStr for VCardVersion {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(())
    }
}

/// A complete vCard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCard {
    /// vCard version.
    pub version: VCardVersion,
    /// All properties in order of appearance. VERSION is not stored here;
    /// the serializer re-emits it from `version`.
    pub properties: Vec<VCardProperty>,
}

impl VCard {
    /// Creates a new vCard 3.0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: VCardVersion::V3,
            properties: Vec::new(),
        }
    }

    /// Creates a vCard with the specified version.
    #[must_use]
    pub fn with_version(version: VCardVersion) -> Self {
        Self {
            version,
            properties: Vec::new(),
        }
    }

    /// Adds a property to the vCard.
    pub fn add_property(&mut self, prop: VCardProperty) {
        self.properties.push(prop);
    }

    /// Returns all properties with the given name.
    #[must_use]
    pub fn get_properties(&self, name: &str) -> Vec<&VCardProperty> {
        let name_upper = name.to_ascii_uppercase();
        self.properties
            .iter()
            .filter(|p| p.name == name_upper)
            .collect()
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&VCardProperty> {
        let name_upper = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == name_upper)
    }

    /// Returns the FN (formatted name) value.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.get_property(names::FN).map(|p| p.value.as_str())
    }

    /// Returns all EMAIL property values.
    #[must_use]
    pub fn emails(&self) -> Vec<&str> {
        self.get_properties(names::EMAIL)
            .iter()
            .map(|p| p.value.as_str())
            .collect()
    }

    /// Returns all TEL property values.
    #[must_use]
    pub fn telephones(&self) -> Vec<&str> {
        self.get_properties(names::TEL)
            .iter()
            .map(|p| p.value.as_str())
            .collect()
    }
}

impl Default for VCard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vcard_new() {
        let card = VCard::new();
        assert_eq!(card.version, VCardVersion::V3);
        assert!(card.properties.is_empty());
    }

    #[test]
    fn vcard_version_parse() {
        assert_eq!(VCardVersion::parse("2.1"), Some(VCardVersion::V21));
        assert_eq!(VCardVersion::parse("3.0"), Some(VCardVersion::V3));
        assert_eq!(VCardVersion::parse("4.0"), Some(VCardVersion::V4));
        assert_eq!(VCardVersion::parse("5.0"), None);
    }

    #[test]
    fn vcard_formatted_name() {
        let mut card = VCard::new();
        card.add_property(VCardProperty::text("FN", "John Doe"));
        assert_eq!(card.formatted_name(), Some("John Doe"));
    }

    #[test]
    fn vcard_emails() {
        let mut card = VCard::new();
        card.add_property(VCardProperty::text("EMAIL", "john@example.com"));
        card.add_property(VCardProperty::text("EMAIL", "john.doe@work.com"));

        let emails = card.emails();
        assert_eq!(emails.len(), 2);
        assert!(emails.contains(&"john@example.com"));
    }

    #[test]
    fn vcard_property_lookup_is_case_insensitive() {
        let mut card = VCard::new();
        card.add_property(VCardProperty::text("TEL", "555-0100"));
        assert!(card.get_property("tel").is_some());
        assert_eq!(card.telephones(), vec!["555-0100"]);
    }
}
