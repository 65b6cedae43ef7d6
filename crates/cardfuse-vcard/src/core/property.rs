//! vCard property types.

use super::parameter::VCardParameter;

/// A vCard property.
///
/// Holds both the wire-form value (after unfolding and content decoding)
/// and the unescaped logical text. The wire form is what serialization
/// emits, so display values survive a merge byte-for-byte; the logical
/// text is what normalization and free-text merging read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardProperty {
    /// Optional property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<VCardParameter>,
    /// Unescaped logical text of the value.
    pub value: String,
    /// Wire-form value, still vCard-escaped (emitted verbatim).
    pub raw_value: String,
}

impl VCardProperty {
    /// Creates a property with a plain text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value_str = value.into();
        Self {
            group: None,
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: value_str.clone(),
            raw_value: crate::build::escape_text(&value_str),
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&VCardParameter> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == name_upper)
    }

    /// Returns whether this property has the specified TYPE value.
    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        self.get_param("TYPE")
            .is_some_and(|p| p.has_value(type_value))
    }

    /// Adds a parameter to this property.
    pub fn add_param(&mut self, param: VCardParameter) {
        self.params.push(param);
    }

    /// Adds a TYPE parameter value, extending an existing TYPE parameter
    /// when one is present.
    pub fn add_type(&mut self, type_value: impl Into<String>) {
        if let Some(param) = self.params.iter_mut().find(|p| p.name == "TYPE") {
            param.values.push(type_value.into());
        } else {
            self.params.push(VCardParameter::type_param(type_value));
        }
    }

    /// Removes every parameter with the given name.
    pub fn remove_param(&mut self, name: &str) {
        let name_upper = name.to_ascii_uppercase();
        self.params.retain(|p| p.name != name_upper);
    }
}

/// Common property names as constants.
pub mod names {
    // Identification
    pub const FN: &str = "FN";
    pub const N: &str = "N";
    pub const NICKNAME: &str = "NICKNAME";
    pub const BDAY: &str = "BDAY";

    // Communications
    pub const TEL: &str = "TEL";
    pub const EMAIL: &str = "EMAIL";
    pub const IMPP: &str = "IMPP";

    // Delivery addressing
    pub const ADR: &str = "ADR";

    // Organizational
    pub const ORG: &str = "ORG";
    pub const TITLE: &str = "TITLE";

    // Explanatory
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const NOTE: &str = "NOTE";
    pub const UID: &str = "UID";
    pub const URL: &str = "URL";

    // Structural
    pub const BEGIN: &str = "BEGIN";
    pub const END: &str = "END";
    pub const VERSION: &str = "VERSION";
}
