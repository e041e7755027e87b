//! Field values and the value map.
//!
//! Every bindable control carries either a textual value (text inputs,
//! textareas, selects) or a toggle state (checkbox-style controls). The
//! [`ValueMap`] is the sole value store of a form instance: seeded from
//! externally supplied values, mutated on every edit, and replaced
//! wholesale by reconciliation or by the success reducer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A map from field name to its current value.
pub type ValueMap = HashMap<String, FieldValue>;

/// The value of a single bindable control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A textual value (text input, textarea, select).
    Text(String),
    /// A checked state (checkbox-style controls).
    Toggle(bool),
}

impl FieldValue {
    /// Returns an empty text value, the default for untouched fields.
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// The textual rendering predicates run against.
    ///
    /// A set toggle reads as `"true"`; an unset toggle reads as the empty
    /// string, which gives `notEmpty` the required-checkbox meaning.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Toggle(true) => "true",
            Self::Toggle(false) => "",
        }
    }

    /// Returns `true` for toggle values.
    pub const fn is_toggle(&self) -> bool {
        matches!(self, Self::Toggle(_))
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Toggle(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_text() {
        assert_eq!(FieldValue::default(), FieldValue::Text(String::new()));
        assert_eq!(FieldValue::default().as_text(), "");
    }

    #[test]
    fn test_toggle_text_rendering() {
        assert_eq!(FieldValue::Toggle(true).as_text(), "true");
        assert_eq!(FieldValue::Toggle(false).as_text(), "");
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(FieldValue::from("hi"), FieldValue::Text("hi".into()));
        assert_eq!(FieldValue::from(true), FieldValue::Toggle(true));
        assert!(FieldValue::from(false).is_toggle());
        assert!(!FieldValue::from("x").is_toggle());
    }

    #[test]
    fn test_serde_untagged_roundtrip() {
        let text: FieldValue = serde_json::from_str("\"Stan\"").expect("text value");
        assert_eq!(text, FieldValue::Text("Stan".into()));

        let toggle: FieldValue = serde_json::from_str("true").expect("toggle value");
        assert_eq!(toggle, FieldValue::Toggle(true));

        assert_eq!(serde_json::to_string(&text).expect("serialize"), "\"Stan\"");
    }
}
