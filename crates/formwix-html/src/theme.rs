//! Class names for rendered forms, keyed by slot.

use std::collections::BTreeMap;

use formwix::config::ThemeOverride;
use serde::{Deserialize, Serialize};

/// Class added to a control whose field has an error.
pub const INVALID_CLASS: &str = "border-red-500";

const DEFAULT_SLOTS: &[(&str, &str)] = &[
    ("form", "w-full"),
    ("formContainer", "flex flex-col gap-4"),
    ("fieldContainer", "flex flex-col gap-1"),
    ("fieldLabelWrapper", "flex items-center gap-1"),
    ("label", "text-sm font-medium text-gray-700"),
    ("requiredLabel", "text-red-500"),
    ("fieldDescription", "text-xs text-gray-500"),
    ("fieldWrapper", "w-full"),
    ("fieldError", "text-xs text-red-500"),
    ("formActionWrapper", "flex justify-end gap-2 mt-4"),
    ("formResetButton", "px-4 py-2 rounded border border-gray-300"),
    ("submitButton", "px-4 py-2 rounded bg-blue-600 text-white disabled:opacity-50"),
    ("text", "w-full rounded border border-gray-300 px-3 py-2"),
    ("textarea", "w-full rounded border border-gray-300 px-3 py-2"),
    ("email", "w-full rounded border border-gray-300 px-3 py-2"),
    ("password", "w-full rounded border border-gray-300 px-3 py-2"),
    ("passwordWrapper", "relative"),
    ("number", "w-full rounded border border-gray-300 px-3 py-2"),
    ("date", "w-full rounded border border-gray-300 px-3 py-2"),
    ("time", "w-full rounded border border-gray-300 px-3 py-2"),
    ("datetime", "w-full rounded border border-gray-300 px-3 py-2"),
    ("url", "w-full rounded border border-gray-300 px-3 py-2"),
    ("tel", "w-full rounded border border-gray-300 px-3 py-2"),
    ("selectOptionsWrapper", "w-full"),
    ("select", "w-full rounded border border-gray-300 px-3 py-2"),
    ("multiSelectWrapper", "flex flex-col gap-1"),
    ("multiSelectOptionsWrapper", "flex items-center gap-2"),
    ("multiSelect", "h-4 w-4"),
    ("radioWrapper", "flex flex-col gap-1"),
    ("radioOptionsWrapper", "flex items-center gap-2"),
    ("radio", "h-4 w-4"),
    ("optionsLabel", "text-sm"),
    ("checkBoxWrapper", "flex items-center gap-2"),
    ("checkbox", "h-4 w-4"),
    ("checkBoxLabel", "text-sm"),
];

/// Slot to class-string map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    slots: BTreeMap<String, String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOTS
                .iter()
                .map(|(slot, classes)| ((*slot).to_string(), (*classes).to_string()))
                .collect(),
        }
    }
}

impl Theme {
    /// Creates a theme with no classes at all.
    pub fn empty() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// Returns the classes of a slot, or `""`.
    pub fn get(&self, slot: &str) -> &str {
        self.slots.get(slot).map_or("", String::as_str)
    }

    /// Sets the classes of a slot.
    pub fn set(&mut self, slot: impl Into<String>, classes: impl Into<String>) {
        self.slots.insert(slot.into(), classes.into());
    }

    /// Returns a copy with `overrides` replacing matching slots.
    #[must_use]
    pub fn merge(&self, overrides: &ThemeOverride) -> Self {
        let mut merged = self.clone();
        for (slot, classes) in overrides {
            merged.set(slot.clone(), classes.clone());
        }
        merged
    }

    /// Returns the theme for one field: this theme with the field's
    /// overrides applied.
    pub fn for_field(&self, overrides: Option<&ThemeOverride>) -> Self {
        overrides.map_or_else(|| self.clone(), |o| self.merge(o))
    }
}

/// Joins class strings, skipping empty ones.
pub fn classes(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slots() {
        let theme = Theme::default();
        assert!(theme.get("submitButton").contains("bg-blue-600"));
        assert_eq!(theme.get("nonexistent"), "");
        assert_eq!(Theme::empty().get("form"), "");
    }

    #[test]
    fn test_merge() {
        let mut overrides = ThemeOverride::new();
        overrides.insert("label".to_string(), "font-bold".to_string());
        let merged = Theme::default().merge(&overrides);
        assert_eq!(merged.get("label"), "font-bold");
        assert_eq!(merged.get("form"), Theme::default().get("form"));
        assert_eq!(Theme::default().for_field(None), Theme::default());
    }

    #[test]
    fn test_classes() {
        assert_eq!(classes(&["a", "", "  b ", "c"]), "a b c");
        assert_eq!(classes(&["", ""]), "");
    }

    #[test]
    fn test_theme_from_json() {
        let theme: Theme = serde_json::from_str(r#"{ "form": "my-form" }"#).unwrap();
        assert_eq!(theme.get("form"), "my-form");
        assert_eq!(theme.get("label"), "");
    }
}
