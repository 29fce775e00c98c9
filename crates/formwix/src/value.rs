//! Field values as read from and written to a form-state store.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// The current value of a single field.
///
/// Which variant a field holds depends on its kind: text for most kinds,
/// a number for numeric fields, a boolean for checkboxes and a list of
/// selected option values for multiselects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value.
    #[default]
    Null,
    /// A boolean (checkbox state).
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
    /// Selected option values, in selection order.
    ///
    /// Numeric option values are held in their display form, so a JSON
    /// selection `[1, 2.5]` reads as `["1", "2.5"]`.
    List(#[serde(deserialize_with = "selection")] Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Selected {
    Text(String),
    Number(f64),
}

fn selection<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<Selected>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .map(|item| match item {
            Selected::Text(s) => s,
            Selected::Number(n) => n.to_string(),
        })
        .collect())
}

impl FieldValue {
    /// Returns the name of the value's type as used in messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::List(_) => "array",
        }
    }

    /// Returns the string if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric value.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean value.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the selection if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` for `Null` and the empty string, which are empty for
    /// every field kind.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(String::from).collect())
    }
}

/// The semantic type a field kind validates its values against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// A string.
    String,
    /// A number.
    Number,
    /// A boolean.
    Boolean,
    /// A list of strings.
    StringList,
}

impl ValueType {
    /// Returns the type name used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::StringList => "array",
        }
    }

    /// Returns whether a non-empty value has this type.
    pub const fn accepts(self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (Self::String, FieldValue::Text(_))
                | (Self::Number, FieldValue::Number(_))
                | (Self::Boolean, FieldValue::Bool(_))
                | (Self::StringList, FieldValue::List(_))
        )
    }

    /// Returns whether `value` counts as empty for fields of this type.
    ///
    /// `Null` and `""` are empty for every type; `false` is also empty for
    /// booleans and a zero-length list is also empty for lists.
    pub fn is_empty(self, value: &FieldValue) -> bool {
        if value.is_blank() {
            return true;
        }
        match (self, value) {
            (Self::Boolean, FieldValue::Bool(b)) => !b,
            (Self::StringList, FieldValue::List(items)) => items.is_empty(),
            _ => false,
        }
    }
}

/// Read access to current field values by name.
pub trait ValueLookup {
    /// Returns the current value of a field, if it has one.
    fn lookup(&self, name: &str) -> Option<&FieldValue>;
}

/// Current values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: BTreeMap<String, FieldValue>,
}

impl FormValues {
    /// Creates an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets the value of a field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the value of a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Returns whether a field has a value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no field has a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl ValueLookup for FormValues {
    fn lookup(&self, name: &str) -> Option<&FieldValue> {
        self.get(name)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness_is_kind_polymorphic() {
        assert!(ValueType::String.is_empty(&FieldValue::Null));
        assert!(ValueType::String.is_empty(&FieldValue::from("")));
        assert!(!ValueType::String.is_empty(&FieldValue::from(" ")));

        assert!(ValueType::Boolean.is_empty(&FieldValue::Bool(false)));
        assert!(!ValueType::Boolean.is_empty(&FieldValue::Bool(true)));
        assert!(!ValueType::String.is_empty(&FieldValue::Bool(false)));

        assert!(ValueType::StringList.is_empty(&FieldValue::List(vec![])));
        assert!(!ValueType::StringList.is_empty(&FieldValue::from(vec!["a"])));

        assert!(!ValueType::Number.is_empty(&FieldValue::Number(0.0)));
    }

    #[test]
    fn test_accepts() {
        assert!(ValueType::Number.accepts(&FieldValue::Number(1.5)));
        assert!(!ValueType::Number.accepts(&FieldValue::from("1.5")));
        assert!(ValueType::StringList.accepts(&FieldValue::from(vec!["x"])));
    }

    #[test]
    fn test_values_from_json() {
        let values: FormValues = serde_json::from_str(
            r#"{"name": "Ada", "age": 36, "agree": true, "tags": ["a", "b"], "note": null}"#,
        )
        .unwrap();

        assert_eq!(values.get("name"), Some(&FieldValue::from("Ada")));
        assert_eq!(values.get("age"), Some(&FieldValue::Number(36.0)));
        assert_eq!(values.get("agree"), Some(&FieldValue::Bool(true)));
        assert_eq!(values.get("tags"), Some(&FieldValue::from(vec!["a", "b"])));
        assert_eq!(values.get("note"), Some(&FieldValue::Null));
        assert_eq!(values.len(), 5);
    }

    #[test]
    fn test_numeric_selection_reads_as_option_text() {
        let values: FormValues = serde_json::from_str(r#"{"sizes": [1, "two", 2.5]}"#).unwrap();
        assert_eq!(
            values.get("sizes"),
            Some(&FieldValue::from(vec!["1", "two", "2.5"]))
        );
        assert_eq!(
            serde_json::to_string(&values).unwrap(),
            r#"{"sizes":["1","two","2.5"]}"#
        );

        assert!(serde_json::from_str::<FieldValue>("[true]").is_err());
    }

    #[test]
    fn test_lookup() {
        let values = FormValues::new().with("email", "a@b.co");
        assert_eq!(values.lookup("email"), Some(&FieldValue::from("a@b.co")));
        assert_eq!(values.lookup("missing"), None);
    }
}
