//! Error types for forms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed error returned by user-supplied submit callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Form-specific errors.
///
/// Validation failures are never reported through this type; they are
/// collected in an [`ErrorMap`].
#[derive(Debug, Error)]
pub enum FormError {
    /// Two fields in one configuration share a name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    /// A `matchField` rule points at a field that does not exist.
    #[error("field {field} must match unknown field {target}")]
    UnknownMatchField { field: String, target: String },

    /// The form configuration could not be parsed.
    #[error("failed to parse form configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The form configuration could not be read.
    #[error("failed to read form configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The submit callback returned an error.
    #[error("submit callback failed: {0}")]
    Submit(#[source] BoxError),
}

/// Errors raised while turning a `pattern` rule into a regular expression.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A `/body/flags` literal carries a flag that is not understood.
    #[error("invalid regular expression flag: {0}")]
    InvalidFlag(char),

    /// A flag appears more than once.
    #[error("duplicate regular expression flag: {0}")]
    DuplicateFlag(char),

    /// The pattern body does not compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// Validation messages keyed by field name.
///
/// A field appears only while it fails at least one rule, and carries a
/// single message: the first failure reported for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
    errors: BTreeMap<String, String>,
}

impl ErrorMap {
    /// Creates a new empty `ErrorMap`.
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Adds an error for a field unless the field already has one.
    ///
    /// Returns `true` if the message was recorded.
    pub fn add(&mut self, field: &str, message: impl Into<String>) -> bool {
        if self.errors.contains_key(field) {
            return false;
        }
        self.errors.insert(field.to_string(), message.into());
        true
    }

    /// Sets the error for a field, replacing any existing message.
    pub fn set(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    /// Removes the error for a field.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.errors.remove(field)
    }

    /// Merges `other` into `self`. Fields already present keep their message.
    pub fn merge(&mut self, other: Self) {
        for (field, message) in other.errors {
            self.errors.entry(field).or_insert(message);
        }
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error for a specific field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns whether a field currently has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterates over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl std::fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, message) in &self.errors {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
