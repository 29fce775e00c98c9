//! Field validators.
//!
//! Each validator checks one rule against a non-empty value whose type has
//! already been checked; a value of another type passes untouched.
//! Emptiness and type checks are applied by the compiled schema before any
//! validator runs.

use std::collections::BTreeSet;
use std::sync::Arc;

use regex::Regex;

use crate::value::{FieldValue, ValueType};

/// Source of the built-in email pattern.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
/// Source of the `YYYY-MM-DD` date pattern.
pub const DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";
/// Source of the `HH:MM` time pattern.
pub const TIME_PATTERN: &str = r"^[0-9]{2}:[0-9]{2}$";
/// Source of the `YYYY-MM-DDTHH:MM` datetime pattern.
pub const DATETIME_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}$";
/// Source of the special-character class required by `containSpecialChar`.
pub const SPECIAL_CHAR_PATTERN: &str = r#"[!@#$%^&*(),.?":{}|<>]"#;

/// Default messages.
pub mod messages {
    /// An email field holds a malformed address.
    pub const INVALID_EMAIL: &str = "Invalid email address";
    /// A URL field holds something that does not parse as an absolute URL.
    pub const INVALID_URL: &str = "Invalid URL";
    /// A date field is not `YYYY-MM-DD`.
    pub const INVALID_DATE: &str = "Invalid date format. Expected YYYY-MM-DD";
    /// A time field is not `HH:MM`.
    pub const INVALID_TIME: &str = "Invalid time format. Expected HH:MM";
    /// A datetime field is not `YYYY-MM-DDTHH:MM`.
    pub const INVALID_DATETIME: &str = "Invalid datetime format. Expected YYYY-MM-DDTHH:MM";
    /// A telephone number has fewer than 10 or more than 15 digits.
    pub const INVALID_TEL: &str = "Invalid phone number format. Expected 10-15 digits.";
    /// `containUpperCase` failed.
    pub const MISSING_UPPER_CASE: &str = "Password must contain at least one uppercase letter";
    /// `containLowerCase` failed.
    pub const MISSING_LOWER_CASE: &str = "Password must contain at least one lowercase letter";
    /// `containNumber` failed.
    pub const MISSING_NUMBER: &str = "Password must contain at least one number";
    /// `containSpecialChar` failed.
    pub const MISSING_SPECIAL_CHAR: &str = "Password must contain at least one special character";
    /// The password is on the weak-password denylist.
    pub const COMMON_PASSWORD: &str = "Choose a stronger password";
    /// A `pattern` rule did not match.
    pub const PATTERN_MISMATCH: &str = "Input does not match the required pattern";
    /// A required multiselect has no selection.
    pub const SELECTION_REQUIRED: &str = "This field is required";
    /// A `matchField` field differs from its target.
    pub const PASSWORDS_DIFFER: &str = "Passwords do not match";

    /// `<label> is required`.
    pub fn required(label: &str) -> String {
        format!("{label} is required")
    }

    /// `<label> must be at least <min> characters`.
    pub fn min_length(label: &str, min: usize) -> String {
        format!("{label} must be at least {min} characters")
    }

    /// `<label> must be at most <max> characters`.
    pub fn max_length(label: &str, max: usize) -> String {
        format!("{label} must be at most {max} characters")
    }

    /// `<label> must be at least <min>`.
    pub fn min_value(label: &str, min: f64) -> String {
        format!("{label} must be at least {min}")
    }

    /// `<label> must be at most <max>`.
    pub fn max_value(label: &str, max: f64) -> String {
        format!("{label} must be at most {max}")
    }

    /// A value of the wrong type, e.g. `Expected array, received string`.
    pub fn wrong_type(expected: &str, received: &str) -> String {
        format!("Expected {expected}, received {received}")
    }
}

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    fn validate(&self, value: &FieldValue) -> Result<(), String>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;

    /// Returns the configuration name of the rule this validator checks.
    fn code(&self) -> &'static str;
}

/// Validator that requires a non-empty value.
///
/// What counts as empty depends on the field's value type.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    value_type: ValueType,
    message: String,
}

impl RequiredValidator {
    /// Creates a new RequiredValidator with the default message.
    pub fn new(value_type: ValueType, label: &str) -> Self {
        Self {
            value_type,
            message: messages::required(label),
        }
    }

    /// Creates a new RequiredValidator with custom message.
    pub fn with_message(value_type: ValueType, message: impl Into<String>) -> Self {
        Self {
            value_type,
            message: message.into(),
        }
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        if self.value_type.is_empty(value) {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &'static str {
        "required"
    }
}

/// Validator that enforces a maximum length in characters.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(label: &str, max_length: usize) -> Self {
        Self {
            max_length,
            message: messages::max_length(label, max_length),
        }
    }

    /// Creates a new MaxLengthValidator with custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match value.as_str() {
            Some(s) if s.chars().count() > self.max_length => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &'static str {
        "maxLength"
    }
}

/// Validator that enforces a minimum length in characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator.
    pub fn new(label: &str, min_length: usize) -> Self {
        Self {
            min_length,
            message: messages::min_length(label, min_length),
        }
    }

    /// Creates a new MinLengthValidator with custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match value.as_str() {
            Some(s) if s.chars().count() < self.min_length => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &'static str {
        "minLength"
    }
}

/// Validator for email addresses.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    pattern: Regex,
    message: String,
}

impl EmailValidator {
    /// Creates a new EmailValidator matching against `pattern`.
    pub fn new(pattern: Regex) -> Self {
        Self {
            pattern,
            message: messages::INVALID_EMAIL.to_string(),
        }
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match value.as_str() {
            Some(s) if !self.pattern.is_match(s) => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &'static str {
        "email"
    }
}

/// Validator for URL values: anything the WHATWG parser accepts as an
/// absolute URL.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    message: String,
}

impl UrlValidator {
    /// Creates a new UrlValidator with default message.
    pub fn new() -> Self {
        Self {
            message: messages::INVALID_URL.to_string(),
        }
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for UrlValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match value.as_str() {
            Some(s) if url::Url::parse(s).is_err() => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &'static str {
        "url"
    }
}

/// Validator using a regex that the value must contain a match for.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    code: &'static str,
    message: String,
}

impl RegexValidator {
    /// Creates a new RegexValidator from a compiled regex.
    pub fn from_regex(pattern: Regex, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            pattern,
            code,
            message: message.into(),
        }
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match value.as_str() {
            Some(s) if !self.pattern.is_match(s) => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &'static str {
        self.code
    }
}

/// Validator for numeric range.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
    message: String,
}

impl RangeValidator {
    /// Creates a lower-bound validator with the default message.
    pub fn at_least(label: &str, min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
            message: messages::min_value(label, min),
        }
    }

    /// Creates an upper-bound validator with the default message.
    pub fn at_most(label: &str, max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
            message: messages::max_value(label, max),
        }
    }

    /// Creates a new RangeValidator with custom message.
    pub fn with_message(min: Option<f64>, max: Option<f64>, message: impl Into<String>) -> Self {
        Self {
            min,
            max,
            message: message.into(),
        }
    }
}

impl Validator for RangeValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        let Some(num) = value.as_f64() else {
            return Ok(());
        };

        if let Some(min) = self.min {
            if num < min {
                return Err(self.message.clone());
            }
        }

        if let Some(max) = self.max {
            if num > max {
                return Err(self.message.clone());
            }
        }

        Ok(())
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &'static str {
        match (self.min, self.max) {
            (Some(_), None) => "min",
            (None, Some(_)) => "max",
            _ => "range",
        }
    }
}

/// Validator for telephone numbers: 10 to 15 digits once every other
/// character is stripped.
#[derive(Debug, Clone)]
pub struct TelValidator {
    message: String,
}

impl TelValidator {
    /// Fewest digits accepted.
    pub const MIN_DIGITS: usize = 10;
    /// Most digits accepted.
    pub const MAX_DIGITS: usize = 15;

    /// Creates a new TelValidator with default message.
    pub fn new() -> Self {
        Self {
            message: messages::INVALID_TEL.to_string(),
        }
    }
}

impl Default for TelValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for TelValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        let Some(s) = value.as_str() else {
            return Ok(());
        };
        let digits = s.chars().filter(char::is_ascii_digit).count();
        if (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &'static str {
        "tel"
    }
}

/// Strips every non-digit character from a telephone number.
pub fn normalize_tel(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Validator rejecting passwords found on a denylist.
#[derive(Debug, Clone)]
pub struct CommonPasswordValidator {
    denylist: Arc<BTreeSet<String>>,
    message: String,
}

impl CommonPasswordValidator {
    /// Creates a new CommonPasswordValidator.
    pub fn new(denylist: Arc<BTreeSet<String>>, message: impl Into<String>) -> Self {
        Self {
            denylist,
            message: message.into(),
        }
    }
}

impl Validator for CommonPasswordValidator {
    fn validate(&self, value: &FieldValue) -> Result<(), String> {
        match value.as_str() {
            Some(s) if self.denylist.contains(s) => Err(self.message.clone()),
            _ => Ok(()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &'static str {
        "preventCommonPassword"
    }
}
