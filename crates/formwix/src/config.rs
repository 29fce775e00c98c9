//! Declarative form configuration.
//!
//! A [`FormConfig`] is passive data: an ordered list of
//! [`FieldDescriptor`]s plus the form-level options handed to the
//! form-state store and the renderers. Each field kind carries its own
//! rule record, so which rules a kind supports is fixed by its type.
//!
//! Configurations are usually loaded from JSON:
//!
//! ```rust
//! use formwix::FormConfig;
//!
//! let config = FormConfig::from_json_str(r#"{
//!     "fields": [
//!         {
//!             "type": "text",
//!             "name": "username",
//!             "label": "Username",
//!             "validation": {
//!                 "required": { "value": true },
//!                 "maxLength": { "value": 20 }
//!             }
//!         }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(config.fields.len(), 1);
//! assert!(config.fields[0].kind.is_required());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::value::{FieldValue, FormValues, ValueType};

/// Presentation overrides for one field, keyed by theme slot.
///
/// Opaque to validation; consumed by renderers only.
pub type ThemeOverride = BTreeMap<String, String>;

/// A single validation rule: its parameter plus an optional custom message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule<T> {
    /// The rule parameter.
    pub value: T,
    /// Message reported instead of the default one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Rule<T> {
    /// Creates a rule with the default message.
    pub const fn new(value: T) -> Self {
        Self {
            value,
            message: None,
        }
    }

    /// Creates a rule with a custom message.
    pub fn with_message(value: T, message: impl Into<String>) -> Self {
        Self {
            value,
            message: Some(message.into()),
        }
    }

    /// Returns the custom message, or builds the default one.
    pub fn message_or_else(&self, default: impl FnOnce() -> String) -> String {
        self.message.clone().unwrap_or_else(default)
    }
}

/// Returns the rule if it is present and switched on.
pub fn enabled(rule: Option<&Rule<bool>>) -> Option<&Rule<bool>> {
    rule.filter(|r| r.value)
}

/// The `matchField` rule: this field must equal a sibling field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFieldRule {
    /// Name of the sibling field.
    pub field: String,
    /// Message reported instead of the default one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Rules for free-text kinds (text, textarea).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringRules {
    pub required: Option<Rule<bool>>,
    pub pattern: Option<Rule<String>>,
    pub min_length: Option<Rule<usize>>,
    pub max_length: Option<Rule<usize>>,
}

/// Rules for kinds with a fixed baseline format or a choice of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicRules {
    pub required: Option<Rule<bool>>,
    pub pattern: Option<Rule<String>>,
}

/// Rules for numeric fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberRules {
    pub required: Option<Rule<bool>>,
    pub min: Option<Rule<f64>>,
    pub max: Option<Rule<f64>>,
}

/// Rules for date, time and datetime fields.
///
/// `min_date` and `max_date` are enforced by the rendered control, not by
/// the compiled schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRules {
    pub required: Option<Rule<bool>>,
    pub pattern: Option<Rule<String>>,
    pub min_date: Option<Rule<String>>,
    pub max_date: Option<Rule<String>>,
}

/// Rules for password fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordRules {
    pub required: Option<Rule<bool>>,
    pub pattern: Option<Rule<String>>,
    pub min_length: Option<Rule<usize>>,
    pub max_length: Option<Rule<usize>>,
    pub contain_upper_case: Option<Rule<bool>>,
    pub contain_lower_case: Option<Rule<bool>>,
    pub contain_number: Option<Rule<bool>>,
    pub contain_special_char: Option<Rule<bool>>,
    pub prevent_common_password: Option<Rule<bool>>,
    pub match_field: Option<MatchFieldRule>,
}

/// Rules for checkbox and multiselect fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToggleRules {
    pub required: Option<Rule<bool>>,
}

/// The value carried by a selectable option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One choice of a select, multiselect or radio field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: OptionValue,
}

impl FieldOption {
    /// Creates a text-valued option.
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: OptionValue::from(value),
        }
    }
}

/// The kind of a field together with the rules that kind supports.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text { rules: StringRules },
    Textarea { rows: Option<u32>, rules: StringRules },
    Email { rules: BasicRules },
    Password { rules: PasswordRules },
    Number { rules: NumberRules },
    Date { rules: DateRules },
    Time { rules: DateRules },
    DateTime { rules: DateRules },
    Url { rules: BasicRules },
    Tel { rules: BasicRules },
    Select { options: Vec<FieldOption>, rules: BasicRules },
    MultiSelect { options: Vec<FieldOption>, rules: ToggleRules },
    Radio { options: Vec<FieldOption>, rules: BasicRules },
    Checkbox { rules: ToggleRules },
    /// A kind this library does not know; validated as an unconstrained
    /// string.
    Other { type_name: String, rules: BasicRules },
}

impl FieldKind {
    /// Returns the kind's configuration tag.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Text { .. } => "text",
            Self::Textarea { .. } => "textarea",
            Self::Email { .. } => "email",
            Self::Password { .. } => "password",
            Self::Number { .. } => "number",
            Self::Date { .. } => "date",
            Self::Time { .. } => "time",
            Self::DateTime { .. } => "datetime-local",
            Self::Url { .. } => "url",
            Self::Tel { .. } => "tel",
            Self::Select { .. } => "select",
            Self::MultiSelect { .. } => "multiselect",
            Self::Radio { .. } => "radio",
            Self::Checkbox { .. } => "checkbox",
            Self::Other { type_name, .. } => type_name,
        }
    }

    /// Returns the type values of this kind are validated against.
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Number { .. } => ValueType::Number,
            Self::Checkbox { .. } => ValueType::Boolean,
            Self::MultiSelect { .. } => ValueType::StringList,
            _ => ValueType::String,
        }
    }

    /// Returns the `required` rule, whether or not it is switched on.
    pub const fn required_rule(&self) -> Option<&Rule<bool>> {
        match self {
            Self::Text { rules } | Self::Textarea { rules, .. } => rules.required.as_ref(),
            Self::Email { rules }
            | Self::Url { rules }
            | Self::Tel { rules }
            | Self::Select { rules, .. }
            | Self::Radio { rules, .. }
            | Self::Other { rules, .. } => rules.required.as_ref(),
            Self::Password { rules } => rules.required.as_ref(),
            Self::Number { rules } => rules.required.as_ref(),
            Self::Date { rules } | Self::Time { rules } | Self::DateTime { rules } => {
                rules.required.as_ref()
            }
            Self::MultiSelect { rules, .. } | Self::Checkbox { rules } => rules.required.as_ref(),
        }
    }

    /// Returns whether the field must hold a non-empty value.
    pub fn is_required(&self) -> bool {
        enabled(self.required_rule()).is_some()
    }

    /// Returns the `pattern` rule, for kinds that support one.
    pub const fn pattern_rule(&self) -> Option<&Rule<String>> {
        match self {
            Self::Text { rules } | Self::Textarea { rules, .. } => rules.pattern.as_ref(),
            Self::Email { rules }
            | Self::Url { rules }
            | Self::Tel { rules }
            | Self::Select { rules, .. }
            | Self::Radio { rules, .. }
            | Self::Other { rules, .. } => rules.pattern.as_ref(),
            Self::Password { rules } => rules.pattern.as_ref(),
            Self::Date { rules } | Self::Time { rules } | Self::DateTime { rules } => {
                rules.pattern.as_ref()
            }
            Self::Number { .. } | Self::MultiSelect { .. } | Self::Checkbox { .. } => None,
        }
    }

    /// Returns the options of a select, multiselect or radio field.
    pub fn options(&self) -> Option<&[FieldOption]> {
        match self {
            Self::Select { options, .. }
            | Self::MultiSelect { options, .. }
            | Self::Radio { options, .. } => Some(options),
            _ => None,
        }
    }

    /// Returns the value a field of this kind is reset to.
    ///
    /// Kind-specific defaults such as `0` or `false` are intentionally not
    /// restored: scalar kinds reset to the empty string.
    pub fn empty_value(&self) -> FieldValue {
        match self {
            Self::MultiSelect { .. } => FieldValue::List(Vec::new()),
            _ => FieldValue::Text(String::new()),
        }
    }
}

/// Definition of a form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawField", into = "RawField")]
pub struct FieldDescriptor {
    /// Field name, unique within a configuration.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Help text shown under the label.
    pub description: Option<String>,
    /// Whether the control is disabled.
    pub disabled: bool,
    /// Per-field theme overrides.
    pub theme: Option<ThemeOverride>,
    /// Field kind and its rules.
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Creates a new field definition.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            placeholder: None,
            description: None,
            disabled: false,
            theme: None,
            kind,
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Disables the field.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Sets a theme override for one slot.
    #[must_use]
    pub fn theme(mut self, slot: impl Into<String>, classes: impl Into<String>) -> Self {
        self.theme
            .get_or_insert_with(ThemeOverride::new)
            .insert(slot.into(), classes.into());
        self
    }
}

/// When the form-state store re-runs the schema for a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationMode {
    /// On blur.
    OnBlur,
    /// On every change.
    OnChange,
    /// Only when the form is submitted.
    #[default]
    OnSubmit,
    /// On first blur, then on every change.
    OnTouched,
    /// On blur and on every change.
    All,
}

fn default_submit_label() -> String {
    "Submit".to_string()
}

fn default_reset_label() -> String {
    "Reset".to_string()
}

/// A complete form configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    /// Fields in display order.
    pub fields: Vec<FieldDescriptor>,
    /// Initial values handed to the form-state store.
    #[serde(default)]
    pub default_values: FormValues,
    /// When the store validates reactively.
    #[serde(default)]
    pub validation_mode: ValidationMode,
    /// Whether a reset control is rendered.
    #[serde(default)]
    pub show_form_reset: bool,
    /// Label of the submit control.
    #[serde(default = "default_submit_label")]
    pub submit_button_label: String,
    /// Label of the reset control.
    #[serde(default = "default_reset_label")]
    pub reset_button_label: String,
}

impl FormConfig {
    /// Creates a configuration with default form-level options.
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            fields,
            default_values: FormValues::new(),
            validation_mode: ValidationMode::default(),
            show_form_reset: false,
            submit_button_label: default_submit_label(),
            reset_button_label: default_reset_label(),
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Config`](crate::FormError::Config) if the JSON is
    /// malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Sets the default values.
    #[must_use]
    pub fn default_values(mut self, values: FormValues) -> Self {
        self.default_values = values;
        self
    }

    /// Sets the validation mode.
    #[must_use]
    pub const fn validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    /// Returns the field with the given name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the fields matching a predicate, in configuration order.
    pub fn fields_where<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a FieldDescriptor>
    where
        P: Fn(&FieldDescriptor) -> bool + 'a,
    {
        self.fields.iter().filter(move |f| predicate(f))
    }

    /// Multiselect fields whose `required` rule is switched on.
    pub fn required_multiselects(&self) -> impl Iterator<Item = (&FieldDescriptor, &Rule<bool>)> {
        required_multiselects(&self.fields)
    }

    /// Password fields carrying a `matchField` rule.
    pub fn password_matches(&self) -> impl Iterator<Item = (&FieldDescriptor, &MatchFieldRule)> {
        password_matches(&self.fields)
    }
}

/// Multiselect fields whose `required` rule is switched on.
pub fn required_multiselects(
    fields: &[FieldDescriptor],
) -> impl Iterator<Item = (&FieldDescriptor, &Rule<bool>)> {
    fields.iter().filter_map(|field| match &field.kind {
        FieldKind::MultiSelect { rules, .. } => {
            enabled(rules.required.as_ref()).map(|rule| (field, rule))
        }
        _ => None,
    })
}

/// Password fields carrying a `matchField` rule.
pub fn password_matches(
    fields: &[FieldDescriptor],
) -> impl Iterator<Item = (&FieldDescriptor, &MatchFieldRule)> {
    fields.iter().filter_map(|field| match &field.kind {
        FieldKind::Password { rules } => rules.match_field.as_ref().map(|r| (field, r)),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// A field as it appears in JSON: one flat rule table for every kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    #[serde(default)]
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<ThemeOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "RawRules::is_empty")]
    validation: RawRules,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<Rule<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<Rule<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_length: Option<Rule<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<Rule<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<Rule<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<Rule<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_date: Option<Rule<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_date: Option<Rule<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contain_upper_case: Option<Rule<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contain_lower_case: Option<Rule<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contain_number: Option<Rule<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contain_special_char: Option<Rule<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prevent_common_password: Option<Rule<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    match_field: Option<MatchFieldRule>,
}

const STRING_RULES: &[&str] = &["required", "pattern", "minLength", "maxLength"];
const BASIC_RULES: &[&str] = &["required", "pattern"];
const NUMBER_RULES: &[&str] = &["required", "min", "max"];
const DATE_RULES: &[&str] = &["required", "pattern", "minDate", "maxDate"];
const TOGGLE_RULES: &[&str] = &["required"];
const PASSWORD_RULES: &[&str] = &[
    "required",
    "pattern",
    "minLength",
    "maxLength",
    "containUpperCase",
    "containLowerCase",
    "containNumber",
    "containSpecialChar",
    "preventCommonPassword",
    "matchField",
];

impl RawRules {
    fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn present(&self) -> Vec<&'static str> {
        let checks = [
            ("required", self.required.is_some()),
            ("pattern", self.pattern.is_some()),
            ("minLength", self.min_length.is_some()),
            ("maxLength", self.max_length.is_some()),
            ("min", self.min.is_some()),
            ("max", self.max.is_some()),
            ("minDate", self.min_date.is_some()),
            ("maxDate", self.max_date.is_some()),
            ("containUpperCase", self.contain_upper_case.is_some()),
            ("containLowerCase", self.contain_lower_case.is_some()),
            ("containNumber", self.contain_number.is_some()),
            ("containSpecialChar", self.contain_special_char.is_some()),
            ("preventCommonPassword", self.prevent_common_password.is_some()),
            ("matchField", self.match_field.is_some()),
        ];
        checks
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }

    /// Logs every rule the kind does not support; those rules are dropped.
    fn keep(self, field: &str, kind: &str, supported: &[&str]) -> Self {
        for rule in self.present() {
            if !supported.contains(&rule) {
                warn!(field, kind, rule, "Ignoring validation rule not supported by field kind");
            }
        }
        self
    }
}

impl From<RawRules> for StringRules {
    fn from(raw: RawRules) -> Self {
        Self {
            required: raw.required,
            pattern: raw.pattern,
            min_length: raw.min_length,
            max_length: raw.max_length,
        }
    }
}

impl From<RawRules> for BasicRules {
    fn from(raw: RawRules) -> Self {
        Self {
            required: raw.required,
            pattern: raw.pattern,
        }
    }
}

impl From<RawRules> for NumberRules {
    fn from(raw: RawRules) -> Self {
        Self {
            required: raw.required,
            min: raw.min,
            max: raw.max,
        }
    }
}

impl From<RawRules> for DateRules {
    fn from(raw: RawRules) -> Self {
        Self {
            required: raw.required,
            pattern: raw.pattern,
            min_date: raw.min_date,
            max_date: raw.max_date,
        }
    }
}

impl From<RawRules> for PasswordRules {
    fn from(raw: RawRules) -> Self {
        Self {
            required: raw.required,
            pattern: raw.pattern,
            min_length: raw.min_length,
            max_length: raw.max_length,
            contain_upper_case: raw.contain_upper_case,
            contain_lower_case: raw.contain_lower_case,
            contain_number: raw.contain_number,
            contain_special_char: raw.contain_special_char,
            prevent_common_password: raw.prevent_common_password,
            match_field: raw.match_field,
        }
    }
}

impl From<RawRules> for ToggleRules {
    fn from(raw: RawRules) -> Self {
        Self {
            required: raw.required,
        }
    }
}

impl From<RawField> for FieldDescriptor {
    fn from(raw: RawField) -> Self {
        let RawField {
            kind,
            name,
            label,
            placeholder,
            description,
            disabled,
            theme,
            rows,
            options,
            validation,
        } = raw;
        let v = |supported: &[&str]| validation.clone().keep(&name, &kind, supported);

        let field_kind = match kind.as_str() {
            "text" => FieldKind::Text {
                rules: v(STRING_RULES).into(),
            },
            "textarea" => FieldKind::Textarea {
                rows,
                rules: v(STRING_RULES).into(),
            },
            "email" => FieldKind::Email {
                rules: v(BASIC_RULES).into(),
            },
            "password" => FieldKind::Password {
                rules: v(PASSWORD_RULES).into(),
            },
            "number" => FieldKind::Number {
                rules: v(NUMBER_RULES).into(),
            },
            "date" => FieldKind::Date {
                rules: v(DATE_RULES).into(),
            },
            "time" => FieldKind::Time {
                rules: v(DATE_RULES).into(),
            },
            "datetime-local" | "datetime" => FieldKind::DateTime {
                rules: v(DATE_RULES).into(),
            },
            "url" => FieldKind::Url {
                rules: v(BASIC_RULES).into(),
            },
            "tel" => FieldKind::Tel {
                rules: v(BASIC_RULES).into(),
            },
            "select" => FieldKind::Select {
                options,
                rules: v(BASIC_RULES).into(),
            },
            "multiselect" => FieldKind::MultiSelect {
                options,
                rules: v(TOGGLE_RULES).into(),
            },
            "radio" => FieldKind::Radio {
                options,
                rules: v(BASIC_RULES).into(),
            },
            "checkbox" => FieldKind::Checkbox {
                rules: v(TOGGLE_RULES).into(),
            },
            other => {
                warn!(
                    field = %name,
                    kind = other,
                    "Unknown field kind, validating as an unconstrained string"
                );
                FieldKind::Other {
                    type_name: other.to_string(),
                    rules: v(BASIC_RULES).into(),
                }
            }
        };

        Self {
            name,
            label,
            placeholder,
            description,
            disabled,
            theme,
            kind: field_kind,
        }
    }
}

impl From<StringRules> for RawRules {
    fn from(rules: StringRules) -> Self {
        Self {
            required: rules.required,
            pattern: rules.pattern,
            min_length: rules.min_length,
            max_length: rules.max_length,
            ..Self::default()
        }
    }
}

impl From<BasicRules> for RawRules {
    fn from(rules: BasicRules) -> Self {
        Self {
            required: rules.required,
            pattern: rules.pattern,
            ..Self::default()
        }
    }
}

impl From<NumberRules> for RawRules {
    fn from(rules: NumberRules) -> Self {
        Self {
            required: rules.required,
            min: rules.min,
            max: rules.max,
            ..Self::default()
        }
    }
}

impl From<DateRules> for RawRules {
    fn from(rules: DateRules) -> Self {
        Self {
            required: rules.required,
            pattern: rules.pattern,
            min_date: rules.min_date,
            max_date: rules.max_date,
            ..Self::default()
        }
    }
}

impl From<PasswordRules> for RawRules {
    fn from(rules: PasswordRules) -> Self {
        Self {
            required: rules.required,
            pattern: rules.pattern,
            min_length: rules.min_length,
            max_length: rules.max_length,
            contain_upper_case: rules.contain_upper_case,
            contain_lower_case: rules.contain_lower_case,
            contain_number: rules.contain_number,
            contain_special_char: rules.contain_special_char,
            prevent_common_password: rules.prevent_common_password,
            match_field: rules.match_field,
            ..Self::default()
        }
    }
}

impl From<ToggleRules> for RawRules {
    fn from(rules: ToggleRules) -> Self {
        Self {
            required: rules.required,
            ..Self::default()
        }
    }
}

impl From<FieldDescriptor> for RawField {
    fn from(field: FieldDescriptor) -> Self {
        let kind = field.kind.type_name().to_string();
        let (rows, options, validation): (Option<u32>, Vec<FieldOption>, RawRules) =
            match field.kind {
                FieldKind::Text { rules } => (None, Vec::new(), rules.into()),
                FieldKind::Textarea { rows, rules } => (rows, Vec::new(), rules.into()),
                FieldKind::Email { rules }
                | FieldKind::Url { rules }
                | FieldKind::Tel { rules }
                | FieldKind::Other { rules, .. } => (None, Vec::new(), rules.into()),
                FieldKind::Password { rules } => (None, Vec::new(), rules.into()),
                FieldKind::Number { rules } => (None, Vec::new(), rules.into()),
                FieldKind::Date { rules }
                | FieldKind::Time { rules }
                | FieldKind::DateTime { rules } => (None, Vec::new(), rules.into()),
                FieldKind::Select { options, rules } | FieldKind::Radio { options, rules } => {
                    (None, options, rules.into())
                }
                FieldKind::MultiSelect { options, rules } => (None, options, rules.into()),
                FieldKind::Checkbox { rules } => (None, Vec::new(), rules.into()),
            };

        Self {
            kind,
            name: field.name,
            label: field.label,
            placeholder: field.placeholder,
            description: field.description,
            disabled: field.disabled,
            theme: field.theme,
            rows,
            options,
            validation,
        }
    }
}
