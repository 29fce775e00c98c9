//! Compiling field configurations into validation schemas.
//!
//! [`SchemaCompiler::compile`] turns an ordered list of
//! [`FieldDescriptor`]s into a [`CompiledSchema`]: one [`FieldSchema`] per
//! field, each a composite of independent [`Validator`]s layered on top of
//! a base type check and an emptiness rule.
//!
//! For a non-empty value the checks run in a fixed order and the first
//! failure is reported:
//!
//! 1. type check against the kind's [`ValueType`]
//! 2. the kind's baseline format (email, url, date, time, datetime, tel)
//! 3. `minLength`, `maxLength`, `min`, `max`
//! 4. `containUpperCase`, `containLowerCase`, `containNumber`,
//!    `containSpecialChar`, `preventCommonPassword`
//! 5. `pattern`
//!
//! An empty value fails only the `required` rule and is otherwise accepted.
//!
//! ```rust
//! use formwix::{compile, FormConfig, FormValues};
//!
//! let config = FormConfig::from_json_str(r#"{ "fields": [
//!     { "type": "tel", "name": "phone", "label": "Phone",
//!       "validation": { "required": { "value": true } } }
//! ] }"#).unwrap();
//!
//! let schema = compile(&config.fields).unwrap();
//! let validated = schema.validate(&FormValues::new().with("phone", "+1 (555) 123-4567"));
//! assert!(validated.errors.is_empty());
//! assert_eq!(validated.values.get("phone").and_then(|v| v.as_str()), Some("15551234567"));
//! ```

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::config::{
    enabled, FieldDescriptor, FieldKind, NumberRules, PasswordRules, Rule, StringRules,
};
use crate::error::{ErrorMap, FormError, PatternError, Result};
use crate::store::Resolver;
use crate::validation::{
    messages, normalize_tel, CommonPasswordValidator, EmailValidator, MaxLengthValidator,
    MinLengthValidator, RangeValidator, RegexValidator, RequiredValidator, TelValidator,
    UrlValidator, Validator, DATETIME_PATTERN, DATE_PATTERN, EMAIL_PATTERN, SPECIAL_CHAR_PATTERN,
    TIME_PATTERN,
};
use crate::value::{FieldValue, FormValues, ValueType};

/// Commonly used weak passwords rejected by `preventCommonPassword`.
pub const WEAK_PASSWORDS: [&str; 16] = [
    "123456",
    "password",
    "12345678",
    "qwerty",
    "abc123",
    "111111",
    "password1",
    "123123",
    "iloveyou",
    "abcdef",
    "654321",
    "qwerty123",
    "zxcvbnm",
    "asdfgh",
    "qwertyuiop",
    "asdf1234",
];

/// Immutable constants the compiler builds validators from.
#[derive(Debug, Clone)]
pub struct Rulebook {
    weak_passwords: Arc<BTreeSet<String>>,
    email: Regex,
    date: Regex,
    time: Regex,
    datetime: Regex,
    upper_case: Regex,
    lower_case: Regex,
    number: Regex,
    special_char: Regex,
}

impl Default for Rulebook {
    fn default() -> Self {
        let builtin = |source: &str| Regex::new(source).expect("built-in pattern compiles");
        Self {
            weak_passwords: Arc::new(WEAK_PASSWORDS.iter().map(|s| (*s).to_string()).collect()),
            email: builtin(EMAIL_PATTERN),
            date: builtin(DATE_PATTERN),
            time: builtin(TIME_PATTERN),
            datetime: builtin(DATETIME_PATTERN),
            upper_case: builtin("[A-Z]"),
            lower_case: builtin("[a-z]"),
            number: builtin("[0-9]"),
            special_char: builtin(SPECIAL_CHAR_PATTERN),
        }
    }
}

impl Rulebook {
    /// Replaces the weak-password denylist.
    #[must_use]
    pub fn with_weak_passwords<I, S>(mut self, passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weak_passwords = Arc::new(passwords.into_iter().map(Into::into).collect());
        self
    }

    /// Returns whether a password is on the denylist.
    pub fn is_weak_password(&self, password: &str) -> bool {
        self.weak_passwords.contains(password)
    }
}

/// Outcome of running a compiled schema over a value set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validated {
    /// Normalised values of every configured field that passed.
    pub values: FormValues,
    /// First failure per failing field.
    pub errors: ErrorMap,
}

impl Validated {
    /// Returns whether every field passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The composite validator for one field.
pub struct FieldSchema {
    name: String,
    value_type: ValueType,
    required: Option<RequiredValidator>,
    checks: Vec<Box<dyn Validator>>,
    normalize: Option<fn(&str) -> String>,
}

impl std::fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSchema")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("optional", &self.is_optional())
            .field("checks", &self.check_codes())
            .finish_non_exhaustive()
    }
}

impl FieldSchema {
    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the base type values are checked against.
    pub const fn base(&self) -> ValueType {
        self.value_type
    }

    /// Returns whether empty values are accepted.
    pub const fn is_optional(&self) -> bool {
        self.required.is_none()
    }

    /// Returns the rule names of the layered checks, in evaluation order.
    pub fn check_codes(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.code()).collect()
    }

    /// Validates one value, returning the normalised value on success.
    ///
    /// `Ok(None)` means the field has no value and none is required.
    ///
    /// # Errors
    ///
    /// Returns the message of the first rule the value fails.
    pub fn validate(
        &self,
        value: Option<&FieldValue>,
    ) -> std::result::Result<Option<FieldValue>, String> {
        let value = match value {
            Some(v) if !self.value_type.is_empty(v) => v,
            other => {
                if let Some(required) = &self.required {
                    return Err(required.message().to_string());
                }
                return Ok(other.cloned());
            }
        };

        if !self.value_type.accepts(value) {
            return Err(messages::wrong_type(
                self.value_type.name(),
                value.type_name(),
            ));
        }

        for check in &self.checks {
            check.validate(value)?;
        }

        Ok(Some(match (self.normalize, value) {
            (Some(normalize), FieldValue::Text(s)) => FieldValue::Text(normalize(s)),
            _ => value.clone(),
        }))
    }
}

/// Validators for a whole configuration, one per field name.
#[derive(Debug, Default)]
pub struct CompiledSchema {
    fields: Vec<FieldSchema>,
    index: HashMap<String, usize>,
}

impl CompiledSchema {
    /// Returns the schema of one field.
    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over field schemas in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter()
    }

    /// Returns the field names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSchema::name)
    }

    /// Validates every configured field.
    ///
    /// Values of names absent from the configuration are dropped.
    pub fn validate(&self, values: &FormValues) -> Validated {
        let mut validated = Validated::default();
        for field in &self.fields {
            match field.validate(values.get(&field.name)) {
                Ok(Some(value)) => validated.values.set(field.name.clone(), value),
                Ok(None) => {}
                Err(message) => {
                    validated.errors.add(&field.name, message);
                }
            }
        }
        debug!(
            fields = self.fields.len(),
            errors = validated.errors.len(),
            "Schema pass finished"
        );
        validated
    }

    /// Validates a single field, returning its error if it fails.
    ///
    /// Names absent from the configuration always pass.
    pub fn validate_field(&self, name: &str, values: &FormValues) -> Option<String> {
        self.get(name)
            .and_then(|field| field.validate(values.get(name)).err())
    }
}

impl Resolver for CompiledSchema {
    fn resolve(&self, values: &FormValues) -> Validated {
        self.validate(values)
    }

    fn resolve_field(&self, name: &str, values: &FormValues) -> Option<String> {
        self.validate_field(name, values)
    }
}

/// Parses a `pattern` rule into a regular expression.
///
/// A string of the form `/body/flags` is split into its body and flags;
/// anything else is used whole as the body. Supported flags are `i`
/// (case-insensitive), `m` (multi-line) and `s` (dot matches newline);
/// `g`, `y`, `u`, `d` and `v` are accepted and have no effect.
///
/// Bodies use [`regex`] syntax, which has no lookaround or backreferences.
/// A body such as `^(?=.*[0-9]).{8,}$` fails to compile, and the compiler
/// then skips the pattern rule; express such constraints with the
/// character-class rules instead.
///
/// # Errors
///
/// Returns an error for unknown or repeated flags and bodies that do not
/// compile.
pub fn parse_pattern(pattern: &str) -> std::result::Result<Regex, PatternError> {
    let pattern = pattern.trim();
    let (body, flags) = match pattern.rfind('/') {
        Some(last) if pattern.starts_with('/') && last > 0 => {
            (&pattern[1..last], &pattern[last + 1..])
        }
        _ => (pattern, ""),
    };

    let mut builder = RegexBuilder::new(body);
    let mut seen = HashSet::new();
    for flag in flags.chars() {
        if !seen.insert(flag) {
            return Err(PatternError::DuplicateFlag(flag));
        }
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'g' | 'y' | 'u' | 'd' | 'v' => {}
            other => return Err(PatternError::InvalidFlag(other)),
        }
    }

    builder.build().map_err(PatternError::from)
}

/// Builds [`CompiledSchema`]s from field configurations.
#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
    rulebook: Rulebook,
}

impl SchemaCompiler {
    /// Creates a compiler using the given constants.
    pub const fn new(rulebook: Rulebook) -> Self {
        Self { rulebook }
    }

    /// Returns the compiler's constants.
    pub const fn rulebook(&self) -> &Rulebook {
        &self.rulebook
    }

    /// Compiles a field list.
    ///
    /// A malformed `pattern` rule is logged and skipped; the field keeps
    /// every other constraint.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::DuplicateField`] if two fields share a name and
    /// [`FormError::UnknownMatchField`] if a `matchField` rule names a
    /// field that does not exist.
    pub fn compile(&self, fields: &[FieldDescriptor]) -> Result<CompiledSchema> {
        let mut index = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            if index.insert(field.name.clone(), i).is_some() {
                return Err(FormError::DuplicateField(field.name.clone()));
            }
        }

        for (field, rule) in crate::config::password_matches(fields) {
            if !index.contains_key(&rule.field) {
                return Err(FormError::UnknownMatchField {
                    field: field.name.clone(),
                    target: rule.field.clone(),
                });
            }
        }

        Ok(CompiledSchema {
            fields: fields.iter().map(|f| self.compile_field(f)).collect(),
            index,
        })
    }

    fn compile_field(&self, field: &FieldDescriptor) -> FieldSchema {
        let label = field.label.as_str();
        let mut checks: Vec<Box<dyn Validator>> = Vec::new();
        let mut normalize = None;
        let book = &self.rulebook;

        match &field.kind {
            FieldKind::Text { rules } | FieldKind::Textarea { rules, .. } => {
                layer_string(&mut checks, label, rules);
            }
            FieldKind::Email { .. } => {
                checks.push(Box::new(EmailValidator::new(book.email.clone())));
            }
            FieldKind::Url { .. } => {
                checks.push(Box::new(UrlValidator::new()));
            }
            FieldKind::Tel { .. } => {
                checks.push(Box::new(TelValidator::new()));
                normalize = Some(normalize_tel as fn(&str) -> String);
            }
            // minDate and maxDate are left to the rendered control.
            FieldKind::Date { .. } => layer_format(&mut checks, &book.date, messages::INVALID_DATE),
            FieldKind::Time { .. } => layer_format(&mut checks, &book.time, messages::INVALID_TIME),
            FieldKind::DateTime { .. } => {
                layer_format(&mut checks, &book.datetime, messages::INVALID_DATETIME);
            }
            FieldKind::Number { rules } => layer_range(&mut checks, label, rules),
            FieldKind::Password { rules } => self.layer_password(&mut checks, label, rules),
            FieldKind::Select { .. }
            | FieldKind::Radio { .. }
            | FieldKind::MultiSelect { .. }
            | FieldKind::Checkbox { .. }
            | FieldKind::Other { .. } => {}
        }

        if let Some(rule) = field.kind.pattern_rule() {
            layer_pattern(&mut checks, &field.name, rule);
        }

        let value_type = field.kind.value_type();
        let required = enabled(field.kind.required_rule()).map(|rule| match &rule.message {
            Some(message) => RequiredValidator::with_message(value_type, message.clone()),
            None => RequiredValidator::new(value_type, label),
        });

        FieldSchema {
            name: field.name.clone(),
            value_type,
            required,
            checks,
            normalize,
        }
    }

    fn layer_password(
        &self,
        checks: &mut Vec<Box<dyn Validator>>,
        label: &str,
        rules: &PasswordRules,
    ) {
        layer_length(checks, label, rules.min_length.as_ref(), rules.max_length.as_ref());

        let book = &self.rulebook;
        let classes = [
            (
                &rules.contain_upper_case,
                &book.upper_case,
                "containUpperCase",
                messages::MISSING_UPPER_CASE,
            ),
            (
                &rules.contain_lower_case,
                &book.lower_case,
                "containLowerCase",
                messages::MISSING_LOWER_CASE,
            ),
            (
                &rules.contain_number,
                &book.number,
                "containNumber",
                messages::MISSING_NUMBER,
            ),
            (
                &rules.contain_special_char,
                &book.special_char,
                "containSpecialChar",
                messages::MISSING_SPECIAL_CHAR,
            ),
        ];
        for (rule, pattern, code, default) in classes {
            if let Some(rule) = enabled(rule.as_ref()) {
                let message = rule.message_or_else(|| default.to_string());
                checks.push(Box::new(RegexValidator::from_regex(pattern.clone(), code, message)));
            }
        }

        if let Some(rule) = enabled(rules.prevent_common_password.as_ref()) {
            let message = rule.message_or_else(|| messages::COMMON_PASSWORD.to_string());
            checks.push(Box::new(CommonPasswordValidator::new(
                Arc::clone(&book.weak_passwords),
                message,
            )));
        }
    }
}

fn layer_string(checks: &mut Vec<Box<dyn Validator>>, label: &str, rules: &StringRules) {
    layer_length(checks, label, rules.min_length.as_ref(), rules.max_length.as_ref());
}

fn layer_length(
    checks: &mut Vec<Box<dyn Validator>>,
    label: &str,
    min_length: Option<&Rule<usize>>,
    max_length: Option<&Rule<usize>>,
) {
    if let Some(rule) = min_length {
        checks.push(Box::new(match &rule.message {
            Some(message) => MinLengthValidator::with_message(rule.value, message.clone()),
            None => MinLengthValidator::new(label, rule.value),
        }));
    }
    if let Some(rule) = max_length {
        checks.push(Box::new(match &rule.message {
            Some(message) => MaxLengthValidator::with_message(rule.value, message.clone()),
            None => MaxLengthValidator::new(label, rule.value),
        }));
    }
}

fn layer_range(checks: &mut Vec<Box<dyn Validator>>, label: &str, rules: &NumberRules) {
    if let Some(rule) = &rules.min {
        checks.push(Box::new(match &rule.message {
            Some(message) => RangeValidator::with_message(Some(rule.value), None, message.clone()),
            None => RangeValidator::at_least(label, rule.value),
        }));
    }
    if let Some(rule) = &rules.max {
        checks.push(Box::new(match &rule.message {
            Some(message) => RangeValidator::with_message(None, Some(rule.value), message.clone()),
            None => RangeValidator::at_most(label, rule.value),
        }));
    }
}

fn layer_format(checks: &mut Vec<Box<dyn Validator>>, pattern: &Regex, message: &str) {
    checks.push(Box::new(RegexValidator::from_regex(
        pattern.clone(),
        "format",
        message,
    )));
}

fn layer_pattern(checks: &mut Vec<Box<dyn Validator>>, field: &str, rule: &Rule<String>) {
    if rule.value.trim().is_empty() {
        return;
    }
    match parse_pattern(&rule.value) {
        Ok(regex) => {
            let message = rule.message_or_else(|| messages::PATTERN_MISMATCH.to_string());
            checks.push(Box::new(RegexValidator::from_regex(regex, "pattern", message)));
        }
        Err(err) => {
            warn!(
                field,
                pattern = %rule.value,
                error = %err,
                "Invalid regex pattern, skipping rule"
            );
        }
    }
}

/// Compiles a field list with the default [`Rulebook`].
///
/// # Errors
///
/// See [`SchemaCompiler::compile`].
pub fn compile(fields: &[FieldDescriptor]) -> Result<CompiledSchema> {
    SchemaCompiler::default().compile(fields)
}

/// Memoises the schema of the most recently compiled field list.
///
/// The key is a hash of the list's JSON form, so any change to the list
/// triggers a recompilation.
#[derive(Debug, Default)]
pub struct SchemaCache {
    compiler: SchemaCompiler,
    entry: Option<(u64, Rc<CompiledSchema>)>,
}

impl SchemaCache {
    /// Creates a cache compiling with `compiler`.
    pub const fn new(compiler: SchemaCompiler) -> Self {
        Self {
            compiler,
            entry: None,
        }
    }

    /// Returns the schema for `fields`, compiling it if the list changed.
    ///
    /// # Errors
    ///
    /// See [`SchemaCompiler::compile`].
    pub fn get_or_compile(&mut self, fields: &[FieldDescriptor]) -> Result<Rc<CompiledSchema>> {
        let key = fingerprint(fields)?;
        if let Some((cached, schema)) = &self.entry {
            if *cached == key {
                return Ok(Rc::clone(schema));
            }
        }

        let schema = Rc::new(self.compiler.compile(fields)?);
        self.entry = Some((key, Rc::clone(&schema)));
        Ok(schema)
    }
}

fn fingerprint(fields: &[FieldDescriptor]) -> Result<u64> {
    let json = serde_json::to_string(fields)?;
    let mut hasher = DefaultHasher::new();
    json.hash(&mut hasher);
    Ok(hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MatchFieldRule, ToggleRules};

    fn text_field(name: &str, rules: StringRules) -> FieldDescriptor {
        FieldDescriptor::new(name, name.to_uppercase(), FieldKind::Text { rules })
    }

    #[test]
    fn test_every_field_gets_one_entry() {
        let fields = vec![
            text_field("a", StringRules::default()),
            FieldDescriptor::new("b", "B", FieldKind::Checkbox { rules: ToggleRules::default() }),
        ];
        let schema = compile(&fields).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.names().collect::<Vec<_>>(), ["a", "b"]);
        assert!(schema.get("a").is_some());
        assert!(schema.get("c").is_none());
    }

    #[test]
    fn test_duplicate_names_fail() {
        let fields = vec![
            text_field("a", StringRules::default()),
            text_field("a", StringRules::default()),
        ];
        assert!(matches!(compile(&fields), Err(FormError::DuplicateField(name)) if name == "a"));
    }

    #[test]
    fn test_dangling_match_field_fails() {
        let fields = vec![FieldDescriptor::new(
            "confirm",
            "Confirm",
            FieldKind::Password {
                rules: PasswordRules {
                    match_field: Some(MatchFieldRule {
                        field: "password".to_string(),
                        message: None,
                    }),
                    ..PasswordRules::default()
                },
            },
        )];
        assert!(matches!(
            compile(&fields),
            Err(FormError::UnknownMatchField { field, target })
                if field == "confirm" && target == "password"
        ));
    }

    #[test]
    fn test_parse_pattern_literal_with_flags() {
        let regex = parse_pattern("/^[A-Z]{3}$/i").unwrap();
        assert!(regex.is_match("ABC"));
        assert!(regex.is_match("abc"));
        assert!(!regex.is_match("abcd"));
    }

    #[test]
    fn test_parse_pattern_bare_body() {
        let regex = parse_pattern("^[0-9]+$").unwrap();
        assert!(regex.is_match("123"));
        assert!(!regex.is_match("12a"));

        // A lone leading slash is part of the body.
        let regex = parse_pattern("/api").unwrap();
        assert!(regex.is_match("/api/users"));
    }

    #[test]
    fn test_parse_pattern_errors() {
        assert!(matches!(parse_pattern("[unterminated"), Err(PatternError::Regex(_))));
        assert!(matches!(parse_pattern("/abc/q"), Err(PatternError::InvalidFlag('q'))));
        assert!(matches!(parse_pattern("/abc/ii"), Err(PatternError::DuplicateFlag('i'))));
        assert!(parse_pattern("/a.b/gs").unwrap().is_match("a\nb"));
    }

    #[test]
    fn test_lookaround_pattern_is_skipped() {
        assert!(matches!(
            parse_pattern("^(?=.*[0-9]).{8,}$"),
            Err(PatternError::Regex(_))
        ));

        let fields = vec![text_field(
            "code",
            StringRules {
                pattern: Some(Rule::new("/^(?=.*[0-9]).{8,}$/".to_string())),
                max_length: Some(Rule::new(12)),
                ..StringRules::default()
            },
        )];
        let schema = compile(&fields).unwrap();
        let field = schema.get("code").unwrap();
        assert_eq!(field.check_codes(), ["maxLength"]);
        assert!(field.validate(Some(&FieldValue::from("abcdefghij"))).is_ok());
    }

    #[test]
    fn test_malformed_pattern_keeps_other_rules() {
        let fields = vec![text_field(
            "code",
            StringRules {
                pattern: Some(Rule::new("[unterminated".to_string())),
                min_length: Some(Rule::new(3)),
                ..StringRules::default()
            },
        )];
        let schema = compile(&fields).unwrap();
        let field = schema.get("code").unwrap();
        assert_eq!(field.check_codes(), ["minLength"]);
        assert_eq!(
            field.validate(Some(&FieldValue::from("ab"))),
            Err("CODE must be at least 3 characters".to_string())
        );
        assert!(field.validate(Some(&FieldValue::from("[[["))).is_ok());
    }

    #[test]
    fn test_check_order() {
        let fields = vec![FieldDescriptor::new(
            "password",
            "Password",
            FieldKind::Password {
                rules: PasswordRules {
                    pattern: Some(Rule::new("^.+$".to_string())),
                    min_length: Some(Rule::new(8)),
                    contain_upper_case: Some(Rule::new(true)),
                    contain_lower_case: Some(Rule::new(false)),
                    contain_number: Some(Rule::new(true)),
                    contain_special_char: Some(Rule::new(true)),
                    prevent_common_password: Some(Rule::new(true)),
                    ..PasswordRules::default()
                },
            },
        )];
        let schema = compile(&fields).unwrap();
        assert_eq!(
            schema.get("password").unwrap().check_codes(),
            [
                "minLength",
                "containUpperCase",
                "containNumber",
                "containSpecialChar",
                "preventCommonPassword",
                "pattern",
            ]
        );
    }

    #[test]
    fn test_type_mismatch() {
        let fields = vec![FieldDescriptor::new(
            "age",
            "Age",
            FieldKind::Number { rules: NumberRules::default() },
        )];
        let schema = compile(&fields).unwrap();
        let validated = schema.validate(&FormValues::new().with("age", "42"));
        assert_eq!(validated.errors.get("age"), Some("Expected number, received string"));
    }

    #[test]
    fn test_injected_denylist() {
        let compiler = SchemaCompiler::new(Rulebook::default().with_weak_passwords(["hunter2"]));
        assert!(compiler.rulebook().is_weak_password("hunter2"));
        assert!(!compiler.rulebook().is_weak_password("password"));

        let fields = vec![FieldDescriptor::new(
            "password",
            "Password",
            FieldKind::Password {
                rules: PasswordRules {
                    prevent_common_password: Some(Rule::new(true)),
                    ..PasswordRules::default()
                },
            },
        )];
        let schema = compiler.compile(&fields).unwrap();
        let check = |pw: &str| {
            schema.validate_field("password", &FormValues::new().with("password", pw))
        };
        assert!(check("hunter2").is_some());
        assert!(check("password").is_none());
    }

    #[test]
    fn test_unknown_names_are_dropped() {
        let schema = compile(&[text_field("a", StringRules::default())]).unwrap();
        let validated = schema.validate(&FormValues::new().with("a", "x").with("extra", "y"));
        assert!(validated.is_valid());
        assert!(validated.values.contains("a"));
        assert!(!validated.values.contains("extra"));
        assert_eq!(schema.validate_field("extra", &FormValues::new()), None);
    }

    #[test]
    fn test_schema_cache_recompiles_on_change() {
        let mut cache = SchemaCache::default();
        let mut fields = vec![text_field("a", StringRules::default())];

        let first = cache.get_or_compile(&fields).unwrap();
        let second = cache.get_or_compile(&fields).unwrap();
        assert!(Rc::ptr_eq(&first, &second));

        fields.push(text_field("b", StringRules::default()));
        let third = cache.get_or_compile(&fields).unwrap();
        assert!(!Rc::ptr_eq(&first, &third));
        assert_eq!(third.len(), 2);
    }
}
