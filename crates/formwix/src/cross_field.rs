//! Rules that need more than one field's value.
//!
//! Two rule families are checked here rather than in the compiled schema:
//! required multiselects must hold at least one selection, and password
//! fields carrying `matchField` must equal their sibling. Errors are keyed
//! to the multiselect or to the password field that declares the rule,
//! never to the sibling.

use tracing::debug;

use crate::config::{enabled, FieldDescriptor, FieldKind, FormConfig};
use crate::error::ErrorMap;
use crate::validation::messages;
use crate::value::{ValueLookup, ValueType};

#[derive(Debug, Clone, PartialEq, Eq)]
enum CrossFieldRule {
    RequiredSelection {
        field: String,
        message: String,
    },
    Match {
        field: String,
        target: String,
        message: String,
    },
}

impl CrossFieldRule {
    fn check(&self, values: &impl ValueLookup) -> Option<(&str, &str)> {
        match self {
            Self::RequiredSelection { field, message } => {
                let empty = values
                    .lookup(field)
                    .map_or(true, |v| ValueType::StringList.is_empty(v));
                empty.then_some((field.as_str(), message.as_str()))
            }
            Self::Match {
                field,
                target,
                message,
            } => (values.lookup(field) != values.lookup(target))
                .then_some((field.as_str(), message.as_str())),
        }
    }
}

/// The cross-field rules of one configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossFieldPass {
    rules: Vec<CrossFieldRule>,
}

impl CrossFieldPass {
    /// Collects the cross-field rules of a field list, in configuration
    /// order.
    pub fn from_fields(fields: &[FieldDescriptor]) -> Self {
        let rules = fields
            .iter()
            .filter_map(|field| match &field.kind {
                FieldKind::MultiSelect { rules, .. } => {
                    enabled(rules.required.as_ref()).map(|rule| CrossFieldRule::RequiredSelection {
                        field: field.name.clone(),
                        message: rule.message_or_else(|| messages::SELECTION_REQUIRED.to_string()),
                    })
                }
                FieldKind::Password { rules } => {
                    rules.match_field.as_ref().map(|rule| CrossFieldRule::Match {
                        field: field.name.clone(),
                        target: rule.field.clone(),
                        message: rule
                            .message
                            .clone()
                            .unwrap_or_else(|| messages::PASSWORDS_DIFFER.to_string()),
                    })
                }
                _ => None,
            })
            .collect();
        Self { rules }
    }

    /// Collects the cross-field rules of a configuration.
    pub fn from_config(config: &FormConfig) -> Self {
        Self::from_fields(&config.fields)
    }

    /// Returns whether the configuration has no cross-field rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Evaluates every rule against the current values.
    pub fn run(&self, values: &impl ValueLookup) -> ErrorMap {
        let mut errors = ErrorMap::new();
        for (field, message) in self.rules.iter().filter_map(|rule| rule.check(values)) {
            errors.add(field, message);
        }
        debug!(
            rules = self.rules.len(),
            errors = errors.len(),
            "Cross-field pass finished"
        );
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldOption, MatchFieldRule, PasswordRules, Rule, ToggleRules};
    use crate::value::{FieldValue, FormValues};

    fn multiselect(name: &str, required: Option<Rule<bool>>) -> FieldDescriptor {
        FieldDescriptor::new(
            name,
            "Tags",
            FieldKind::MultiSelect {
                options: vec![FieldOption::new("a", "A"), FieldOption::new("b", "B")],
                rules: ToggleRules { required },
            },
        )
    }

    fn password(name: &str, match_field: Option<MatchFieldRule>) -> FieldDescriptor {
        FieldDescriptor::new(
            name,
            "Password",
            FieldKind::Password {
                rules: PasswordRules {
                    match_field,
                    ..PasswordRules::default()
                },
            },
        )
    }

    fn matching(target: &str) -> Option<MatchFieldRule> {
        Some(MatchFieldRule {
            field: target.to_string(),
            message: None,
        })
    }

    #[test]
    fn test_required_multiselect() {
        let pass = CrossFieldPass::from_fields(&[
            multiselect("tags", Some(Rule::new(true))),
            multiselect("optional", Some(Rule::new(false))),
        ]);
        assert_eq!(pass.len(), 1);

        let errors = pass.run(&FormValues::new().with("tags", FieldValue::List(vec![])));
        assert_eq!(errors.get("tags"), Some("This field is required"));
        assert!(!errors.contains("optional"));

        let errors = pass.run(&FormValues::new());
        assert!(errors.contains("tags"));

        let errors = pass.run(&FormValues::new().with("tags", vec!["a"]));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_custom_selection_message() {
        let pass = CrossFieldPass::from_fields(&[multiselect(
            "tags",
            Some(Rule::with_message(true, "Pick at least one tag")),
        )]);
        let errors = pass.run(&FormValues::new().with("tags", FieldValue::Null));
        assert_eq!(errors.get("tags"), Some("Pick at least one tag"));
    }

    #[test]
    fn test_password_match_keyed_to_declaring_field() {
        let pass = CrossFieldPass::from_fields(&[
            password("password", None),
            password("confirmPassword", matching("password")),
        ]);

        let errors = pass.run(
            &FormValues::new()
                .with("password", "Abc12345!")
                .with("confirmPassword", "different"),
        );
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
        assert!(!errors.contains("password"));

        let errors = pass.run(
            &FormValues::new()
                .with("password", "Abc12345!")
                .with("confirmPassword", "Abc12345!"),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_match_treats_missing_as_distinct_from_empty() {
        let pass = CrossFieldPass::from_fields(&[
            password("password", None),
            password("confirm", matching("password")),
        ]);
        assert!(pass.run(&FormValues::new()).is_empty());
        assert!(pass
            .run(&FormValues::new().with("confirm", ""))
            .contains("confirm"));
    }

    #[test]
    fn test_no_rules() {
        let pass = CrossFieldPass::from_fields(&[password("password", None)]);
        assert!(pass.is_empty());
        assert!(pass.run(&FormValues::new().with("password", "x")).is_empty());
    }
}
