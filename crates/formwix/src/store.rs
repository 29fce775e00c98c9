//! The form-state store boundary.
//!
//! A [`FormStore`] owns current values and the live error map, notifies
//! subscribers of value changes, and re-runs an installed [`Resolver`]
//! according to its [`ValidationMode`]. [`MemoryStore`] is the in-process
//! implementation; UI bindings provide their own.

use std::collections::BTreeSet;
use std::rc::Rc;

use tracing::trace;

use crate::config::{FormConfig, ValidationMode};
use crate::error::ErrorMap;
use crate::schema::Validated;
use crate::value::{FieldValue, FormValues, ValueLookup};

/// Validation hook a store calls to validate values.
pub trait Resolver {
    /// Validates every field.
    fn resolve(&self, values: &FormValues) -> Validated;

    /// Validates one field, returning its error if it fails.
    fn resolve_field(&self, name: &str, values: &FormValues) -> Option<String>;
}

/// Callback notified with a field name and its new value.
pub type Listener = Box<dyn FnMut(&str, &FieldValue)>;

/// Handle returned by [`FormStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Storage for field values and their live errors.
///
/// Listeners run while the store is borrowed and must not call back into
/// it.
pub trait FormStore {
    /// Returns the current value of a field.
    fn value(&self, name: &str) -> Option<&FieldValue>;

    /// Returns every current value.
    fn values(&self) -> &FormValues;

    /// Sets a field's value and notifies subscribers.
    fn set_value(&mut self, name: &str, value: FieldValue);

    /// Records that a field lost focus.
    fn blur(&mut self, name: &str);

    /// Registers a value-change listener.
    fn subscribe(&mut self, listener: Listener) -> SubscriptionId;

    /// Removes a listener. Returns `false` if it was not registered.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Replaces a field's value with `default`, clearing its error and
    /// interaction state.
    fn reset_field(&mut self, name: &str, default: FieldValue);

    /// Returns the live error of a field.
    fn error(&self, name: &str) -> Option<&str>;

    /// Returns every live error.
    fn errors(&self) -> &ErrorMap;

    /// Shows an error for a field, replacing any existing one.
    fn set_error(&mut self, name: &str, message: String);

    /// Clears the error of a field.
    fn clear_error(&mut self, name: &str);

    /// Replaces every live error.
    fn replace_errors(&mut self, errors: ErrorMap);

    /// Installs the validation hook.
    fn set_resolver(&mut self, resolver: Rc<dyn Resolver>);

    /// Records that a submission was attempted.
    fn mark_submitted(&mut self);
}

/// In-memory [`FormStore`].
pub struct MemoryStore {
    values: FormValues,
    errors: ErrorMap,
    mode: ValidationMode,
    touched: BTreeSet<String>,
    submitted: bool,
    resolver: Option<Rc<dyn Resolver>>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("mode", &self.mode)
            .field("touched", &self.touched)
            .field("submitted", &self.submitted)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl MemoryStore {
    /// Creates a store seeded with `defaults`.
    pub fn new(defaults: FormValues, mode: ValidationMode) -> Self {
        Self {
            values: defaults,
            errors: ErrorMap::new(),
            mode,
            touched: BTreeSet::new(),
            submitted: false,
            resolver: None,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Creates a store from a configuration's defaults and validation mode.
    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(config.default_values.clone(), config.validation_mode)
    }

    /// Returns the validation mode.
    pub const fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Returns whether a field has been blurred since its last reset.
    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Returns whether a submission was attempted.
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    fn validates_on_change(&self, name: &str) -> bool {
        self.submitted
            || match self.mode {
                ValidationMode::OnChange | ValidationMode::All => true,
                ValidationMode::OnTouched => self.touched.contains(name),
                ValidationMode::OnBlur | ValidationMode::OnSubmit => false,
            }
    }

    fn revalidate(&mut self, name: &str) {
        let Some(resolver) = &self.resolver else {
            return;
        };
        match resolver.resolve_field(name, &self.values) {
            Some(message) => self.errors.set(name, message),
            None => {
                self.errors.remove(name);
            }
        }
        trace!(field = name, valid = !self.errors.contains(name), "Revalidated field");
    }

    fn notify(&mut self, name: &str) {
        let Some(value) = self.values.get(name) else {
            return;
        };
        for (_, listener) in &mut self.listeners {
            listener(name, value);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(FormValues::new(), ValidationMode::default())
    }
}

impl FormStore for MemoryStore {
    fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    fn values(&self) -> &FormValues {
        &self.values
    }

    fn set_value(&mut self, name: &str, value: FieldValue) {
        self.values.set(name, value);
        self.notify(name);
        if self.validates_on_change(name) {
            self.revalidate(name);
        }
    }

    fn blur(&mut self, name: &str) {
        let first = self.touched.insert(name.to_string());
        let validate = match self.mode {
            ValidationMode::OnBlur | ValidationMode::All => true,
            ValidationMode::OnTouched => first,
            ValidationMode::OnChange | ValidationMode::OnSubmit => false,
        };
        if validate {
            self.revalidate(name);
        }
    }

    fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn reset_field(&mut self, name: &str, default: FieldValue) {
        self.values.set(name, default);
        self.errors.remove(name);
        self.touched.remove(name);
        self.notify(name);
    }

    fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name)
    }

    fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    fn set_error(&mut self, name: &str, message: String) {
        self.errors.set(name, message);
    }

    fn clear_error(&mut self, name: &str) {
        self.errors.remove(name);
    }

    fn replace_errors(&mut self, errors: ErrorMap) {
        self.errors = errors;
    }

    fn set_resolver(&mut self, resolver: Rc<dyn Resolver>) {
        self.resolver = Some(resolver);
    }

    fn mark_submitted(&mut self) {
        self.submitted = true;
    }
}

impl ValueLookup for MemoryStore {
    fn lookup(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }
}
