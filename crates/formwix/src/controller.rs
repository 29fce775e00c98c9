//! Submission control.
//!
//! [`FormController`] ties a configuration, its compiled schema, its
//! cross-field rules and a [`FormStore`] together, and runs the submission
//! protocol:
//!
//! 1. a fresh schema pass over the store's current values, published to the
//!    store's error channel
//! 2. the cross-field pass
//! 3. cross-field errors are recorded and the submission is refused
//! 4. otherwise schema errors refuse the submission
//! 5. otherwise the submit handler runs with the validated values
//!
//! While the handler runs the controller is [`SubmitState::Submitting`]
//! and further submissions return [`SubmitOutcome::Busy`] without invoking
//! it.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use tracing::{debug, info};

use crate::config::FormConfig;
use crate::cross_field::CrossFieldPass;
use crate::error::{BoxError, ErrorMap, FormError, Result};
use crate::schema::{CompiledSchema, SchemaCompiler};
use crate::store::{FormStore, MemoryStore, Resolver};
use crate::value::{FieldValue, FormValues};

/// A boxed submit callback.
pub type SubmitHandler =
    Rc<dyn Fn(FormValues, FormUtils) -> LocalBoxFuture<'static, std::result::Result<(), BoxError>>>;

/// Whether a submit callback is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    /// No submission in progress.
    #[default]
    Idle,
    /// The submit callback is running.
    Submitting,
}

/// How a call to [`FormController::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submit callback ran to completion.
    Submitted,
    /// Validation failed; the callback was not invoked.
    Rejected(ErrorMap),
    /// A submission was already in progress; the callback was not invoked.
    Busy,
}

/// Resets every configured field of one form to its empty value.
#[derive(Clone)]
pub struct ResetHandle {
    store: Rc<RefCell<dyn FormStore>>,
    fields: Rc<[(String, FieldValue)]>,
}

impl std::fmt::Debug for ResetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetHandle")
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}

impl ResetHandle {
    fn new(config: &FormConfig, store: Rc<RefCell<dyn FormStore>>) -> Self {
        let fields = config
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.kind.empty_value()))
            .collect();
        Self { store, fields }
    }

    /// Resets the fields. Validation is not re-run.
    pub fn reset(&self) {
        let mut store = self.store.borrow_mut();
        for (name, empty) in self.fields.iter() {
            store.reset_field(name, empty.clone());
        }
        debug!(fields = self.fields.len(), "Form reset");
    }
}

/// Utilities handed to the submit callback.
#[derive(Debug, Clone)]
pub struct FormUtils {
    /// Resets the submitted form.
    pub reset: ResetHandle,
}

/// Returns the controller to idle when a submission ends, however it ends.
struct SubmittingGuard<'a>(&'a Cell<SubmitState>);

impl<'a> SubmittingGuard<'a> {
    fn enter(state: &'a Cell<SubmitState>) -> Self {
        state.set(SubmitState::Submitting);
        Self(state)
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(SubmitState::Idle);
    }
}

/// Validates and submits one form.
pub struct FormController {
    config: FormConfig,
    schema: Rc<CompiledSchema>,
    cross_field: CrossFieldPass,
    store: Rc<RefCell<dyn FormStore>>,
    handler: SubmitHandler,
    reset: ResetHandle,
    state: Cell<SubmitState>,
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("schema", &self.schema)
            .field("cross_field", &self.cross_field)
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}

impl FormController {
    /// Creates a controller over an existing store.
    ///
    /// The schema is compiled once and installed as the store's resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not compile.
    pub fn new<F, Fut>(
        config: FormConfig,
        store: Rc<RefCell<dyn FormStore>>,
        handler: F,
    ) -> Result<Self>
    where
        F: Fn(FormValues, FormUtils) -> Fut + 'static,
        Fut: Future<Output = std::result::Result<(), BoxError>> + 'static,
    {
        Self::with_compiler(&SchemaCompiler::default(), config, store, handler)
    }

    /// Creates a controller compiling with `compiler`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not compile.
    pub fn with_compiler<F, Fut>(
        compiler: &SchemaCompiler,
        config: FormConfig,
        store: Rc<RefCell<dyn FormStore>>,
        handler: F,
    ) -> Result<Self>
    where
        F: Fn(FormValues, FormUtils) -> Fut + 'static,
        Fut: Future<Output = std::result::Result<(), BoxError>> + 'static,
    {
        let schema = Rc::new(compiler.compile(&config.fields)?);
        store
            .borrow_mut()
            .set_resolver(Rc::clone(&schema) as Rc<dyn Resolver>);

        debug!(fields = schema.len(), "Form controller created");

        Ok(Self {
            cross_field: CrossFieldPass::from_config(&config),
            reset: ResetHandle::new(&config, Rc::clone(&store)),
            handler: Rc::new(move |values, utils| Box::pin(handler(values, utils))),
            config,
            schema,
            store,
            state: Cell::new(SubmitState::Idle),
        })
    }

    /// Creates a controller over a fresh [`MemoryStore`] seeded from the
    /// configuration's default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not compile.
    pub fn with_memory_store<F, Fut>(config: FormConfig, handler: F) -> Result<Self>
    where
        F: Fn(FormValues, FormUtils) -> Fut + 'static,
        Fut: Future<Output = std::result::Result<(), BoxError>> + 'static,
    {
        let store: Rc<RefCell<dyn FormStore>> =
            Rc::new(RefCell::new(MemoryStore::from_config(&config)));
        Self::new(config, store, handler)
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Returns the compiled schema.
    pub fn schema(&self) -> &CompiledSchema {
        &self.schema
    }

    /// Returns the store.
    pub fn store(&self) -> Rc<RefCell<dyn FormStore>> {
        Rc::clone(&self.store)
    }

    /// Returns the submission state.
    pub fn state(&self) -> SubmitState {
        self.state.get()
    }

    /// Returns whether the submit callback is running.
    pub fn is_submitting(&self) -> bool {
        self.state.get() == SubmitState::Submitting
    }

    /// Returns a snapshot of the store's live errors.
    pub fn errors(&self) -> ErrorMap {
        self.store.borrow().errors().clone()
    }

    /// Sets a value in the store.
    pub fn set_value(&self, name: &str, value: impl Into<FieldValue>) {
        self.store.borrow_mut().set_value(name, value.into());
    }

    /// Resets every configured field to its empty value.
    pub fn reset(&self) {
        self.reset.reset();
    }

    /// Returns a handle resetting this form.
    pub fn reset_handle(&self) -> ResetHandle {
        self.reset.clone()
    }

    /// Validates the current values and, if they pass, runs the submit
    /// callback.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Submit`] if the callback fails. The controller
    /// is idle again by then.
    pub async fn submit(&self) -> Result<SubmitOutcome> {
        if self.is_submitting() {
            debug!("Submission already in progress, ignoring");
            return Ok(SubmitOutcome::Busy);
        }

        let values = {
            let mut store = self.store.borrow_mut();
            store.mark_submitted();
            store.values().clone()
        };

        let validated = self.schema.validate(&values);
        let cross = self.cross_field.run(&values);
        debug!(
            schema_errors = validated.errors.len(),
            cross_field_errors = cross.len(),
            "Validation passes finished"
        );

        {
            let mut store = self.store.borrow_mut();
            store.replace_errors(validated.errors.clone());
            if !cross.is_empty() {
                for (field, message) in cross.iter() {
                    if store.error(field).is_none() {
                        store.set_error(field, message.to_string());
                    }
                }
                return Ok(SubmitOutcome::Rejected(store.errors().clone()));
            }
        }

        if !validated.is_valid() {
            return Ok(SubmitOutcome::Rejected(validated.errors));
        }

        info!(fields = validated.values.len(), "Submitting form");
        let _guard = SubmittingGuard::enter(&self.state);
        let utils = FormUtils {
            reset: self.reset.clone(),
        };
        (self.handler)(validated.values, utils)
            .await
            .map_err(FormError::Submit)?;

        Ok(SubmitOutcome::Submitted)
    }
}
