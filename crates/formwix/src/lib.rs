//! # formwix
//!
//! Declarative forms: describe fields as data, compile them into a
//! validation schema, and drive submissions through a controller.
//!
//! This crate provides:
//! - A typed field configuration model, loadable from JSON
//! - A schema compiler turning field lists into composite validators
//! - A cross-field pass for required multiselects and password
//!   confirmation
//! - A submission controller guarding against re-entrant submits
//! - A form-state store boundary with an in-memory implementation
//!
//! Rendering lives in `formwix-html`.
//!
//! ## Quick Start
//!
//! ```rust
//! use formwix::{FormConfig, FormController, SubmitOutcome};
//!
//! let config = FormConfig::from_json_str(r#"{ "fields": [
//!     { "type": "email", "name": "email", "label": "Email",
//!       "validation": { "required": { "value": true } } }
//! ] }"#).unwrap();
//!
//! let controller = FormController::with_memory_store(config, |values, _utils| async move {
//!     println!("submitted {values:?}");
//!     Ok(())
//! })
//! .unwrap();
//!
//! controller.set_value("email", "not-an-email");
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let outcome = runtime.block_on(controller.submit()).unwrap();
//! assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
//! assert_eq!(controller.errors().get("email"), Some("Invalid email address"));
//! ```
//!
//! ## Validating Without a Controller
//!
//! ```rust
//! use formwix::{compile, CrossFieldPass, FormConfig, FormValues};
//!
//! let config = FormConfig::from_json_str(r#"{ "fields": [
//!     { "type": "password", "name": "password", "label": "Password" },
//!     { "type": "password", "name": "confirm", "label": "Confirm",
//!       "validation": { "matchField": { "field": "password" } } }
//! ] }"#).unwrap();
//!
//! let values = FormValues::new()
//!     .with("password", "Abc12345!")
//!     .with("confirm", "different");
//!
//! let schema = compile(&config.fields).unwrap();
//! assert!(schema.validate(&values).is_valid());
//!
//! let errors = CrossFieldPass::from_config(&config).run(&values);
//! assert_eq!(errors.get("confirm"), Some("Passwords do not match"));
//! ```

pub mod config;
mod controller;
mod cross_field;
mod error;
pub mod schema;
pub mod store;
pub mod validation;
mod value;

pub use config::{FieldDescriptor, FieldKind, FieldOption, FormConfig, Rule, ValidationMode};
pub use controller::{
    FormController, FormUtils, ResetHandle, SubmitHandler, SubmitOutcome, SubmitState,
};
pub use cross_field::CrossFieldPass;
pub use error::{BoxError, ErrorMap, FormError, PatternError, Result};
pub use schema::{
    compile, CompiledSchema, FieldSchema, Rulebook, SchemaCache, SchemaCompiler, Validated,
};
pub use store::{FormStore, MemoryStore, Resolver};
pub use value::{FieldValue, FormValues, ValueLookup, ValueType};
