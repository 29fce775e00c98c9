//! # formwix-html
//!
//! HTML renderers for formwix forms: one control renderer per field kind,
//! a slot-based class theme, and whole-form rendering.
//!
//! ```rust
//! use formwix::{ErrorMap, FormConfig, FormValues, SubmitState};
//! use formwix_html::{render_form, Theme};
//!
//! let config = FormConfig::from_json_str(r#"{ "fields": [
//!     { "type": "email", "name": "email", "label": "Email" }
//! ] }"#).unwrap();
//!
//! let mut errors = ErrorMap::new();
//! errors.add("email", "Invalid email address");
//!
//! let html = render_form(
//!     &config,
//!     &FormValues::new().with("email", "nope"),
//!     &errors,
//!     &Theme::default(),
//!     SubmitState::Idle,
//! );
//! assert!(html.contains(r#"id="email-error""#));
//! ```

pub mod controls;
mod form;
mod theme;

pub use controls::{html_escape, renderer_for, ControlRenderer, RenderContext};
pub use form::{render_error_summary, render_field, render_form, SUBMITTING_LABEL};
pub use theme::{classes, Theme, INVALID_CLASS};
