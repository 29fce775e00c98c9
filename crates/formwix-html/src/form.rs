//! Whole-form rendering.

use formwix::{
    ErrorMap, FieldDescriptor, FieldKind, FieldValue, FormConfig, FormValues, SubmitState,
};
use ironhtml::html;
use ironhtml::typed::TypedNode;
use ironhtml_elements::{Div, P, Span};
use tracing::debug;

use crate::controls::{html_escape, renderer_for, RenderContext};
use crate::theme::{classes, Theme};

/// Label of the submit control while a submission is running.
pub const SUBMITTING_LABEL: &str = "Submitting";

/// Renders one field: label, description, control and error.
///
/// Checkbox fields carry their label inside the control and get no
/// separate label row.
pub fn render_field(
    field: &FieldDescriptor,
    value: Option<&FieldValue>,
    error: Option<&str>,
    theme: &Theme,
) -> String {
    let theme = theme.for_field(field.theme.as_ref());
    let control = renderer_for(&field.kind).render(&RenderContext {
        field,
        value,
        error,
        theme: &theme,
    });

    let container_id = format!("field-{}", field.name);
    let container_class = classes(&[theme.get("fieldContainer"), &container_id]);
    let error_id = format!("{}-error", field.name);
    let description = field.description.clone();
    let is_checkbox = matches!(field.kind, FieldKind::Checkbox { .. });

    let label_row = {
        let id = field.name.as_str();
        let label_text = field.label.as_str();
        let label_class = theme.get("label");
        let wrapper_class = theme.get("fieldLabelWrapper");
        let label_el = html! {
            label.for_(#id).class(#label_class) { #label_text }
        };
        html! { div.class(#wrapper_class) }
            .raw(label_el.render())
            .when(field.kind.is_required(), |d| {
                d.child::<Span, _>(|s| s.class(theme.get("requiredLabel")).text("*"))
            })
    };

    html! { div.class(#container_class) }
        .attr("id", &container_id)
        .when(!is_checkbox, |d| d.raw(label_row.render()))
        .when(description.is_some(), |d| {
            d.child::<P, _>(|p| {
                p.class(theme.get("fieldDescription"))
                    .text(description.as_deref().unwrap_or(""))
            })
        })
        .child::<Div, _>(|d| d.class(theme.get("fieldWrapper")).raw(&control))
        .when(error.is_some(), |d| {
            d.child::<P, _>(|p| {
                p.class(theme.get("fieldError"))
                    .attr("id", &error_id)
                    .text(error.unwrap_or(""))
            })
        })
        .render()
}

/// Renders a complete form.
///
/// The submit control is disabled and relabelled while `state` is
/// [`SubmitState::Submitting`]; the reset control is rendered only when
/// the configuration asks for it. It is a plain button marked
/// `data-action="reset"`, to be wired to a reset that empties every field
/// rather than the browser's restore of the rendered values.
pub fn render_form(
    config: &FormConfig,
    values: &FormValues,
    errors: &ErrorMap,
    theme: &Theme,
    state: SubmitState,
) -> String {
    let submitting = state == SubmitState::Submitting;

    let container_class = theme.get("formContainer");
    let mut container = html! { div.class(#container_class) };
    for field in &config.fields {
        let name = field.name.as_str();
        let field_html = render_field(field, values.get(name), errors.get(name), theme);
        container = container.raw(&field_html);
    }

    let submit_label = if submitting {
        SUBMITTING_LABEL
    } else {
        config.submit_button_label.as_str()
    };
    let submit_class = theme.get("submitButton");
    let submit = html! {
        button.type_("submit").class(#submit_class) { #submit_label }
    }
    .when(submitting, |b| b.attr("disabled", "disabled"));

    let reset_label = config.reset_button_label.as_str();
    let reset_class = theme.get("formResetButton");
    let reset = html! {
        button.type_("button").class(#reset_class) { #reset_label }
    }
    .attr("data-action", "reset");

    let actions_class = theme.get("formActionWrapper");
    let actions = html! { div.class(#actions_class) }
        .when(config.show_form_reset, |d| d.raw(reset.render()))
        .raw(submit.render());

    debug!(
        fields = config.fields.len(),
        errors = errors.len(),
        submitting,
        "Rendering form"
    );

    let form_class = theme.get("form");
    let mut form = html! { form.method("post").class(#form_class) }
        .attr("novalidate", "novalidate")
        .into_node();
    if let TypedNode::Element { children, .. } = &mut form {
        children.push(TypedNode::Raw(container.render()));
        children.push(TypedNode::Raw(actions.render()));
    }
    form.render()
}

/// Renders a standalone error summary listing every error, or `""` when
/// there are none.
pub fn render_error_summary(errors: &ErrorMap) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|(field, message)| {
            format!("<li>{}: {}</li>", html_escape(field), html_escape(message))
        })
        .collect();
    format!(r#"<div role="alert"><ul>{items}</ul></div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FormConfig {
        FormConfig::from_json_str(
            r#"{
                "fields": [
                    { "type": "text", "name": "name", "label": "Name",
                      "description": "Your full name",
                      "validation": { "required": { "value": true } } },
                    { "type": "checkbox", "name": "agree", "label": "I agree" }
                ],
                "showFormReset": true,
                "submitButtonLabel": "Sign up"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_field_with_error() {
        let config = config();
        let html = render_field(
            &config.fields[0],
            Some(&FieldValue::from("")),
            Some("Name is required"),
            &Theme::default(),
        );
        assert!(html.contains(r#"id="field-name""#));
        assert!(html.contains(r#"for="name""#));
        assert!(html.contains("Your full name"));
        assert!(html.contains(r#"id="name-error""#));
        assert!(html.contains("Name is required"));
        assert!(html.contains('*'));
    }

    #[test]
    fn test_checkbox_has_no_label_row() {
        let config = config();
        let html = render_field(&config.fields[1], None, None, &Theme::default());
        assert_eq!(html.matches("<label").count(), 1);
        assert!(!html.contains("-error"));
    }

    #[test]
    fn test_form_buttons() {
        let config = config();
        let values = FormValues::new();
        let errors = ErrorMap::new();
        let theme = Theme::default();
        let idle = render_form(&config, &values, &errors, &theme, SubmitState::Idle);
        assert!(idle.contains("Sign up"));
        assert!(idle.contains("Reset"));
        assert!(idle.contains(r#"data-action="reset""#));
        assert!(!idle.contains(r#"type="reset""#));
        assert!(!idle.contains(r#"disabled="disabled""#));

        let busy = render_form(&config, &values, &errors, &theme, SubmitState::Submitting);
        assert!(busy.contains(SUBMITTING_LABEL));
        assert!(busy.contains(r#"disabled="disabled""#));
    }

    #[test]
    fn test_reset_hidden_by_default() {
        let mut config = config();
        config.show_form_reset = false;
        let html = render_form(
            &config,
            &FormValues::new(),
            &ErrorMap::new(),
            &Theme::default(),
            SubmitState::Idle,
        );
        assert!(!html.contains("Reset"));
    }

    #[test]
    fn test_error_summary() {
        assert_eq!(render_error_summary(&ErrorMap::new()), "");
        let mut errors = ErrorMap::new();
        errors.add("name", "Name <b>is</b> required");
        let html = render_error_summary(&errors);
        assert!(html.contains("Name &lt;b&gt;is&lt;/b&gt; required"));
    }
}
