//! One renderer per field kind.
//!
//! Controls are identified by the field name: the control's `id` is the
//! name, option controls use `<name>-<option value>`, and an invalid
//! control points at its error paragraph through `aria-describedby`.

use formwix::config::{DateRules, FieldOption};
use formwix::{FieldDescriptor, FieldKind, FieldValue};

use crate::theme::{classes, Theme, INVALID_CLASS};

/// Placeholder used when a field does not configure one.
pub const DEFAULT_PLACEHOLDER: &str = "Your Answer";

/// Rows of a textarea that does not configure them.
pub const DEFAULT_ROWS: u32 = 4;

/// Everything a renderer sees of one field.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The field being rendered.
    pub field: &'a FieldDescriptor,
    /// Its current value.
    pub value: Option<&'a FieldValue>,
    /// Its current error.
    pub error: Option<&'a str>,
    /// The theme with the field's overrides applied.
    pub theme: &'a Theme,
}

impl RenderContext<'_> {
    fn id(&self) -> String {
        html_escape(&self.field.name)
    }

    fn name(&self) -> String {
        html_escape(&self.field.name)
    }

    /// Class string of `slot`, plus the invalid marker on error.
    fn control_class(&self, slot: &str) -> String {
        let invalid = if self.error.is_some() { INVALID_CLASS } else { "" };
        html_escape(&classes(&[self.theme.get(slot), invalid]))
    }

    fn slot_class(&self, slot: &str) -> String {
        html_escape(self.theme.get(slot))
    }

    fn text_value(&self) -> String {
        match self.value {
            Some(FieldValue::Text(s)) => html_escape(s),
            Some(FieldValue::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    fn is_selected(&self, option: &FieldOption) -> bool {
        let option_value = option.value.to_string();
        match self.value {
            Some(FieldValue::Text(s)) => *s == option_value,
            Some(FieldValue::Number(n)) => n.to_string() == option_value,
            Some(FieldValue::List(items)) => items.contains(&option_value),
            _ => false,
        }
    }

    fn placeholder_attr(&self) -> String {
        let placeholder = self.field.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER);
        format!(r#" placeholder="{}""#, html_escape(placeholder))
    }

    /// `disabled` and error-state attributes shared by every control.
    fn state_attrs(&self) -> String {
        let mut attrs = String::new();
        if self.field.disabled {
            attrs.push_str(" disabled");
        }
        if self.error.is_some() {
            attrs.push_str(&format!(
                r#" aria-invalid="true" aria-describedby="{}-error""#,
                self.id()
            ));
        }
        attrs
    }
}

/// Trait for per-kind control renderers.
pub trait ControlRenderer: Send + Sync {
    /// Renders the control as HTML.
    fn render(&self, ctx: &RenderContext<'_>) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// A single-line input: text, email, number, url, tel and unknown kinds.
#[derive(Debug, Clone)]
pub struct InputControl {
    input_type: &'static str,
    slot: &'static str,
}

impl InputControl {
    /// Creates an input of `input_type` styled by `slot`.
    pub const fn new(input_type: &'static str, slot: &'static str) -> Self {
        Self { input_type, slot }
    }
}

impl ControlRenderer for InputControl {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        format!(
            r#"<input type="{}" id="{}" name="{}" class="{}" value="{}"{}{}>"#,
            self.input_type,
            ctx.id(),
            ctx.name(),
            ctx.control_class(self.slot),
            ctx.text_value(),
            ctx.placeholder_attr(),
            ctx.state_attrs()
        )
    }

    fn input_type(&self) -> &str {
        self.input_type
    }
}

/// A date, time or datetime input. `minDate` and `maxDate` become the
/// control's `min` and `max`.
#[derive(Debug, Clone)]
pub struct DateControl {
    input_type: &'static str,
    slot: &'static str,
}

impl DateControl {
    /// Creates a date-like input of `input_type` styled by `slot`.
    pub const fn new(input_type: &'static str, slot: &'static str) -> Self {
        Self { input_type, slot }
    }
}

fn date_rules(kind: &FieldKind) -> Option<&DateRules> {
    match kind {
        FieldKind::Date { rules } | FieldKind::Time { rules } | FieldKind::DateTime { rules } => {
            Some(rules)
        }
        _ => None,
    }
}

impl ControlRenderer for DateControl {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let rules = date_rules(&ctx.field.kind);
        let bound = |name: &str, rule: Option<&formwix::Rule<String>>| {
            rule.map(|r| format!(r#" {name}="{}""#, html_escape(&r.value)))
                .unwrap_or_default()
        };
        let min_attr = bound("min", rules.and_then(|r| r.min_date.as_ref()));
        let max_attr = bound("max", rules.and_then(|r| r.max_date.as_ref()));

        format!(
            r#"<input type="{}" id="{}" name="{}" class="{}" value="{}"{min_attr}{max_attr}{}>"#,
            self.input_type,
            ctx.id(),
            ctx.name(),
            ctx.control_class(self.slot),
            ctx.text_value(),
            ctx.state_attrs()
        )
    }

    fn input_type(&self) -> &str {
        self.input_type
    }
}

/// A password input inside its wrapper.
#[derive(Debug, Clone, Default)]
pub struct PasswordControl;

impl ControlRenderer for PasswordControl {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let input = InputControl::new("password", "password").render(ctx);
        format!(
            r#"<div class="{}">{input}</div>"#,
            ctx.slot_class("passwordWrapper")
        )
    }

    fn input_type(&self) -> &str {
        "password"
    }
}

/// A multi-line text area.
#[derive(Debug, Clone, Default)]
pub struct TextareaControl;

impl ControlRenderer for TextareaControl {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let rows = match &ctx.field.kind {
            FieldKind::Textarea { rows, .. } => rows.unwrap_or(DEFAULT_ROWS),
            _ => DEFAULT_ROWS,
        };
        format!(
            r#"<textarea id="{}" name="{}" class="{}" rows="{rows}"{}{}>{}</textarea>"#,
            ctx.id(),
            ctx.name(),
            ctx.control_class("textarea"),
            ctx.placeholder_attr(),
            ctx.state_attrs(),
            ctx.text_value()
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// A drop-down select with a blank first option.
#[derive(Debug, Clone)]
pub struct SelectControl {
    /// Label of the blank option.
    pub blank_label: String,
}

impl Default for SelectControl {
    fn default() -> Self {
        Self {
            blank_label: "---------".to_string(),
        }
    }
}

impl ControlRenderer for SelectControl {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut options = format!(
            r#"<option value="">{}</option>"#,
            html_escape(&self.blank_label)
        );
        for option in ctx.field.kind.options().unwrap_or_default() {
            let selected_attr = if ctx.is_selected(option) { " selected" } else { "" };
            options.push_str(&format!(
                r#"<option value="{}" class="{}"{selected_attr}>{}</option>"#,
                html_escape(&option.value.to_string()),
                ctx.slot_class("optionsLabel"),
                html_escape(&option.label)
            ));
        }

        format!(
            r#"<div class="{}"><select id="{}" name="{}" class="{}"{}>{options}</select></div>"#,
            ctx.slot_class("selectOptionsWrapper"),
            ctx.id(),
            ctx.name(),
            ctx.control_class("select"),
            ctx.state_attrs()
        )
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// A group of options, each a checkbox or radio input with its label.
#[derive(Debug, Clone)]
pub struct OptionGroupControl {
    input_type: &'static str,
    wrapper_slot: &'static str,
    option_slot: &'static str,
    input_slot: &'static str,
}

impl OptionGroupControl {
    /// A checkbox per option; any number may be selected.
    pub const fn multiselect() -> Self {
        Self {
            input_type: "checkbox",
            wrapper_slot: "multiSelectWrapper",
            option_slot: "multiSelectOptionsWrapper",
            input_slot: "multiSelect",
        }
    }

    /// A radio button per option.
    pub const fn radio() -> Self {
        Self {
            input_type: "radio",
            wrapper_slot: "radioWrapper",
            option_slot: "radioOptionsWrapper",
            input_slot: "radio",
        }
    }
}

impl ControlRenderer for OptionGroupControl {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let options: String = ctx
            .field
            .kind
            .options()
            .unwrap_or_default()
            .iter()
            .map(|option| {
                let value = html_escape(&option.value.to_string());
                let id = format!("{}-{value}", ctx.id());
                let checked_attr = if ctx.is_selected(option) { " checked" } else { "" };
                format!(
                    r#"<div class="{}"><input type="{}" id="{id}" name="{}" value="{value}" class="{}"{checked_attr}{}><label for="{id}" class="{}">{}</label></div>"#,
                    ctx.slot_class(self.option_slot),
                    self.input_type,
                    ctx.name(),
                    ctx.control_class(self.input_slot),
                    ctx.state_attrs(),
                    ctx.slot_class("optionsLabel"),
                    html_escape(&option.label)
                )
            })
            .collect();

        format!(
            r#"<div class="{}" role="group">{options}</div>"#,
            ctx.slot_class(self.wrapper_slot)
        )
    }

    fn input_type(&self) -> &str {
        self.input_type
    }
}

/// A single checkbox carrying the field label.
#[derive(Debug, Clone, Default)]
pub struct CheckboxControl;

impl ControlRenderer for CheckboxControl {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let checked = matches!(ctx.value, Some(FieldValue::Bool(true)));
        let checked_attr = if checked { " checked" } else { "" };
        format!(
            r#"<div class="{}"><input type="checkbox" id="{id}" name="{}" value="true" class="{}"{checked_attr}{}><label for="{id}" class="{}">{}</label></div>"#,
            ctx.slot_class("checkBoxWrapper"),
            ctx.name(),
            ctx.control_class("checkbox"),
            ctx.state_attrs(),
            ctx.slot_class("checkBoxLabel"),
            html_escape(&ctx.field.label),
            id = ctx.id(),
        )
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

/// Returns the renderer for a field kind.
pub fn renderer_for(kind: &FieldKind) -> Box<dyn ControlRenderer> {
    match kind {
        FieldKind::Text { .. } | FieldKind::Other { .. } => {
            Box::new(InputControl::new("text", "text"))
        }
        FieldKind::Email { .. } => Box::new(InputControl::new("email", "email")),
        FieldKind::Number { .. } => Box::new(InputControl::new("number", "number")),
        FieldKind::Url { .. } => Box::new(InputControl::new("url", "url")),
        FieldKind::Tel { .. } => Box::new(InputControl::new("tel", "tel")),
        FieldKind::Password { .. } => Box::new(PasswordControl),
        FieldKind::Textarea { .. } => Box::new(TextareaControl),
        FieldKind::Date { .. } => Box::new(DateControl::new("date", "date")),
        FieldKind::Time { .. } => Box::new(DateControl::new("time", "time")),
        FieldKind::DateTime { .. } => Box::new(DateControl::new("datetime-local", "datetime")),
        FieldKind::Select { .. } => Box::new(SelectControl::default()),
        FieldKind::MultiSelect { .. } => Box::new(OptionGroupControl::multiselect()),
        FieldKind::Radio { .. } => Box::new(OptionGroupControl::radio()),
        FieldKind::Checkbox { .. } => Box::new(CheckboxControl),
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwix::config::{BasicRules, StringRules, ToggleRules};
    use formwix::{FieldOption, Rule};

    fn render(field: &FieldDescriptor, value: Option<&FieldValue>, error: Option<&str>) -> String {
        let theme = Theme::default().for_field(field.theme.as_ref());
        renderer_for(&field.kind).render(&RenderContext {
            field,
            value,
            error,
            theme: &theme,
        })
    }

    fn text() -> FieldKind {
        FieldKind::Text { rules: StringRules::default() }
    }

    fn choices() -> Vec<FieldOption> {
        vec![FieldOption::new("rust", "Rust"), FieldOption::new("go", "Go")]
    }

    #[test]
    fn test_text_input() {
        let field = FieldDescriptor::new("username", "Username", text()).placeholder("Pick one");
        let html = render(&field, Some(&FieldValue::from("ada")), None);
        assert!(html.contains(r#"type="text""#));
        assert!(html.contains(r#"id="username""#));
        assert!(html.contains(r#"value="ada""#));
        assert!(html.contains(r#"placeholder="Pick one""#));
        assert!(!html.contains("aria-invalid"));
    }

    #[test]
    fn test_error_state() {
        let kind = FieldKind::Email { rules: BasicRules::default() };
        let field = FieldDescriptor::new("email", "Email", kind);
        let html = render(&field, None, Some("Invalid email address"));
        assert!(html.contains(INVALID_CLASS));
        assert!(html.contains(r#"aria-describedby="email-error""#));
        assert!(html.contains(r#"placeholder="Your Answer""#));
    }

    #[test]
    fn test_values_are_escaped() {
        let kind = FieldKind::Textarea { rows: Some(6), rules: StringRules::default() };
        let field = FieldDescriptor::new("bio", "Bio", kind);
        let html = render(&field, Some(&FieldValue::from("<script>\"x\"</script>")), None);
        assert!(html.contains("&lt;script&gt;&quot;x&quot;&lt;/script&gt;"));
        assert!(html.contains(r#"rows="6""#));
    }

    #[test]
    fn test_date_bounds() {
        let field = FieldDescriptor::new(
            "start",
            "Start",
            FieldKind::Date {
                rules: DateRules {
                    min_date: Some(Rule::new("2024-01-01".to_string())),
                    max_date: Some(Rule::new("2024-12-31".to_string())),
                    ..DateRules::default()
                },
            },
        );
        let html = render(&field, Some(&FieldValue::from("2024-06-01")), None);
        assert!(html.contains(r#"type="date""#));
        assert!(html.contains(r#"min="2024-01-01""#));
        assert!(html.contains(r#"max="2024-12-31""#));
    }

    #[test]
    fn test_select_marks_selection() {
        let field = FieldDescriptor::new(
            "lang",
            "Language",
            FieldKind::Select { options: choices(), rules: BasicRules::default() },
        );
        let html = render(&field, Some(&FieldValue::from("go")), None);
        assert!(html.contains(r#"<option value="">---------</option>"#));
        assert!(html.contains(r#"value="go" class="text-sm" selected"#));
        assert!(!html.contains(r#"value="rust" class="text-sm" selected"#));
    }

    #[test]
    fn test_multiselect_checks_listed_values() {
        let field = FieldDescriptor::new(
            "langs",
            "Languages",
            FieldKind::MultiSelect { options: choices(), rules: ToggleRules::default() },
        );
        let html = render(&field, Some(&FieldValue::from(vec!["rust"])), None);
        assert!(html.contains(r#"id="langs-rust""#));
        assert!(html.contains(r#"type="checkbox""#));
        assert_eq!(html.matches(" checked").count(), 1);
    }

    #[test]
    fn test_radio_group() {
        let field = FieldDescriptor::new(
            "lang",
            "Language",
            FieldKind::Radio { options: choices(), rules: BasicRules::default() },
        );
        let html = render(&field, Some(&FieldValue::from("rust")), None);
        assert_eq!(html.matches(r#"type="radio""#).count(), 2);
        assert!(html.contains(r#"for="lang-go""#));
    }

    #[test]
    fn test_checkbox() {
        let kind = FieldKind::Checkbox { rules: ToggleRules::default() };
        let field = FieldDescriptor::new("agree", "I agree", kind).disabled();
        let html = render(&field, Some(&FieldValue::Bool(true)), None);
        assert!(html.contains(" checked"));
        assert!(html.contains(" disabled"));
        assert!(html.contains("I agree</label>"));
    }

    #[test]
    fn test_field_theme_override() {
        let field = FieldDescriptor::new("name", "Name", text()).theme("text", "custom-input");
        let html = render(&field, None, None);
        assert!(html.contains(r#"class="custom-input""#));
    }

    #[test]
    fn test_renderer_dispatch() {
        let other = FieldKind::Other {
            type_name: "color".to_string(),
            rules: BasicRules::default(),
        };
        assert_eq!(renderer_for(&other).input_type(), "text");
        let datetime = FieldKind::DateTime { rules: DateRules::default() };
        assert_eq!(renderer_for(&datetime).input_type(), "datetime-local");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }
}
