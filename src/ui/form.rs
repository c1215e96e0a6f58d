use std::fmt::Write;

use super::escape;

/// 带标签和错误提示的字段外层
fn render_field(name: &str, label: &str, required: bool, error: Option<&str>, control: &str) -> String {
    let mut html = String::new();
    let class = if error.is_some() { "form-field form-field--error" } else { "form-field" };
    let _ = write!(html, r#"<div class="{}">"#, class);
    let _ = write!(html, r#"<label for="{}">{}"#, escape(name), escape(label));
    if required {
        html.push_str(r#"<span class="form-field__required" aria-hidden="true">*</span>"#);
    }
    html.push_str("</label>");
    html.push_str(control);
    if let Some(error) = error {
        let _ = write!(
            html,
            r#"<p class="form-field__error" id="{}-error" role="alert">{}</p>"#,
            escape(name),
            escape(error)
        );
    }
    html.push_str("</div>");
    html
}

/// 控件公共属性：id/name、必填、错误状态
fn common_attrs(name: &str, required: bool, error: Option<&str>) -> String {
    let name = escape(name);
    let mut attrs = format!(r#"id="{name}" name="{name}""#);
    if required {
        attrs.push_str(" required");
    }
    if error.is_some() {
        let _ = write!(attrs, r#" aria-invalid="true" aria-describedby="{name}-error""#);
    }
    attrs
}

#[derive(Debug, Clone)]
pub struct InputField {
    pub name: String,
    pub label: String,
    pub input_type: &'static str,
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub error: Option<String>,
}

impl InputField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        InputField {
            name: name.into(),
            label: label.into(),
            input_type: "text",
            value: None,
            placeholder: None,
            required: false,
            error: None,
        }
    }

    pub fn input_type(mut self, input_type: &'static str) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn render(&self) -> String {
        let mut control = format!(
            r#"<input type="{}" {}"#,
            self.input_type,
            common_attrs(&self.name, self.required, self.error.as_deref())
        );
        if let Some(value) = &self.value {
            let _ = write!(control, r#" value="{}""#, escape(value));
        }
        if let Some(placeholder) = &self.placeholder {
            let _ = write!(control, r#" placeholder="{}""#, escape(placeholder));
        }
        control.push('>');
        render_field(&self.name, &self.label, self.required, self.error.as_deref(), &control)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectField {
    pub name: String,
    pub label: String,
    pub options: Vec<SelectOption>,
    pub selected: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub error: Option<String>,
}

impl SelectField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        SelectField {
            name: name.into(),
            label: label.into(),
            options,
            selected: None,
            placeholder: None,
            required: false,
            error: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn selected(mut self, value: impl Into<String>) -> Self {
        self.selected = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn render(&self) -> String {
        let mut control = format!(
            "<select {}>",
            common_attrs(&self.name, self.required, self.error.as_deref())
        );
        if let Some(placeholder) = &self.placeholder {
            let _ = write!(control, r#"<option value="" disabled>{}</option>"#, escape(placeholder));
        }
        for option in &self.options {
            let selected = if self.selected.as_deref() == Some(option.value.as_str()) {
                " selected"
            } else {
                ""
            };
            let _ = write!(
                control,
                r#"<option value="{}"{}>{}</option>"#,
                escape(&option.value),
                selected,
                escape(&option.label)
            );
        }
        control.push_str("</select>");
        render_field(&self.name, &self.label, self.required, self.error.as_deref(), &control)
    }
}

#[derive(Debug, Clone)]
pub struct TextAreaField {
    pub name: String,
    pub label: String,
    pub value: Option<String>,
    pub rows: u8,
    pub max_length: Option<usize>,
    pub required: bool,
    pub error: Option<String>,
}

impl TextAreaField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        TextAreaField {
            name: name.into(),
            label: label.into(),
            value: None,
            rows: 4,
            max_length: None,
            required: false,
            error: None,
        }
    }

    pub fn rows(mut self, rows: u8) -> Self {
        self.rows = rows;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn render(&self) -> String {
        let mut control = format!(
            r#"<textarea {} rows="{}""#,
            common_attrs(&self.name, self.required, self.error.as_deref()),
            self.rows
        );
        if let Some(max) = self.max_length {
            let _ = write!(control, r#" maxlength="{}""#, max);
        }
        let _ = write!(
            control,
            ">{}</textarea>",
            escape(self.value.as_deref().unwrap_or_default())
        );
        render_field(&self.name, &self.label, self.required, self.error.as_deref(), &control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_with_error() {
        let html = InputField::new("senderEmail", "Email")
            .input_type("email")
            .required()
            .error(Some("Email is required".into()))
            .render();
        assert!(html.contains(r#"<div class="form-field form-field--error">"#));
        assert!(html.contains(r#"<input type="email" id="senderEmail" name="senderEmail" required aria-invalid="true""#));
        assert!(html.contains(r#"<p class="form-field__error" id="senderEmail-error" role="alert">Email is required</p>"#));
    }

    #[test]
    fn test_input_without_error() {
        let html = InputField::new("subject", "Subject").placeholder("\"Hi\"").render();
        assert!(html.starts_with(r#"<div class="form-field">"#));
        assert!(html.contains(r#"placeholder="&quot;Hi&quot;""#));
        assert!(!html.contains("aria-invalid"));
        assert!(!html.contains("form-field__required"));
    }

    #[test]
    fn test_select_marks_selected() {
        let html = SelectField::new(
            "rating",
            "Rating",
            vec![SelectOption::new("1", "1 star"), SelectOption::new("5", "5 stars")],
        )
        .selected("5")
        .render();
        assert!(html.contains(r#"<option value="5" selected>5 stars</option>"#));
        assert!(html.contains(r#"<option value="1">1 star</option>"#));
    }

    #[test]
    fn test_textarea_escapes_value() {
        let mut field = TextAreaField::new("body", "Message").rows(6).max_length(5000);
        field.value = Some("</textarea><script>".into());
        let html = field.render();
        assert!(html.contains(r#"rows="6" maxlength="5000">&lt;/textarea&gt;&lt;script&gt;</textarea>"#));
    }
}
