//! Labels with inline validation errors
//!
//! [`InlineErrorLabel`] wraps any [`LabelRenderer`] and, when the bound
//! object has errors on the labelled field, appends the first message to the
//! label text and marks the label invalid:
//!
//! ```rust
//! use haml_scaffold::forms::{InlineErrorLabel, LabelOptions, ValidationErrors};
//!
//! let mut errors = ValidationErrors::new();
//! errors.add("title", "can't be blank");
//!
//! let label = InlineErrorLabel::for_object("post");
//! let html = label.render_label("title", None, &LabelOptions::default(), Some(&errors));
//!
//! assert_eq!(
//!     html,
//!     r#"<label for="post_title" class="invalid">Title <span class="error_message">can't be blank</span></label>"#
//! );
//! ```

use super::error::{FieldError, ValidationErrors};
use crate::scaffold::inflect::Inflections;

/// Class given to labels of fields with errors
pub const INVALID_CLASS: &str = "invalid";

/// Class of the span wrapping the inline message
pub const ERROR_MESSAGE_CLASS: &str = "error_message";

/// Anything that exposes validation errors per field
pub trait HasErrors {
    /// Errors recorded for `field`, oldest first
    fn errors_on(&self, field: &str) -> &[FieldError];
}

impl HasErrors for ValidationErrors {
    fn errors_on(&self, field: &str) -> &[FieldError] {
        self.for_field(field)
    }
}

/// Options accepted by a label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelOptions {
    /// Never show inline errors on this label
    pub hide_errors: bool,
    /// Text placed before the label text
    pub prepend_text: Option<String>,
    /// Text placed after the label text and any error
    pub append_text: Option<String>,
    /// CSS class; replaced by `invalid` when errors are shown
    pub class: Option<String>,
    /// Explicit `for` attribute
    pub for_id: Option<String>,
}

/// Builds label markup from already-escaped text
pub trait LabelRenderer {
    /// Render a label for `field` whose content is the markup `text`
    fn label(&self, field: &str, text: &str, options: &LabelOptions) -> String;
}

/// Plain `<label>` element bound to `<object>_<field>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlLabel {
    object_name: String,
}

impl HtmlLabel {
    /// Labels for fields of the form object named `object_name`
    #[must_use]
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
        }
    }
}

impl LabelRenderer for HtmlLabel {
    fn label(&self, field: &str, text: &str, options: &LabelOptions) -> String {
        let for_id = options
            .for_id
            .clone()
            .unwrap_or_else(|| format!("{}_{field}", self.object_name));

        let mut html = format!(r#"<label for="{}""#, escape_attr(&for_id));
        if let Some(class) = &options.class {
            html.push_str(&format!(r#" class="{}""#, escape_attr(class)));
        }
        html.push('>');
        html.push_str(text);
        html.push_str("</label>");
        html
    }
}

/// Label decorator that inlines the first validation error
#[derive(Debug, Clone)]
pub struct InlineErrorLabel<R = HtmlLabel> {
    inner: R,
}

impl InlineErrorLabel<HtmlLabel> {
    /// Decorate a plain [`HtmlLabel`] for `object_name`
    #[must_use]
    pub fn for_object(object_name: impl Into<String>) -> Self {
        Self::new(HtmlLabel::new(object_name))
    }
}

impl<R: LabelRenderer> InlineErrorLabel<R> {
    /// Decorate `inner`
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Render the label for `field`
    ///
    /// `text` defaults to the humanized field name. `object` is the bound
    /// form object, if any; it is only read. All supplied text is
    /// HTML-escaped.
    pub fn render_label(
        &self,
        field: &str,
        text: Option<&str>,
        options: &LabelOptions,
        object: Option<&dyn HasErrors>,
    ) -> String {
        let mut content = text.map_or_else(|| Inflections::humanize(field), ToString::to_string);
        content = escape_html(&content);

        if let Some(prepend) = &options.prepend_text {
            content = format!("{} {content}", escape_html(prepend));
        }

        let mut options = options.clone();
        let first_error = object
            .filter(|_| !options.hide_errors)
            .and_then(|object| object.errors_on(field).first());
        if let Some(error) = first_error {
            content.push_str(&format!(
                r#" <span class="{ERROR_MESSAGE_CLASS}">{}</span>"#,
                escape_html(&error.message)
            ));
            options.class = Some(INVALID_CLASS.to_string());
        }

        if let Some(append) = &options.append_text {
            content.push(' ');
            content.push_str(&escape_html(append));
        }

        self.inner.label(field, &content, &options)
    }
}

/// Escape a string for use in HTML attribute values
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a string for use in HTML content
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(field: &str, messages: &[&str]) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for message in messages {
            errors.add(field, *message);
        }
        errors
    }

    #[test]
    fn test_plain_label_without_object() {
        let html = InlineErrorLabel::for_object("post").render_label(
            "author_id",
            None,
            &LabelOptions::default(),
            None,
        );
        assert_eq!(html, r#"<label for="post_author_id">Author</label>"#);
    }

    #[test]
    fn test_first_error_only() {
        let errors = errors("title", &["can't be blank", "is too short"]);
        let html = InlineErrorLabel::for_object("post").render_label(
            "title",
            Some("Headline"),
            &LabelOptions {
                class: Some("required".into()),
                ..LabelOptions::default()
            },
            Some(&errors),
        );
        assert_eq!(
            html,
            r#"<label for="post_title" class="invalid">Headline <span class="error_message">can't be blank</span></label>"#
        );
    }

    #[test]
    fn test_hide_errors() {
        let errors = errors("title", &["can't be blank"]);
        let html = InlineErrorLabel::for_object("post").render_label(
            "title",
            None,
            &LabelOptions {
                hide_errors: true,
                class: Some("required".into()),
                ..LabelOptions::default()
            },
            Some(&errors),
        );
        assert_eq!(html, r#"<label for="post_title" class="required">Title</label>"#);
    }

    #[test]
    fn test_errors_on_other_field_are_ignored() {
        let errors = errors("body", &["can't be blank"]);
        let html = InlineErrorLabel::for_object("post").render_label(
            "title",
            None,
            &LabelOptions::default(),
            Some(&errors),
        );
        assert!(!html.contains("error_message"));
        assert!(!html.contains("invalid"));
    }

    #[test]
    fn test_prepend_and_append_wrap_error() {
        let errors = errors("title", &["can't be blank"]);
        let html = InlineErrorLabel::for_object("post").render_label(
            "title",
            None,
            &LabelOptions {
                prepend_text: Some("*".into()),
                append_text: Some("(max 80)".into()),
                ..LabelOptions::default()
            },
            Some(&errors),
        );
        assert_eq!(
            html,
            r#"<label for="post_title" class="invalid">* Title <span class="error_message">can't be blank</span> (max 80)</label>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let errors = errors("title", &["must not contain <script>"]);
        let html = InlineErrorLabel::for_object("post").render_label(
            "title",
            Some("Q&A"),
            &LabelOptions::default(),
            Some(&errors),
        );
        assert!(html.contains("Q&amp;A"));
        assert!(html.contains("must not contain &lt;script&gt;"));
    }

    #[test]
    fn test_object_is_not_mutated() {
        let errors = errors("title", &["can't be blank"]);
        let before = errors.clone();
        let label = InlineErrorLabel::for_object("post");
        let _ = label.render_label("title", None, &LabelOptions::default(), Some(&errors));
        assert_eq!(errors, before);
    }

    struct Bracket;

    impl LabelRenderer for Bracket {
        fn label(&self, field: &str, text: &str, options: &LabelOptions) -> String {
            format!("[{field}|{text}|{}]", options.class.as_deref().unwrap_or("-"))
        }
    }

    #[test]
    fn test_delegates_to_inner_renderer() {
        let errors = errors("title", &["is taken"]);
        let html = InlineErrorLabel::new(Bracket).render_label(
            "title",
            None,
            &LabelOptions::default(),
            Some(&errors),
        );
        assert_eq!(
            html,
            r#"[title|Title <span class="error_message">is taken</span>|invalid]"#
        );
    }
}
