//! Validation errors attached to a form object
//!
//! Messages are kept per attribute in the order they were recorded; inline
//! labels show the first one.

use std::collections::BTreeMap;

/// One validation message for an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Message as shown next to the label (`can't be blank`)
    pub message: String,
}

impl FieldError {
    /// Error carrying `message`
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validation messages keyed by attribute name
///
/// # Examples
///
/// ```rust
/// use haml_scaffold::forms::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.add("title", "can't be blank");
/// errors.add("title", "is too short");
///
/// assert_eq!(errors.for_field("title")[0].message, "can't be blank");
/// assert!(errors.for_field("body").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<FieldError>>,
}

impl ValidationErrors {
    /// Empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(FieldError::new(message));
    }

    /// Messages recorded for `field`, oldest first
    #[must_use]
    pub fn for_field(&self, field: &str) -> &[FieldError] {
        self.errors.get(field).map_or(&[], Vec::as_slice)
    }
}
