//! Form helpers for generated views
//!
//! Validation error collections and a label decorator that shows the first
//! error for a field inline.

pub mod error;
pub mod label;

pub use error::{FieldError, ValidationErrors};
pub use label::{HasErrors, HtmlLabel, InlineErrorLabel, LabelOptions, LabelRenderer};
