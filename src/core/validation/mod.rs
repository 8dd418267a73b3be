//! Validation and filtering of raw form input
//!
//! Form fields arrive as free text. [`FormValidator`] runs each field through
//! the [`filters`] then the [`validators`], collects every failure, and only
//! hands back typed values once the whole form is clean. A form that fails
//! here never reaches the network.
//!
//! ```rust,ignore
//! let mut v = FormValidator::new();
//! let name = v.text("name", &form.name);
//! let qty = v.quantity("quantity", &form.quantity);
//! v.finish()?;
//! ```

pub mod filters;
pub mod validators;

use crate::core::error::{FieldValidationError, ValidationError};

/// Longest accepted name/city/sku
pub const MAX_TEXT_LEN: usize = 200;

/// Accumulates field errors across a form
#[derive(Debug, Default)]
pub struct FormValidator {
    errors: Vec<FieldValidationError>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, field: &str, result: Result<(), String>) -> bool {
        match result {
            Ok(()) => true,
            Err(message) => {
                self.errors.push(FieldValidationError {
                    field: field.to_string(),
                    message,
                });
                false
            }
        }
    }

    /// Required free-text field: whitespace-normalised, non-empty, bounded
    pub fn text(&mut self, field: &str, raw: &str) -> String {
        let value = filters::collapse_whitespace()(field, raw);
        if self.record(field, validators::required()(field, &value)) {
            self.record(field, validators::max_length(MAX_TEXT_LEN)(field, &value));
        }
        value
    }

    /// Required integer field
    ///
    /// Returns `None` when the field failed; the error is recorded.
    pub fn integer(&mut self, field: &str, raw: &str) -> Option<i64> {
        let value = filters::trim()(field, raw);
        let ok = self.record(field, validators::required()(field, &value))
            && self.record(field, validators::integer()(field, &value));
        if ok { value.parse().ok() } else { None }
    }

    /// Required non-negative integer field
    pub fn quantity(&mut self, field: &str, raw: &str) -> Option<i64> {
        let value = filters::trim()(field, raw);
        let ok = self.record(field, validators::required()(field, &value))
            && self.record(field, validators::integer()(field, &value))
            && self.record(field, validators::non_negative()(field, &value));
        if ok { value.parse().ok() } else { None }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fail with every recorded error, or succeed when there were none
    pub fn finish(self) -> Result<(), ValidationError> {
        match ValidationError::from_fields(self.errors) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
