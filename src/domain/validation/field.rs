//! Single-element validation.
//!
//! Rules run in a fixed order and stop at the first failure:
//!
//! 1. required
//! 2. minimum / maximum length (non-empty strings only)
//! 3. pattern (non-empty strings only, skipped if the pattern does not compile)

use regex::Regex;
use serde::Serialize;

use super::FieldValue;
use crate::domain::form::FormElement;

/// Which rule rejected the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum FieldErrorKind {
    Required,
    TooShort { min: u32 },
    TooLong { max: u32 },
    PatternMismatch,
}

/// A rejected value with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    fn new(kind: FieldErrorKind, label: &str) -> Self {
        let message = match kind {
            FieldErrorKind::Required => format!("{} is required", label),
            FieldErrorKind::TooShort { min } => {
                format!("{} must be at least {} characters", label, min)
            }
            FieldErrorKind::TooLong { max } => {
                format!("{} must be no more than {} characters", label, max)
            }
            FieldErrorKind::PatternMismatch => format!("{} format is invalid", label),
        };
        Self { kind, message }
    }
}

/// Validates one value against one element. `None` means the value is accepted.
pub fn validate_field(element: &FormElement, value: Option<&FieldValue>) -> Option<FieldError> {
    let is_empty = value.map(FieldValue::is_empty).unwrap_or(true);
    if element.required && is_empty {
        return Some(FieldError::new(FieldErrorKind::Required, &element.label));
    }

    let text = value.and_then(FieldValue::as_non_empty_text)?;
    let validation = element.validation.as_ref()?;

    let length = text.chars().count();
    if let Some(min) = validation.min_length {
        if length < min as usize {
            return Some(FieldError::new(
                FieldErrorKind::TooShort { min },
                &element.label,
            ));
        }
    }
    if let Some(max) = validation.max_length {
        if length > max as usize {
            return Some(FieldError::new(
                FieldErrorKind::TooLong { max },
                &element.label,
            ));
        }
    }

    if let Some(pattern) = validation.pattern.as_deref() {
        match Regex::new(pattern) {
            Ok(re) if !re.is_match(text) => {
                return Some(FieldError::new(
                    FieldErrorKind::PatternMismatch,
                    &element.label,
                ));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(
                    element_id = %element.id,
                    pattern,
                    error = %e,
                    "Skipping pattern check, pattern does not compile"
                );
            }
        }
    }

    None
}
