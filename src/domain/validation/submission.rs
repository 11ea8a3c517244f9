//! Whole-submission validation and the acceptance gates.

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use super::{validate_field, SubmissionData};
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::form::FormSchema;

/// Error map key used for the submitter email rule.
pub const EMAIL_KEY: &str = "email";

/// Field errors keyed by element id (or [`EMAIL_KEY`]), in schema order.
///
/// Serializes as a JSON object whose key order matches insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(String, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error. The first error recorded for a key wins.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        let key = key.into();
        if self.entries.iter().all(|(k, _)| *k != key) {
            self.entries.push((key, message.into()));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, m)| (k.as_str(), m.as_str()))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, message) in &self.entries {
            map.serialize_entry(key, message)?;
        }
        map.end()
    }
}

/// Why a submission was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionRejection {
    /// Form is not published. Reported exactly like a missing form.
    #[error("Form not found")]
    NotFound,

    /// Anonymous caller on a form that requires sign-in.
    #[error("Sign in required to submit this form")]
    Unauthorized,

    /// One or more fields failed validation.
    #[error("Submission has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrors),
}

/// Validates every element in schema order and applies the email rule.
pub fn validate_submission(
    schema: &FormSchema,
    values: &SubmissionData,
    submitter_email: Option<&str>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for element in schema.elements() {
        if let Some(err) = validate_field(element, values.get(element.id.as_str())) {
            errors.insert(element.id.as_str(), err.message);
        }
    }

    let email_missing = submitter_email.map(|e| e.trim().is_empty()).unwrap_or(true);
    if schema.collect_emails() && email_missing {
        errors.insert(EMAIL_KEY, "Email is required");
    }

    errors
}

/// Applies the acceptance gates in order: published, anonymous policy, field errors.
///
/// All gates must pass; the first failing gate decides the rejection.
pub fn evaluate_submission(
    schema: &FormSchema,
    values: &SubmissionData,
    submitter_email: Option<&str>,
    caller: Option<&AuthenticatedUser>,
) -> Result<(), SubmissionRejection> {
    if !schema.accepts_submissions() {
        return Err(SubmissionRejection::NotFound);
    }
    if !schema.allow_anonymous() && caller.is_none() {
        return Err(SubmissionRejection::Unauthorized);
    }
    let errors = validate_submission(schema, values, submitter_email);
    if !errors.is_empty() {
        return Err(SubmissionRejection::Invalid(errors));
    }
    Ok(())
}
