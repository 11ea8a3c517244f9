//! Validation module - field rules and the submission acceptance pipeline.
//!
//! Everything here is pure: the same schema and values always produce the
//! same result.

mod field;
mod submission;
mod value;

pub use field::{validate_field, FieldError, FieldErrorKind};
pub use submission::{
    evaluate_submission, validate_submission, SubmissionRejection, ValidationErrors, EMAIL_KEY,
};
pub use value::{deserialize_submission_data, FieldValue, SubmissionData};
