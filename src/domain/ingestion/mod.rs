//! Ingestion boundary - the only place free-form external data enters the
//! form model.
//!
//! Generated completion text goes through [`extract_json`], is parsed, and
//! is then coerced into typed elements by [`coerce_generated_form`].

mod coerce;
mod extract;

pub use coerce::{
    coerce_element, coerce_generated_form, CoercedForm, Coercion, DEFAULT_OPTIONS, DEFAULT_TITLE,
};
pub use extract::extract_json;

use thiserror::Error;

/// Errors from the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestionError {
    /// No JSON document could be parsed out of the text.
    #[error("Generated output is not valid JSON: {0}")]
    MalformedJson(String),

    /// The document has no `fields` array.
    #[error("Generated output has no fields array")]
    MissingFields,
}

/// Extracts, parses and coerces a generated form in one step.
pub fn parse_generated_form(text: &str, id_token: &str) -> Result<CoercedForm, IngestionError> {
    let candidate = extract_json(text);
    let raw: serde_json::Value = serde_json::from_str(candidate)
        .map_err(|e| IngestionError::MalformedJson(e.to_string()))?;
    coerce_generated_form(&raw, id_token)
}
