//! Form module - schema aggregate, element model and publication lifecycle.

mod element;
mod errors;
mod publication;
mod schema;
mod status;

pub use element::{ElementType, ElementValidation, FormElement};
pub use errors::FormError;
pub use publication::{PublishSettings, ShareLinks};
pub use schema::{FormSchema, MAX_ELEMENTS, MAX_TITLE_LENGTH};
pub use status::FormStatus;
