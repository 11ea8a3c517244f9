//! HTTP adapter for the public, submitter-facing endpoints.
//!
//! These routes accept anonymous callers. A valid token, when present, is
//! attached to the submission.

mod dto;
mod handlers;
mod routes;

pub use dto::{SubmitFormRequest, SubmitFormResponse};
pub use handlers::PublicHandlers;
pub use routes::public_routes;
