//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, traits)
//! - `form` - Form schema aggregate, element model and publication lifecycle
//! - `validation` - Field and submission validation
//! - `submission` - Recorded submissions and triage
//! - `ingestion` - Coercion of generated JSON into form elements
//! - `user` - User records and the identity webhook
//! - `analytics` - Submission statistics

pub mod analytics;
pub mod form;
pub mod foundation;
pub mod ingestion;
pub mod submission;
pub mod user;
pub mod validation;
