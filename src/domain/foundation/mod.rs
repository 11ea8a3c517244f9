//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and the small traits
//! (state machines, ownership) that the form and submission aggregates share.

mod auth;
mod errors;
mod ids;
mod ownership;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ElementId, FormId, SubmissionId, UserId};
pub use ownership::OwnedByUser;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
