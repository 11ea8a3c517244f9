//! Ports - Interfaces for external dependencies.
//!
//! Ports define the contracts that adapters must implement.
//! Following hexagonal architecture, the domain depends on ports,
//! and adapters implement them.
//!
//! # Ports
//!
//! - `FormRepository` - Form schema persistence
//! - `SubmissionRepository` - Submission recording and triage
//! - `UserRepository` - User records synced from the identity provider
//! - `SessionValidator` - Bearer token validation
//! - `FormGenerator` - Text-generation provider for drafting forms

mod form_generator;
mod form_repository;
mod session_validator;
mod submission_repository;
mod user_repository;

pub use form_generator::{FormGenerator, UpstreamError};
pub use form_repository::FormRepository;
pub use session_validator::SessionValidator;
pub use submission_repository::SubmissionRepository;
pub use user_repository::UserRepository;
