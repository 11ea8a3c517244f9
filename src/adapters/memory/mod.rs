//! In-memory repository implementations.
//!
//! Back the handler tests and local development without a database.
//! Each operation takes the lock once, so writes are atomic per record.

mod form_repository;
mod submission_repository;
mod user_repository;

pub use form_repository::InMemoryFormRepository;
pub use submission_repository::InMemorySubmissionRepository;
pub use user_repository::InMemoryUserRepository;
