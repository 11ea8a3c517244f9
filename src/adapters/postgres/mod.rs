//! PostgreSQL adapters - Database implementations of the repository ports.
//!
//! Elements and submission data are stored as JSONB; everything else maps
//! onto plain columns. Schema lives in `migrations/`.

mod form_repository;
mod row;
mod submission_repository;
mod user_repository;

pub use form_repository::PostgresFormRepository;
pub use submission_repository::PostgresSubmissionRepository;
pub use user_repository::PostgresUserRepository;
