//! Analytics module - submission statistics for a form owner.

mod stats;

pub use stats::{FormSubmissionCount, StatusCounts, SubmissionStats};
