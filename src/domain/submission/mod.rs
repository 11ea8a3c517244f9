//! Submission module - recorded answers and their triage lifecycle.

mod aggregate;
mod errors;
mod status;

pub use aggregate::{ClientInfo, Submission, SubmissionInput};
pub use errors::SubmissionError;
pub use status::SubmissionStatus;
