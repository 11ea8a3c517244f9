//! Formcraft - form builder backend
//!
//! Owners build form schemas, publish them at a public link, and triage the
//! submissions that come back. Submissions are validated against the
//! published schema before they are recorded.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
