//! Use cases sitting between the HTTP surface and the domain.
//!
//! Each handler owns the ports it needs as `Arc<dyn _>` and turns one request
//! into domain calls plus persistence. Form authoring, public submission,
//! inbox triage and the identity webhook each get their own handler.

pub mod handlers;

pub use handlers::*;
