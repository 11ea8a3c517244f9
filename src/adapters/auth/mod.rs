//! Authentication adapters implementing the `SessionValidator` port.
//!
//! - `oidc` - JWKS-backed JWT validation for any OIDC provider
//! - `mock` - Fixed token table for tests and local development

mod mock;
mod oidc;

pub use mock::MockSessionValidator;
pub use oidc::{OidcConfig, OidcSessionValidator};
