//! Bearer token to caller identity.
//!
//! Formcraft never stores credentials. The identity provider signs tokens and
//! an implementation of this port checks issuer, audience (when configured)
//! and expiry before handing back the caller.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Resolves the caller behind a token.
///
/// Expired tokens map to `AuthError::TokenExpired`; an unreachable key set
/// maps to `AuthError::ServiceUnavailable`. Anything else is `InvalidToken`.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `token` is the raw credential, already stripped of its scheme.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
