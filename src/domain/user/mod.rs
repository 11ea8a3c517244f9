//! User module - accounts synced from the identity provider.
//!
//! Users are created lazily the first time an authenticated request arrives,
//! and kept in sync by the signed identity webhook.

mod aggregate;
mod errors;
mod identity_event;
mod webhook_verifier;

pub use aggregate::{
    User, UserProfile, UserRole, DEFAULT_SESSION_DAYS, DEFAULT_USER_NAME, TOKEN_IDENTIFIER_PREFIX,
};
pub use errors::{UserError, WebhookError};
pub use identity_event::IdentityEvent;
pub use webhook_verifier::{WebhookHeaders, WebhookVerifier, SECRET_PREFIX};
