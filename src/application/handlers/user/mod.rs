//! User command handlers.

mod delete_user;
mod ensure_user;
mod handle_identity_webhook;
mod update_user_role;

pub use delete_user::{DeleteUserCommand, DeleteUserHandler};
pub use ensure_user::{EnsureUserCommand, EnsureUserHandler};
pub use handle_identity_webhook::{
    HandleIdentityWebhookCommand, HandleIdentityWebhookHandler, WebhookOutcome,
};
pub use update_user_role::{UpdateUserRoleCommand, UpdateUserRoleHandler};

use crate::domain::foundation::UserId;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Loads the caller's record and rejects anyone who is not an active admin.
async fn require_admin(users: &dyn UserRepository, caller: &UserId) -> Result<User, UserError> {
    match users.find_by_id(caller).await? {
        Some(user) if user.is_admin() => Ok(user),
        _ => Err(UserError::Forbidden),
    }
}
