//! DeleteUserHandler - Admin-only hard delete of a user record.
//!
//! Separate from the webhook's soft delete: this removes the row.

use std::sync::Arc;
use tracing::info;

use super::require_admin;
use crate::domain::foundation::UserId;
use crate::domain::user::UserError;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub caller: UserId,
    pub target: UserId,
}

pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// # Errors
    ///
    /// - `Forbidden` unless the caller is an active admin
    /// - `NotFound` if the target does not exist
    /// - `CannotDeleteSelf` if the target is the caller
    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), UserError> {
        let caller = require_admin(self.users.as_ref(), &cmd.caller).await?;

        let target = self
            .users
            .find_by_id(&cmd.target)
            .await?
            .ok_or(UserError::NotFound)?;

        if target.id() == caller.id() {
            return Err(UserError::CannotDeleteSelf);
        }

        self.users.delete(target.id()).await?;

        info!(user_id = %cmd.target, by = %cmd.caller, "User deleted");
        Ok(())
    }
}
