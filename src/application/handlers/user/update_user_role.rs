//! UpdateUserRoleHandler - Admin-only role change.

use std::sync::Arc;
use tracing::info;

use super::require_admin;
use crate::domain::foundation::UserId;
use crate::domain::user::{UserError, UserRole};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct UpdateUserRoleCommand {
    pub caller: UserId,
    pub target: UserId,
    pub role: UserRole,
}

pub struct UpdateUserRoleHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateUserRoleHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// # Errors
    ///
    /// - `Forbidden` unless the caller is an active admin
    /// - `NotFound` if the target does not exist
    pub async fn handle(&self, cmd: UpdateUserRoleCommand) -> Result<(), UserError> {
        require_admin(self.users.as_ref(), &cmd.caller).await?;

        let mut target = self
            .users
            .find_by_id(&cmd.target)
            .await?
            .ok_or(UserError::NotFound)?;

        target.set_role(cmd.role);
        self.users.upsert(&target).await?;

        info!(user_id = %cmd.target, role = %cmd.role, by = %cmd.caller, "User role updated");
        Ok(())
    }
}
