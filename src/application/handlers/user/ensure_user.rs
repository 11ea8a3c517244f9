//! EnsureUserHandler - Get-or-create the user record for a validated token.
//!
//! Runs in front of every authenticated route so that a user who signs in
//! before the identity webhook arrives still gets a record.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct EnsureUserCommand {
    pub identity: AuthenticatedUser,
}

pub struct EnsureUserHandler {
    users: Arc<dyn UserRepository>,
}

impl EnsureUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Returns the existing record unchanged, or creates one from the token.
    pub async fn handle(&self, cmd: EnsureUserCommand) -> Result<User, UserError> {
        if let Some(existing) = self.users.find_by_id(&cmd.identity.id).await? {
            if existing.is_deleted() {
                warn!(user_id = %existing.id(), "Authenticated request from deleted user");
            }
            return Ok(existing);
        }

        let user = User::from_identity(&cmd.identity);
        self.users.upsert(&user).await?;

        info!(user_id = %user.id(), "User created on first sign-in");
        Ok(user)
    }
}
