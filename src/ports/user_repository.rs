//! User repository port.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by provider subject. Soft-deleted users are returned too.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Insert or overwrite the user record.
    async fn upsert(&self, user: &User) -> Result<(), DomainError>;

    /// Hard delete. Missing ids are not an error.
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
