//! Single-owner access checks.
//!
//! Forms carry an owner. Submissions have none of their own and are checked
//! against the form they were recorded for.

use super::{DomainError, ErrorCode, UserId};

pub trait OwnedByUser {
    fn owner_id(&self) -> &UserId;

    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// `Forbidden` with a fixed message for anyone but the owner. Nothing
    /// about the resource is attached.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if !self.is_owner(user_id) {
            return Err(DomainError::new(ErrorCode::Forbidden, "Not authorized"));
        }
        Ok(())
    }
}
