//! Form repository port.
//!
//! Defines the contract for persisting and retrieving FormSchema aggregates.
//! Writes are single-record and last-write-wins; no versioning is applied.

use crate::domain::form::FormSchema;
use crate::domain::foundation::{DomainError, FormId, UserId};
use async_trait::async_trait;

/// Repository port for FormSchema persistence.
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Save a new form.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, form: &FormSchema) -> Result<(), DomainError>;

    /// Overwrite an existing form.
    ///
    /// # Errors
    ///
    /// - `FormNotFound` if the form doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, form: &FormSchema) -> Result<(), DomainError>;

    /// Find a form by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &FormId) -> Result<Option<FormSchema>, DomainError>;

    /// Find all forms owned by a user, ordered by `updated_at` descending.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<FormSchema>, DomainError>;

    /// Hard delete a form. Its submissions are left in place.
    ///
    /// # Errors
    ///
    /// - `FormNotFound` if the form doesn't exist
    async fn delete(&self, id: &FormId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn FormRepository) {}
    }
}
