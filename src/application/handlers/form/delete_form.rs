//! DeleteFormHandler - Command handler for hard-deleting a form.

use std::sync::Arc;
use tracing::info;

use crate::domain::form::FormError;
use crate::domain::foundation::{FormId, OwnedByUser, UserId};
use crate::ports::FormRepository;

#[derive(Debug, Clone)]
pub struct DeleteFormCommand {
    pub form_id: FormId,
    pub caller: UserId,
}

/// Handler for deleting forms. Submissions of the form are kept.
pub struct DeleteFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl DeleteFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteFormCommand) -> Result<(), FormError> {
        let form = self
            .repository
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or(FormError::NotFound(cmd.form_id))?;

        form.check_ownership(&cmd.caller)?;

        self.repository.delete(form.id()).await?;

        info!(form_id = %cmd.form_id, "Form deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{draft, owner, stranger};
    use super::*;
    use crate::adapters::memory::InMemoryFormRepository;

    #[tokio::test]
    async fn owner_deletes_form() {
        let form = draft("Bye");
        let repo = Arc::new(InMemoryFormRepository::new());
        repo.save(&form).await.unwrap();
        let handler = DeleteFormHandler::new(repo.clone());

        handler
            .handle(DeleteFormCommand {
                form_id: *form.id(),
                caller: owner(),
            })
            .await
            .unwrap();

        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn stranger_cannot_delete() {
        let form = draft("Keep");
        let repo = Arc::new(InMemoryFormRepository::new());
        repo.save(&form).await.unwrap();
        let handler = DeleteFormHandler::new(repo.clone());

        let result = handler
            .handle(DeleteFormCommand {
                form_id: *form.id(),
                caller: stranger(),
            })
            .await;

        assert_eq!(result.unwrap_err(), FormError::Forbidden);
        assert_eq!(repo.len().await, 1);
    }
}
