//! UpdateFormHandler - Command handler for editing form content.

use std::sync::Arc;
use tracing::info;

use crate::domain::form::{FormElement, FormError, FormSchema};
use crate::domain::foundation::{FormId, UserId};
use crate::ports::FormRepository;

/// Command to replace a form's title, description and elements.
#[derive(Debug, Clone)]
pub struct UpdateFormCommand {
    pub form_id: FormId,
    pub caller: UserId,
    pub title: String,
    pub description: Option<String>,
    pub elements: Vec<FormElement>,
}

/// Handler for editing forms. Status is never touched here.
pub struct UpdateFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl UpdateFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateFormCommand) -> Result<FormSchema, FormError> {
        let mut form = self
            .repository
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or(FormError::NotFound(cmd.form_id))?;

        form.update_content(&cmd.caller, cmd.title, cmd.description, cmd.elements)?;

        self.repository.update(&form).await?;

        info!(form_id = %form.id(), status = %form.status(), "Form updated");
        Ok(form)
    }
}
