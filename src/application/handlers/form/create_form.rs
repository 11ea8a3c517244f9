//! CreateFormHandler - Command handler for creating draft forms.

use std::sync::Arc;
use tracing::info;

use crate::domain::form::{FormElement, FormError, FormSchema};
use crate::domain::foundation::{FormId, UserId};
use crate::ports::FormRepository;

/// Command to create a new draft form.
#[derive(Debug, Clone)]
pub struct CreateFormCommand {
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub elements: Vec<FormElement>,
}

/// Handler for creating forms.
pub struct CreateFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl CreateFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateFormCommand) -> Result<FormSchema, FormError> {
        let form = FormSchema::new(
            FormId::new(),
            cmd.owner_id,
            cmd.title,
            cmd.description,
            cmd.elements,
        )?;

        self.repository.save(&form).await?;

        info!(form_id = %form.id(), elements = form.elements().len(), "Form created");
        Ok(form)
    }
}
