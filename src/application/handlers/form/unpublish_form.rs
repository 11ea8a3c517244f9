//! UnpublishFormHandler - Command handler for taking a form offline.

use std::sync::Arc;
use tracing::info;

use crate::domain::form::{FormError, FormSchema};
use crate::domain::foundation::{FormId, UserId};
use crate::ports::FormRepository;

#[derive(Debug, Clone)]
pub struct UnpublishFormCommand {
    pub form_id: FormId,
    pub caller: UserId,
}

pub struct UnpublishFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl UnpublishFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UnpublishFormCommand) -> Result<FormSchema, FormError> {
        let mut form = self
            .repository
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or(FormError::NotFound(cmd.form_id))?;

        form.unpublish(&cmd.caller)?;

        self.repository.update(&form).await?;

        info!(form_id = %form.id(), "Form unpublished");
        Ok(form)
    }
}
