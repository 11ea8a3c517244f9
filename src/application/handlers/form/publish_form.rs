//! PublishFormHandler - Command handler for making a form public.

use std::sync::Arc;
use tracing::info;

use crate::domain::form::{FormError, FormSchema, PublishSettings, ShareLinks};
use crate::domain::foundation::{FormId, Timestamp, UserId};
use crate::ports::FormRepository;

/// Command to publish (or republish) a form.
#[derive(Debug, Clone)]
pub struct PublishFormCommand {
    pub form_id: FormId,
    pub caller: UserId,
    pub settings: PublishSettings,
}

/// Handler for publishing forms.
///
/// Share links are derived from the configured public base URL, never
/// taken from the client.
pub struct PublishFormHandler {
    repository: Arc<dyn FormRepository>,
    public_base_url: String,
}

impl PublishFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>, public_base_url: impl Into<String>) -> Self {
        Self {
            repository,
            public_base_url: public_base_url.into(),
        }
    }

    pub async fn handle(&self, cmd: PublishFormCommand) -> Result<FormSchema, FormError> {
        let mut form = self
            .repository
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or(FormError::NotFound(cmd.form_id))?;

        let links = ShareLinks::derive(&self.public_base_url, form.id());
        form.publish(&cmd.caller, cmd.settings, links, Timestamp::now())?;

        self.repository.update(&form).await?;

        info!(
            form_id = %form.id(),
            allow_anonymous = form.allow_anonymous(),
            collect_emails = form.collect_emails(),
            "Form published"
        );
        Ok(form)
    }
}
