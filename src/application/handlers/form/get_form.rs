//! GetFormHandler - Query handler for an owner's form.

use std::sync::Arc;

use crate::domain::form::{FormError, FormSchema};
use crate::domain::foundation::{FormId, OwnedByUser, UserId};
use crate::ports::FormRepository;

#[derive(Debug, Clone)]
pub struct GetFormQuery {
    pub form_id: FormId,
    pub caller: UserId,
}

/// Returns the full form to its owner. Other callers get `NotFound`.
pub struct GetFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl GetFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetFormQuery) -> Result<FormSchema, FormError> {
        self.repository
            .find_by_id(&query.form_id)
            .await?
            .filter(|form| form.is_owner(&query.caller))
            .ok_or(FormError::NotFound(query.form_id))
    }
}
