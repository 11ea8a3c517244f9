//! GetPublishedFormHandler - Public query for a live form.

use std::sync::Arc;

use crate::domain::form::{FormError, FormSchema};
use crate::domain::foundation::FormId;
use crate::ports::FormRepository;

#[derive(Debug, Clone)]
pub struct GetPublishedFormQuery {
    pub form_id: FormId,
}

/// Returns a form only while it is published.
///
/// Missing, draft and unpublished forms all answer `NotFound`.
pub struct GetPublishedFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl GetPublishedFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetPublishedFormQuery) -> Result<FormSchema, FormError> {
        self.repository
            .find_by_id(&query.form_id)
            .await?
            .filter(FormSchema::accepts_submissions)
            .ok_or(FormError::NotFound(query.form_id))
    }
}
