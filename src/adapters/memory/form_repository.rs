use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::form::FormSchema;
use crate::domain::foundation::{DomainError, ErrorCode, FormId, OwnedByUser, UserId};
use crate::ports::FormRepository;

/// Form store keyed by id.
#[derive(Default)]
pub struct InMemoryFormRepository {
    forms: RwLock<HashMap<FormId, FormSchema>>,
}

impl InMemoryFormRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored forms.
    pub async fn len(&self) -> usize {
        self.forms.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.forms.read().await.is_empty()
    }
}

#[async_trait]
impl FormRepository for InMemoryFormRepository {
    async fn save(&self, form: &FormSchema) -> Result<(), DomainError> {
        self.forms.write().await.insert(*form.id(), form.clone());
        Ok(())
    }

    async fn update(&self, form: &FormSchema) -> Result<(), DomainError> {
        let mut forms = self.forms.write().await;
        match forms.get_mut(form.id()) {
            Some(existing) => {
                *existing = form.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::FormNotFound,
                format!("Form not found: {}", form.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &FormId) -> Result<Option<FormSchema>, DomainError> {
        Ok(self.forms.read().await.get(id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<FormSchema>, DomainError> {
        let mut forms: Vec<FormSchema> = self
            .forms
            .read()
            .await
            .values()
            .filter(|f| f.is_owner(owner_id))
            .cloned()
            .collect();
        forms.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(forms)
    }

    async fn delete(&self, id: &FormId) -> Result<(), DomainError> {
        match self.forms.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::FormNotFound,
                format!("Form not found: {}", id),
            )),
        }
    }
}
