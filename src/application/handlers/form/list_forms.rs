//! ListFormsHandler - Query handler for an owner's forms, one page at a time.

use std::sync::Arc;

use crate::domain::form::{FormError, FormSchema};
use crate::domain::foundation::{FormId, UserId};
use crate::ports::FormRepository;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Query for a page of the caller's forms, most recently updated first.
#[derive(Debug, Clone)]
pub struct ListFormsQuery {
    pub owner_id: UserId,
    /// Id of the last form on the previous page.
    pub cursor: Option<FormId>,
    pub limit: Option<usize>,
}

impl ListFormsQuery {
    pub fn first_page(owner_id: UserId) -> Self {
        Self {
            owner_id,
            cursor: None,
            limit: None,
        }
    }

    fn page_size(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// One page of forms.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPage {
    pub forms: Vec<FormSchema>,
    pub is_done: bool,
    /// Cursor for the next page; `None` once `is_done`.
    pub continue_cursor: Option<FormId>,
}

pub struct ListFormsHandler {
    repository: Arc<dyn FormRepository>,
}

impl ListFormsHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    /// An unknown cursor restarts from the first page.
    pub async fn handle(&self, query: ListFormsQuery) -> Result<FormPage, FormError> {
        let all = self.repository.find_by_owner(&query.owner_id).await?;
        let page_size = query.page_size();

        let start = query
            .cursor
            .and_then(|cursor| all.iter().position(|f| *f.id() == cursor))
            .map(|index| index + 1)
            .unwrap_or(0);
        let end = start.saturating_add(page_size);
        let is_done = end >= all.len();

        let forms: Vec<FormSchema> = all.into_iter().skip(start).take(page_size).collect();
        let continue_cursor = if is_done {
            None
        } else {
            forms.last().map(|f| *f.id())
        };

        Ok(FormPage {
            forms,
            is_done,
            continue_cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{draft, owner, stranger};
    use super::*;
    use crate::adapters::memory::InMemoryFormRepository;

    async fn repo_with(count: usize) -> Arc<InMemoryFormRepository> {
        let repo = Arc::new(InMemoryFormRepository::new());
        for i in 0..count {
            repo.save(&draft(&format!("Form {}", i))).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn default_page_holds_twelve() {
        let handler = ListFormsHandler::new(repo_with(15).await);

        let page = handler.handle(ListFormsQuery::first_page(owner())).await.unwrap();

        assert_eq!(page.forms.len(), DEFAULT_PAGE_SIZE);
        assert!(!page.is_done);
        assert_eq!(page.continue_cursor, Some(*page.forms[11].id()));
    }

    #[tokio::test]
    async fn cursor_continues_after_last_item() {
        let handler = ListFormsHandler::new(repo_with(15).await);
        let first = handler.handle(ListFormsQuery::first_page(owner())).await.unwrap();

        let second = handler
            .handle(ListFormsQuery {
                owner_id: owner(),
                cursor: first.continue_cursor,
                limit: None,
            })
            .await
            .unwrap();

        assert_eq!(second.forms.len(), 3);
        assert!(second.is_done);
        assert_eq!(second.continue_cursor, None);
        assert!(second
            .forms
            .iter()
            .all(|f| !first.forms.iter().any(|g| g.id() == f.id())));
    }

    #[tokio::test]
    async fn exact_fit_is_done() {
        let handler = ListFormsHandler::new(repo_with(4).await);

        let page = handler
            .handle(ListFormsQuery {
                owner_id: owner(),
                cursor: None,
                limit: Some(4),
            })
            .await
            .unwrap();

        assert!(page.is_done);
        assert_eq!(page.continue_cursor, None);
    }

    #[tokio::test]
    async fn unknown_cursor_restarts() {
        let handler = ListFormsHandler::new(repo_with(3).await);

        let page = handler
            .handle(ListFormsQuery {
                owner_id: owner(),
                cursor: Some(FormId::new()),
                limit: Some(2),
            })
            .await
            .unwrap();

        assert_eq!(page.forms.len(), 2);
        assert!(!page.is_done);
    }

    #[tokio::test]
    async fn other_owners_see_nothing() {
        let handler = ListFormsHandler::new(repo_with(3).await);

        let page = handler.handle(ListFormsQuery::first_page(stranger())).await.unwrap();

        assert!(page.forms.is_empty());
        assert!(page.is_done);
    }
}
