//! GetSubmissionStatsHandler - Totals for the caller's dashboard.

use std::sync::Arc;

use crate::domain::analytics::SubmissionStats;
use crate::domain::foundation::{FormId, UserId};
use crate::domain::submission::SubmissionError;
use crate::ports::{FormRepository, SubmissionRepository};

#[derive(Debug, Clone)]
pub struct GetSubmissionStatsQuery {
    pub owner_id: UserId,
}

pub struct GetSubmissionStatsHandler {
    forms: Arc<dyn FormRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl GetSubmissionStatsHandler {
    pub fn new(forms: Arc<dyn FormRepository>, submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { forms, submissions }
    }

    pub async fn handle(
        &self,
        query: GetSubmissionStatsQuery,
    ) -> Result<SubmissionStats, SubmissionError> {
        let forms = self.forms.find_by_owner(&query.owner_id).await?;
        if forms.is_empty() {
            return Ok(SubmissionStats::default());
        }

        let form_ids: Vec<FormId> = forms.iter().map(|f| *f.id()).collect();
        let submissions = self.submissions.find_by_forms(&form_ids).await?;

        Ok(SubmissionStats::compute(&forms, &submissions))
    }
}
