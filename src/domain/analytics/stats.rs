use serde::Serialize;
use std::collections::HashMap;

use crate::domain::form::{FormSchema, FormStatus};
use crate::domain::foundation::FormId;
use crate::domain::submission::{Submission, SubmissionStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub new: usize,
    pub reviewed: usize,
    pub archived: usize,
}

impl StatusCounts {
    fn record(&mut self, status: SubmissionStatus) {
        match status {
            SubmissionStatus::New => self.new += 1,
            SubmissionStatus::Reviewed => self.reviewed += 1,
            SubmissionStatus::Archived => self.archived += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmissionCount {
    pub form_id: FormId,
    pub title: String,
    pub submissions: usize,
}

/// Totals across all forms owned by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStats {
    pub total_forms: usize,
    pub published_forms: usize,
    pub total_submissions: usize,
    pub by_status: StatusCounts,
    /// Sorted by submission count, highest first. Ties keep form order.
    pub per_form: Vec<FormSubmissionCount>,
}

impl SubmissionStats {
    /// Computes stats for `forms`. Submissions for other forms are ignored.
    pub fn compute(forms: &[FormSchema], submissions: &[Submission]) -> Self {
        let mut per_form_counts: HashMap<FormId, usize> =
            forms.iter().map(|f| (*f.id(), 0)).collect();
        let mut by_status = StatusCounts::default();
        let mut total_submissions = 0;

        for submission in submissions {
            if let Some(count) = per_form_counts.get_mut(submission.form_id()) {
                *count += 1;
                total_submissions += 1;
                by_status.record(submission.status());
            }
        }

        let mut per_form: Vec<FormSubmissionCount> = forms
            .iter()
            .map(|f| FormSubmissionCount {
                form_id: *f.id(),
                title: f.title().to_string(),
                submissions: per_form_counts.get(f.id()).copied().unwrap_or(0),
            })
            .collect();
        per_form.sort_by(|a, b| b.submissions.cmp(&a.submissions));

        Self {
            total_forms: forms.len(),
            published_forms: forms
                .iter()
                .filter(|f| f.status() == FormStatus::Published)
                .count(),
            total_submissions,
            by_status,
            per_form,
        }
    }
}
