//! SubmitFormHandler - Records a submission against a published form.
//!
//! This is the public, high-volume path. Every request is an independent
//! insert; nothing here reads or locks other submissions.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::foundation::{AuthenticatedUser, FormId};
use crate::domain::submission::{Submission, SubmissionError, SubmissionInput};
use crate::ports::{FormRepository, SubmissionRepository};

/// Command to submit answers to a form.
#[derive(Debug, Clone)]
pub struct SubmitFormCommand {
    pub form_id: FormId,
    pub input: SubmissionInput,
    /// `None` for anonymous submitters.
    pub caller: Option<AuthenticatedUser>,
}

pub struct SubmitFormHandler {
    forms: Arc<dyn FormRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl SubmitFormHandler {
    pub fn new(forms: Arc<dyn FormRepository>, submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { forms, submissions }
    }

    /// # Errors
    ///
    /// - `FormNotFound` if the form is missing or not published
    /// - `Unauthorized` if the form requires sign-in and the caller is anonymous
    /// - `Invalid` with every failing field when validation fails
    pub async fn handle(&self, cmd: SubmitFormCommand) -> Result<Submission, SubmissionError> {
        let form = self
            .forms
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or(SubmissionError::FormNotFound)?;

        let submission =
            Submission::accept(&form, cmd.input, cmd.caller.as_ref()).map_err(|rejection| {
                debug!(form_id = %cmd.form_id, reason = %rejection, "Submission rejected");
                SubmissionError::from(rejection)
            })?;

        self.submissions.save(&submission).await?;

        info!(
            form_id = %submission.form_id(),
            submission_id = %submission.id(),
            anonymous = submission.submitted_by().is_none(),
            "Submission recorded"
        );
        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{owner, Fixture};
    use super::*;
    use crate::domain::form::{
        ElementType, ElementValidation, FormElement, FormSchema, PublishSettings, ShareLinks,
    };
    use crate::domain::foundation::{ElementId, Timestamp, UserId};
    use crate::domain::submission::{ClientInfo, SubmissionStatus};
    use crate::domain::validation::{FieldValue, SubmissionData, EMAIL_KEY};
    use crate::ports::FormRepository as _;

    fn signed_in() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user_submitter").unwrap(), None, None)
    }

    fn input(pairs: &[(&str, FieldValue)]) -> SubmissionInput {
        SubmissionInput {
            data: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<SubmissionData>(),
            submitter_email: None,
            submitter_name: Some("  Ada  ".to_string()),
            client: ClientInfo {
                ip_address: Some("203.0.113.7".to_string()),
                user_agent: Some("test-agent".to_string()),
            },
        }
    }

    /// Publishes a two-field form with the given policy.
    async fn strict_form(fixture: &Fixture, settings: PublishSettings) -> FormSchema {
        let mut form = FormSchema::new(
            FormId::new(),
            owner(),
            "Signup".to_string(),
            None,
            vec![
                FormElement::new(ElementId::new("name").unwrap(), ElementType::Text, "Name")
                    .required(),
                FormElement::new(ElementId::new("code").unwrap(), ElementType::Text, "Code")
                    .with_validation(ElementValidation {
                        min_length: None,
                        max_length: None,
                        pattern: Some("^[A-Z]{3}$".to_string()),
                    }),
            ],
        )
        .unwrap();
        let links = ShareLinks::derive("https://forms.test", form.id());
        form.publish(&owner(), settings, links, Timestamp::now())
            .unwrap();
        fixture.forms.save(&form).await.unwrap();
        form
    }

    fn handler(fixture: &Fixture) -> SubmitFormHandler {
        SubmitFormHandler::new(fixture.forms.clone(), fixture.submissions.clone())
    }

    #[tokio::test]
    async fn anonymous_submission_is_recorded_as_new() {
        let fixture = Fixture::new().await;

        let submission = handler(&fixture)
            .handle(SubmitFormCommand {
                form_id: *fixture.form.id(),
                input: input(&[("q1", FieldValue::from("hello"))]),
                caller: None,
            })
            .await
            .unwrap();

        assert_eq!(submission.status(), SubmissionStatus::New);
        assert_eq!(submission.submitted_by(), None);
        assert_eq!(submission.submitter_name(), Some("Ada"));
        assert_eq!(submission.client().user_agent.as_deref(), Some("test-agent"));
        assert_eq!(fixture.submissions.len().await, 1);
    }

    #[tokio::test]
    async fn signed_in_submitter_is_attributed() {
        let fixture = Fixture::new().await;

        let submission = handler(&fixture)
            .handle(SubmitFormCommand {
                form_id: *fixture.form.id(),
                input: input(&[]),
                caller: Some(signed_in()),
            })
            .await
            .unwrap();

        assert_eq!(submission.submitted_by().map(UserId::as_str), Some("user_submitter"));
    }

    #[tokio::test]
    async fn unknown_form_is_not_found() {
        let fixture = Fixture::new().await;

        let result = handler(&fixture)
            .handle(SubmitFormCommand {
                form_id: FormId::new(),
                input: input(&[]),
                caller: None,
            })
            .await;

        assert_eq!(result.unwrap_err(), SubmissionError::FormNotFound);
    }

    #[tokio::test]
    async fn draft_form_is_indistinguishable_from_missing() {
        let fixture = Fixture::new().await;
        let draft = crate::application::handlers::form::test_support::draft("Draft");
        fixture.forms.save(&draft).await.unwrap();

        let result = handler(&fixture)
            .handle(SubmitFormCommand {
                form_id: *draft.id(),
                input: input(&[]),
                caller: None,
            })
            .await;

        assert_eq!(result.unwrap_err(), SubmissionError::FormNotFound);
        assert!(fixture.submissions.is_empty().await);
    }

    #[tokio::test]
    async fn sign_in_required_rejects_anonymous() {
        let fixture = Fixture::new().await;
        let form = strict_form(
            &fixture,
            PublishSettings {
                allow_anonymous: false,
                collect_emails: false,
            },
        )
        .await;

        let result = handler(&fixture)
            .handle(SubmitFormCommand {
                form_id: *form.id(),
                input: input(&[("name", FieldValue::from("Ada"))]),
                caller: None,
            })
            .await;

        assert_eq!(result.unwrap_err(), SubmissionError::Unauthorized);
    }

    #[tokio::test]
    async fn all_field_errors_are_reported_together() {
        let fixture = Fixture::new().await;
        let form = strict_form(
            &fixture,
            PublishSettings {
                allow_anonymous: true,
                collect_emails: true,
            },
        )
        .await;

        let result = handler(&fixture)
            .handle(SubmitFormCommand {
                form_id: *form.id(),
                input: input(&[("code", FieldValue::from("abc"))]),
                caller: None,
            })
            .await;

        match result {
            Err(SubmissionError::Invalid(errors)) => {
                let keys: Vec<_> = errors.keys().collect();
                assert_eq!(keys, vec!["name", "code", EMAIL_KEY]);
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert!(fixture.submissions.is_empty().await);
    }
}
