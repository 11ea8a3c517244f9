//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod form;
pub mod submission;
pub mod user;

pub use form::{
    CreateFormCommand, CreateFormHandler, DeleteFormCommand, DeleteFormHandler,
    FormPage, GenerateFormCommand, GenerateFormError, GenerateFormHandler, GetFormHandler,
    GetFormQuery, GetPublishedFormHandler, GetPublishedFormQuery, ListFormsHandler,
    ListFormsQuery, PublishFormCommand, PublishFormHandler, UnpublishFormCommand,
    UnpublishFormHandler, UpdateFormCommand, UpdateFormHandler,
};
pub use submission::{
    BulkDeleteSubmissionsCommand, BulkUpdateSubmissionStatusCommand, DeleteSubmissionCommand,
    DeleteSubmissionHandler, GetSubmissionStatsHandler, GetSubmissionStatsQuery,
    ListSubmissionsHandler, ListSubmissionsQuery, SubmissionView, SubmitFormCommand,
    SubmitFormHandler, UpdateSubmissionStatusCommand, UpdateSubmissionStatusHandler,
};
pub use user::{
    EnsureUserCommand, EnsureUserHandler, HandleIdentityWebhookCommand,
    HandleIdentityWebhookHandler, WebhookOutcome,
};
