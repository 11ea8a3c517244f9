//! Request and response bodies for form endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::form::FormPage;
use crate::domain::form::{FormElement, FormSchema, FormStatus, PublishSettings};
use crate::domain::foundation::{FormId, Timestamp};
use crate::domain::ingestion::{CoercedForm, Coercion};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub elements: Vec<FormElement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub elements: Vec<FormElement>,
}

/// Missing flags fall back to `PublishSettings::default()`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishFormRequest {
    pub allow_anonymous: Option<bool>,
    pub collect_emails: Option<bool>,
}

impl From<PublishFormRequest> for PublishSettings {
    fn from(req: PublishFormRequest) -> Self {
        let defaults = PublishSettings::default();
        PublishSettings {
            allow_anonymous: req.allow_anonymous.unwrap_or(defaults.allow_anonymous),
            collect_emails: req.collect_emails.unwrap_or(defaults.collect_emails),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFormsParams {
    pub cursor: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateFormRequest {
    #[serde(default)]
    pub prompt: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// Owner view of a form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: FormId,
    pub title: String,
    pub description: Option<String>,
    pub elements: Vec<FormElement>,
    pub status: FormStatus,
    pub published_at: Option<Timestamp>,
    pub share_url: Option<String>,
    pub embed_code: Option<String>,
    pub allow_anonymous: bool,
    pub collect_emails: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&FormSchema> for FormResponse {
    fn from(form: &FormSchema) -> Self {
        Self {
            id: *form.id(),
            title: form.title().to_string(),
            description: form.description().map(str::to_string),
            elements: form.elements().to_vec(),
            status: form.status(),
            published_at: form.published_at().copied(),
            share_url: form.share_url().map(str::to_string),
            embed_code: form.embed_code().map(str::to_string),
            allow_anonymous: form.allow_anonymous(),
            collect_emails: form.collect_emails(),
            created_at: *form.created_at(),
            updated_at: *form.updated_at(),
        }
    }
}

/// What a submitter sees. Owner and lifecycle details are left out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicFormResponse {
    pub id: FormId,
    pub title: String,
    pub description: Option<String>,
    pub elements: Vec<FormElement>,
    pub allow_anonymous: bool,
    pub collect_emails: bool,
}

impl From<&FormSchema> for PublicFormResponse {
    fn from(form: &FormSchema) -> Self {
        Self {
            id: *form.id(),
            title: form.title().to_string(),
            description: form.description().map(str::to_string),
            elements: form.elements().to_vec(),
            allow_anonymous: form.allow_anonymous(),
            collect_emails: form.collect_emails(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormListResponse {
    pub forms: Vec<FormResponse>,
    pub is_done: bool,
    pub continue_cursor: Option<FormId>,
}

impl From<FormPage> for FormListResponse {
    fn from(page: FormPage) -> Self {
        Self {
            forms: page.forms.iter().map(FormResponse::from).collect(),
            is_done: page.is_done,
            continue_cursor: page.continue_cursor,
        }
    }
}

/// A generated draft, not yet saved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFormResponse {
    pub title: String,
    pub description: String,
    pub elements: Vec<FormElement>,
    pub coercions: Vec<Coercion>,
}

impl From<CoercedForm> for GeneratedFormResponse {
    fn from(form: CoercedForm) -> Self {
        Self {
            title: form.title,
            description: form.description,
            elements: form.elements,
            coercions: form.coercions,
        }
    }
}
