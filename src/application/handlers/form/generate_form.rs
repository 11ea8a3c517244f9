//! GenerateFormHandler - Drafts form content from a natural-language prompt.
//!
//! The result is returned to the builder for review; nothing is persisted.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::foundation::{ErrorCode, Timestamp};
use crate::domain::ingestion::{parse_generated_form, CoercedForm};
use crate::ports::{FormGenerator, UpstreamError};

#[derive(Debug, Clone)]
pub struct GenerateFormCommand {
    pub prompt: String,
}

/// Errors from form generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateFormError {
    #[error("Prompt is required")]
    EmptyPrompt,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl GenerateFormError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GenerateFormError::EmptyPrompt => ErrorCode::ValidationFailed,
            GenerateFormError::Upstream(_) => ErrorCode::UpstreamUnavailable,
        }
    }

    /// User-facing message. Provider internals are not echoed back.
    pub fn message(&self) -> String {
        match self {
            GenerateFormError::EmptyPrompt => "Prompt is required".to_string(),
            GenerateFormError::Upstream(UpstreamError::QuotaExceeded(_)) => {
                "Out of credits. Please check the provider account billing and credits."
                    .to_string()
            }
            GenerateFormError::Upstream(UpstreamError::Malformed(_)) => {
                "Failed to parse the generated form. Please try again.".to_string()
            }
            GenerateFormError::Upstream(_) => "Failed to generate form".to_string(),
        }
    }
}

pub struct GenerateFormHandler {
    generator: Arc<dyn FormGenerator>,
}

impl GenerateFormHandler {
    pub fn new(generator: Arc<dyn FormGenerator>) -> Self {
        Self { generator }
    }

    pub async fn handle(&self, cmd: GenerateFormCommand) -> Result<CoercedForm, GenerateFormError> {
        let prompt = cmd.prompt.trim();
        if prompt.is_empty() {
            return Err(GenerateFormError::EmptyPrompt);
        }

        let text = self.generator.generate(prompt).await?;

        let id_token = Timestamp::now().as_unix_millis().to_string();
        let form = parse_generated_form(&text, &id_token).map_err(|e| {
            warn!(provider = self.generator.provider_name(), error = %e, "Unusable generated form");
            UpstreamError::Malformed(e.to_string())
        })?;

        info!(
            provider = self.generator.provider_name(),
            elements = form.elements.len(),
            coercions = form.coercions.len(),
            "Form generated"
        );
        Ok(form)
    }
}
