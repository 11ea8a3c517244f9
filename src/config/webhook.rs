//! Identity webhook configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::user::{WebhookVerifier, SECRET_PREFIX};

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// `whsec_`-prefixed base64 signing secret shared with the identity provider
    pub signing_secret: Secret<String>,
}

impl WebhookConfig {
    /// # Errors
    ///
    /// - `InvalidWebhookSecret` if the secret is not valid base64 after its prefix
    pub fn verifier(&self) -> Result<WebhookVerifier, ValidationError> {
        WebhookVerifier::new(self.signing_secret.expose_secret())
            .map_err(|_| ValidationError::InvalidWebhookSecret)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.signing_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("WEBHOOK__SIGNING_SECRET"));
        }
        if !secret.starts_with(SECRET_PREFIX) {
            return Err(ValidationError::InvalidWebhookSecret);
        }
        self.verifier().map(|_| ())
    }
}
