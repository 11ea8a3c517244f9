//! Form sharing configuration

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct FormsConfig {
    /// Origin that public share links and embed snippets point at
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl FormsConfig {
    /// Base URL without a trailing slash.
    pub fn public_base_url(&self) -> &str {
        self.public_base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.public_base_url();
        let has_host = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ValidationError::InvalidPublicBaseUrl);
        }
        Ok(())
    }
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_public_base_url() -> String {
    "http://localhost:5173".to_string()
}
