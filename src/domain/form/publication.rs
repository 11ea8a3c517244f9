//! Publish-time settings and the derived share links.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::FormId;

/// Submission policy supplied when a form is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishSettings {
    pub allow_anonymous: bool,
    pub collect_emails: bool,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            allow_anonymous: true,
            collect_emails: false,
        }
    }
}

/// Convenience links for a published form. Not secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinks {
    pub share_url: String,
    pub embed_code: String,
}

impl ShareLinks {
    /// Derives the public URL and iframe snippet for a form.
    pub fn derive(base_url: &str, form_id: &FormId) -> Self {
        let share_url = format!("{}/forms/{}", base_url.trim_end_matches('/'), form_id);
        let embed_code = format!(
            r#"<iframe src="{}?embed=true" width="100%" height="600" frameborder="0"></iframe>"#,
            share_url
        );
        Self {
            share_url,
            embed_code,
        }
    }
}
