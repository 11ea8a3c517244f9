//! OpenAI form generator - drafts forms with the chat completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let generator = OpenAIFormGenerator::new(config)?;
//! ```
//!
//! The provider is asked for a JSON object, but whatever text comes back is
//! handed to the ingestion boundary untouched.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::ports::{FormGenerator, UpstreamError};

const SYSTEM_PROMPT: &str = r#"You are a form generation assistant. Generate a JSON object for a form based on the user's description.

Available field types:
- "text": Single-line text input
- "email": Email input with validation
- "textarea": Multi-line text input
- "select": Dropdown selection
- "radio": Radio button group
- "checkbox": Checkbox input
- "number": Numeric input

Rules:
1. Return only valid JSON, with no markdown and no explanation
2. Each field must have "label", "type" and "required" (boolean)
3. Optional field keys: "placeholder", and "options" for select/radio
4. Select and radio fields must include an "options" array with at least 2 options
5. Set "required" to true for important fields such as email

Format:
{"title": "Form Title", "description": "Form description", "fields": [{"label": "Full Name", "type": "text", "required": true, "placeholder": "Enter your full name"}]}"#;

/// Configuration for the OpenAI generator.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
    /// Retries on rate limits, timeouts and server errors.
    pub max_retries: u32,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
            temperature: 0.7,
            max_retries: 2,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// `FormGenerator` backed by OpenAI chat completions.
pub struct OpenAIFormGenerator {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIFormGenerator {
    /// # Errors
    ///
    /// - `Unavailable` if the HTTP client cannot be built
    pub fn new(config: OpenAIConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| UpstreamError::Unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: format!("{}\n\nUser's form description: {}", SYSTEM_PROMPT, prompt),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.config.temperature,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        }
    }

    async fn send(&self, prompt: &str) -> Result<String, UpstreamError> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    UpstreamError::Unavailable(format!("Connection failed: {}", e))
                } else {
                    UpstreamError::Unavailable(e.to_string())
                }
            })?;

        let response = Self::check_status(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(format!("Failed to parse response: {}", e)))?;

        first_choice_content(body)
    }

    async fn check_status(response: Response) -> Result<Response, UpstreamError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status.as_u16(), &body))
    }
}

/// Maps a failed response onto an upstream error.
///
/// Quota and billing problems are reported separately from plain rate
/// limiting, since waiting does not fix them.
fn classify_failure(status: u16, body: &str) -> UpstreamError {
    let lowered = body.to_lowercase();
    let is_quota = ["insufficient_quota", "quota", "billing", "credit"]
        .iter()
        .any(|marker| lowered.contains(marker));

    match status {
        401 | 403 => UpstreamError::AuthenticationFailed,
        402 => UpstreamError::QuotaExceeded(body.to_string()),
        429 if is_quota => UpstreamError::QuotaExceeded(body.to_string()),
        429 => UpstreamError::RateLimited {
            retry_after_secs: parse_retry_after(body),
        },
        500..=599 => UpstreamError::Unavailable(format!("Server error {}: {}", status, body)),
        _ if is_quota => UpstreamError::QuotaExceeded(body.to_string()),
        _ => UpstreamError::Unavailable(format!("Unexpected status {}: {}", status, body)),
    }
}

/// Reads "try again in Ns" from an error body. Defaults to 30 seconds.
fn parse_retry_after(body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message")?.as_str().map(str::to_string))
        .and_then(|msg| {
            let rest = &msg[msg.find("try again in ")? + "try again in ".len()..];
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        })
        .unwrap_or(30)
}

fn first_choice_content(body: ChatResponse) -> Result<String, UpstreamError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| UpstreamError::Malformed("No content in response".to_string()))
}

#[async_trait]
impl FormGenerator for OpenAIFormGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let mut attempt = 0;
        loop {
            match self.send(prompt).await {
                Ok(text) => {
                    debug!(model = %self.config.model, chars = text.len(), "Completion received");
                    return Ok(text);
                }
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    warn!(attempt, error = %err, "Retrying form generation");
                    // Exponential backoff: 1s, 2s, 4s, ...
                    sleep(Duration::from_secs(1 << attempt)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
