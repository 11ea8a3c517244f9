//! Mock form generator for testing and local development.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{FormGenerator, UpstreamError};

/// Canned reply used when no responses are queued.
const DEFAULT_REPLY: &str = r#"{"title":"Contact Us","description":"Get in touch","fields":[{"label":"Name","type":"text","required":true},{"label":"Email","type":"email","required":true},{"label":"Message","type":"textarea","required":false}]}"#;

/// Replays queued responses in order, then the default reply.
#[derive(Debug, Clone, Default)]
pub struct MockFormGenerator {
    responses: Arc<Mutex<VecDeque<Result<String, UpstreamError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockFormGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator whose first call returns `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new().with_response(Ok(text.into()))
    }

    /// A generator whose first call fails with `err`.
    pub fn failing(err: UpstreamError) -> Self {
        Self::new().with_response(Err(err))
    }

    pub fn with_response(self, response: Result<String, UpstreamError>) -> Self {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
        self
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl FormGenerator for MockFormGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| Ok(DEFAULT_REPLY.to_string()))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
