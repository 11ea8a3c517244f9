//! Form generator adapters.
//!
//! - `OpenAIFormGenerator` - OpenAI chat completions
//! - `MockFormGenerator` - Configurable mock for tests and local development

mod mock_generator;
mod openai_generator;

pub use mock_generator::MockFormGenerator;
pub use openai_generator::{OpenAIConfig, OpenAIFormGenerator};
