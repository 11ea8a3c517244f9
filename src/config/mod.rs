//! Application configuration module
//!
//! Configuration is loaded from environment variables with the `FORMCRAFT`
//! prefix, using `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use formcraft::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod forms;
mod server;
mod webhook;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use forms::FormsConfig;
pub use server::{Environment, ServerConfig};
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; absent means in-memory storage
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session token validation (OIDC)
    pub auth: AuthConfig,

    /// Form generation (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Identity webhook signing
    pub webhook: WebhookConfig,

    #[serde(default)]
    pub forms: FormsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` if present, then `FORMCRAFT__*` variables:
    ///
    /// - `FORMCRAFT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FORMCRAFT__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FORMCRAFT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = self.server.environment;
        self.server.validate()?;
        self.database.validate(environment)?;
        self.auth.validate(environment)?;
        self.ai.validate(environment)?;
        self.webhook.validate()?;
        self.forms.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
