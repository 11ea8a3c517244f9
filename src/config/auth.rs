//! Authentication configuration (OIDC session tokens)

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::auth::OidcConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Token issuer; JWKS is discovered beneath it
    pub issuer_url: String,

    /// Expected `aud` claim, if the provider sets one
    pub audience: Option<String>,

    /// Overrides the discovered JWKS location
    pub jwks_url: Option<String>,

    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,
}

impl AuthConfig {
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    pub fn oidc_config(&self) -> OidcConfig {
        let mut config =
            OidcConfig::new(&self.issuer_url).with_cache_duration(self.jwks_cache_ttl());
        if let Some(audience) = self.audience.as_deref().filter(|a| !a.is_empty()) {
            config = config.with_audience(audience);
        }
        if let Some(url) = self.jwks_url.as_deref().filter(|u| !u.is_empty()) {
            config = config.with_jwks_url(url);
        }
        config
    }

    /// In production the issuer must be HTTPS.
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if self.issuer_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER_URL"));
        }
        if environment == Environment::Production && !self.issuer_url.starts_with("https://") {
            return Err(ValidationError::IssuerMustBeHttps);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer_url: String::new(),
            audience: None,
            jwks_url: None,
            jwks_cache_ttl_secs: default_jwks_cache_ttl(),
        }
    }
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}
