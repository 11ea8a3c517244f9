//! `SessionValidator` backed by the identity provider's published keys.
//!
//! Session tokens are RS256 JWTs. Signature, `iss`, `exp` and (when
//! configured) `aud` are checked by `jsonwebtoken` against a [`Validation`]
//! built once from [`OidcConfig`]. Keys come from the JWKS document and are
//! cached for `jwks_cache_duration`; an unknown `kid` forces one refetch so
//! key rotation does not lock users out until the cache expires.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::{Jwk, JwkSet, KeyAlgorithm};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

const DEFAULT_JWKS_CACHE: Duration = Duration::from_secs(3600);
const JWKS_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OidcConfig {
    /// Expected `iss`. JWKS is discovered under it unless `jwks_url` is set.
    pub issuer_url: String,

    /// Expected `aud`. Provider session tokens usually carry none, so the
    /// check only runs when this is set.
    pub audience: Option<String>,

    pub jwks_url: Option<String>,

    pub jwks_cache_duration: Duration,
}

impl OidcConfig {
    pub fn new(issuer_url: impl Into<String>) -> Self {
        Self {
            issuer_url: issuer_url.into(),
            audience: None,
            jwks_url: None,
            jwks_cache_duration: DEFAULT_JWKS_CACHE,
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = Some(url.into());
        self
    }

    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.jwks_cache_duration = duration;
        self
    }

    fn jwks_url(&self) -> String {
        match &self.jwks_url {
            Some(url) => url.clone(),
            None => format!(
                "{}/.well-known/jwks.json",
                self.issuer_url.trim_end_matches('/')
            ),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer_url]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        validation
    }
}

/// The claims formcraft reads. Everything else in the token is ignored.
#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl SessionClaims {
    fn into_user(self) -> Result<AuthenticatedUser, AuthError> {
        let id = UserId::new(self.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(id, self.email, self.name))
    }
}

struct CachedKeys {
    keys: JwkSet,
    expires_at: Instant,
}

impl CachedKeys {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

pub struct OidcSessionValidator {
    config: OidcConfig,
    validation: Validation,
    http_client: reqwest::Client,
    keys: RwLock<Option<CachedKeys>>,
}

impl OidcSessionValidator {
    /// Keys are fetched on first use, so this does not contact the provider.
    pub fn new(config: OidcConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(JWKS_FETCH_TIMEOUT)
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            validation: config.validation(),
            config,
            http_client,
            keys: RwLock::new(None),
        })
    }

    async fn refresh_keys(&self) -> Result<JwkSet, AuthError> {
        let url = self.config.jwks_url();
        let unavailable = |e: reqwest::Error| {
            tracing::error!(url = %url, error = %e, "JWKS fetch failed");
            AuthError::service_unavailable("Identity provider keys unavailable")
        };

        let keys: JwkSet = self
            .http_client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;

        tracing::debug!(keys = keys.keys.len(), "JWKS refreshed");
        *self.keys.write().await = Some(CachedKeys {
            keys: keys.clone(),
            expires_at: Instant::now() + self.config.jwks_cache_duration,
        });
        Ok(keys)
    }

    /// Looks `kid` up in the cached set, refetching once if it is stale or
    /// does not know the key.
    async fn key_for(&self, kid: &str) -> Result<Jwk, AuthError> {
        if let Some(cached) = self.keys.read().await.as_ref() {
            if cached.is_fresh() {
                if let Some(jwk) = cached.keys.find(kid) {
                    return Ok(jwk.clone());
                }
            }
        }

        self.refresh_keys().await?.find(kid).cloned().ok_or_else(|| {
            tracing::warn!(kid = %kid, "Token signed with unknown key");
            AuthError::InvalidToken
        })
    }
}

fn decoding_key(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    if !matches!(jwk.common.key_algorithm, None | Some(KeyAlgorithm::RS256)) {
        tracing::warn!(algorithm = ?jwk.common.key_algorithm, "Unsupported signing key");
        return Err(AuthError::InvalidToken);
    }
    DecodingKey::from_jwk(jwk).map_err(|_| AuthError::InvalidToken)
}

fn token_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => {
            tracing::debug!(error = %err, "Token rejected");
            AuthError::InvalidToken
        }
    }
}

#[async_trait]
impl SessionValidator for OidcSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let header = decode_header(token).map_err(token_error)?;
        let kid = header.kid.ok_or(AuthError::InvalidToken)?;

        let jwk = self.key_for(&kid).await?;
        let data = decode::<SessionClaims>(token, &decoding_key(&jwk)?, &self.validation)
            .map_err(token_error)?;

        data.claims.into_user()
    }
}

impl std::fmt::Debug for OidcSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidcSessionValidator")
            .field("issuer_url", &self.config.issuer_url)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "https://clerk.forms.test";

    #[test]
    fn jwks_url_derives_from_issuer() {
        let config = OidcConfig::new("https://clerk.forms.test/");
        assert_eq!(config.jwks_url(), "https://clerk.forms.test/.well-known/jwks.json");
    }

    #[test]
    fn explicit_jwks_url_wins() {
        let config = OidcConfig::new(ISSUER).with_jwks_url("https://keys.forms.test/jwks");
        assert_eq!(config.jwks_url(), "https://keys.forms.test/jwks");
    }

    #[test]
    fn validation_pins_issuer_and_skips_missing_audience() {
        let validation = OidcConfig::new(ISSUER).validation();

        assert_eq!(validation.algorithms, vec![Algorithm::RS256]);
        assert!(validation.iss.as_ref().is_some_and(|iss| iss.contains(ISSUER)));
        assert!(!validation.validate_aud);
    }

    #[test]
    fn configured_audience_is_enforced() {
        let validation = OidcConfig::new(ISSUER).with_audience("formcraft-api").validation();

        assert!(validation.validate_aud);
        assert!(validation
            .aud
            .as_ref()
            .is_some_and(|aud| aud.contains("formcraft-api")));
    }

    #[test]
    fn claims_become_authenticated_user() {
        let claims: SessionClaims = serde_json::from_str(
            r#"{"sub": "user_2abc", "email": "owner@forms.test", "sid": "sess_1"}"#,
        )
        .unwrap();

        let user = claims.into_user().unwrap();

        assert_eq!(user.id.as_str(), "user_2abc");
        assert_eq!(user.email.as_deref(), Some("owner@forms.test"));
        assert_eq!(user.display_name, None);
    }

    #[test]
    fn blank_subject_is_invalid() {
        let claims: SessionClaims = serde_json::from_str(r#"{"sub": "  "}"#).unwrap();
        assert_eq!(claims.into_user().unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn expired_signature_maps_to_token_expired() {
        let err = jsonwebtoken::errors::Error::from(ErrorKind::ExpiredSignature);
        assert_eq!(token_error(err), AuthError::TokenExpired);

        let err = jsonwebtoken::errors::Error::from(ErrorKind::InvalidIssuer);
        assert_eq!(token_error(err), AuthError::InvalidToken);
    }

    #[test]
    fn stale_cache_is_not_fresh() {
        let cached = CachedKeys {
            keys: JwkSet { keys: vec![] },
            expires_at: Instant::now() - Duration::from_secs(1),
        };
        assert!(!cached.is_fresh());
    }

    #[tokio::test]
    async fn garbage_token_is_invalid_without_network() {
        let v = OidcSessionValidator::new(OidcConfig::new(ISSUER)).unwrap();
        assert_eq!(v.validate("not-a-jwt").await.unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn validator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OidcSessionValidator>();
    }
}
