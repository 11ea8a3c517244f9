//! Identity webhook signature verification (Svix scheme).
//!
//! The provider signs `{svix-id}.{svix-timestamp}.{body}` with HMAC-SHA256
//! using the base64 key after the `whsec_` prefix. The `svix-signature`
//! header holds one or more space-separated `v1,<base64>` entries.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::identity_event::IdentityEvent;
use super::WebhookError;

/// Allowed distance between the signed timestamp and now (5 minutes).
const TOLERANCE_SECS: u64 = 300;

/// Prefix of a signing secret.
pub const SECRET_PREFIX: &str = "whsec_";

/// The three signature headers of a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookHeaders {
    pub id: String,
    pub timestamp: String,
    pub signature: String,
}

impl WebhookHeaders {
    /// Builds headers from optional values, reporting the first missing one.
    pub fn from_parts(
        id: Option<&str>,
        timestamp: Option<&str>,
        signature: Option<&str>,
    ) -> Result<Self, WebhookError> {
        let id = id.ok_or(WebhookError::MissingHeader("svix-id"))?;
        let timestamp = timestamp.ok_or(WebhookError::MissingHeader("svix-timestamp"))?;
        let signature = signature.ok_or(WebhookError::MissingHeader("svix-signature"))?;
        Ok(Self {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            signature: signature.to_string(),
        })
    }
}

/// Verifier for identity webhook signatures.
#[derive(Clone)]
pub struct WebhookVerifier {
    key: Vec<u8>,
}

impl WebhookVerifier {
    /// Creates a verifier from a `whsec_<base64>` secret.
    ///
    /// # Errors
    ///
    /// - `InvalidSecret` if the prefix is missing or the key is not base64
    pub fn new(secret: &str) -> Result<Self, WebhookError> {
        let encoded = secret
            .strip_prefix(SECRET_PREFIX)
            .ok_or(WebhookError::InvalidSecret)?;
        let key = STANDARD
            .decode(encoded)
            .map_err(|_| WebhookError::InvalidSecret)?;
        if key.is_empty() {
            return Err(WebhookError::InvalidSecret);
        }
        Ok(Self { key })
    }

    /// Verifies the signature against the current time and parses the event.
    pub fn verify_and_parse(
        &self,
        headers: &WebhookHeaders,
        payload: &[u8],
    ) -> Result<IdentityEvent, WebhookError> {
        self.verify(headers, payload, chrono::Utc::now().timestamp())?;
        IdentityEvent::parse(payload)
    }

    /// Verifies the signature as of `now` (Unix seconds).
    ///
    /// # Errors
    ///
    /// - `ParseError` if the timestamp header is not an integer
    /// - `TimestampOutOfRange` if it is more than 5 minutes from `now`
    /// - `InvalidSignature` if no `v1` signature matches
    pub fn verify(
        &self,
        headers: &WebhookHeaders,
        payload: &[u8],
        now: i64,
    ) -> Result<(), WebhookError> {
        let timestamp: i64 = headers
            .timestamp
            .trim()
            .parse()
            .map_err(|_| WebhookError::ParseError("invalid timestamp".to_string()))?;

        if now.abs_diff(timestamp) > TOLERANCE_SECS {
            return Err(WebhookError::TimestampOutOfRange);
        }

        let expected = self.compute_signature(&headers.id, &headers.timestamp, payload)?;

        let matched = headers
            .signature
            .split_whitespace()
            .filter_map(|entry| entry.split_once(','))
            .filter(|(version, _)| *version == "v1")
            .filter_map(|(_, sig)| STANDARD.decode(sig).ok())
            .any(|candidate| constant_time_compare(&expected, &candidate));

        if matched {
            Ok(())
        } else {
            Err(WebhookError::InvalidSignature)
        }
    }

    /// Produces a `v1,<base64>` signature header entry for a delivery.
    pub fn sign(&self, id: &str, timestamp: i64, payload: &[u8]) -> Result<String, WebhookError> {
        let signature = self.compute_signature(id, &timestamp.to_string(), payload)?;
        Ok(format!("v1,{}", STANDARD.encode(signature)))
    }

    fn compute_signature(
        &self,
        id: &str,
        timestamp: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>, WebhookError> {
        let mut mac =
            Hmac::<Sha256>::new_from_slice(&self.key).map_err(|_| WebhookError::InvalidSecret)?;
        mac.update(id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
