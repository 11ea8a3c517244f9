//! Identity lifecycle events delivered by the provider webhook.

use serde::Deserialize;

use super::{UserProfile, WebhookError, DEFAULT_SESSION_DAYS, DEFAULT_USER_NAME};
use crate::domain::foundation::{Timestamp, UserId};

/// A verified identity event, reduced to what the service stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    /// `user.created` or `user.updated`.
    UserUpserted(UserProfile),
    /// `user.deleted`.
    UserDeleted { id: UserId },
    /// `session.created`.
    SessionCreated {
        user_id: UserId,
        last_active_at: Timestamp,
        expires_at: Timestamp,
    },
    /// Any other event type; acknowledged and ignored.
    Unhandled(String),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct UserData {
    id: String,
    #[serde(default)]
    email_addresses: Vec<EmailAddress>,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct EmailAddress {
    email_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeletedData {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SessionData {
    user_id: String,
    last_active_at: Option<i64>,
    expire_at: Option<i64>,
}

impl IdentityEvent {
    /// Parses a raw webhook body.
    pub fn parse(payload: &[u8]) -> Result<Self, WebhookError> {
        let envelope: Envelope = serde_json::from_slice(payload).map_err(parse_error)?;

        match envelope.event_type.as_str() {
            "user.created" | "user.updated" => {
                let data: UserData = serde_json::from_value(envelope.data).map_err(parse_error)?;
                Ok(IdentityEvent::UserUpserted(data.into_profile()?))
            }
            "user.deleted" => {
                let data: DeletedData =
                    serde_json::from_value(envelope.data).map_err(parse_error)?;
                Ok(IdentityEvent::UserDeleted {
                    id: user_id(data.id)?,
                })
            }
            "session.created" => {
                let data: SessionData =
                    serde_json::from_value(envelope.data).map_err(parse_error)?;
                let now = Timestamp::now();
                Ok(IdentityEvent::SessionCreated {
                    user_id: user_id(data.user_id)?,
                    last_active_at: data
                        .last_active_at
                        .and_then(Timestamp::from_unix_millis)
                        .unwrap_or(now),
                    expires_at: data
                        .expire_at
                        .and_then(Timestamp::from_unix_millis)
                        .unwrap_or_else(|| now.plus_days(DEFAULT_SESSION_DAYS)),
                })
            }
            _ => Ok(IdentityEvent::Unhandled(envelope.event_type)),
        }
    }

    /// Event type name for logging.
    pub fn kind(&self) -> &str {
        match self {
            IdentityEvent::UserUpserted(_) => "user.upserted",
            IdentityEvent::UserDeleted { .. } => "user.deleted",
            IdentityEvent::SessionCreated { .. } => "session.created",
            IdentityEvent::Unhandled(kind) => kind,
        }
    }
}

impl UserData {
    fn into_profile(self) -> Result<UserProfile, WebhookError> {
        let email = self
            .email_addresses
            .into_iter()
            .next()
            .and_then(|e| e.email_address)
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        let full_name = format!(
            "{} {}",
            self.first_name.unwrap_or_default(),
            self.last_name.unwrap_or_default()
        )
        .trim()
        .to_string();

        let name = if !full_name.is_empty() {
            full_name
        } else {
            email
                .as_deref()
                .and_then(|e| e.split('@').next())
                .filter(|local| !local.is_empty())
                .unwrap_or(DEFAULT_USER_NAME)
                .to_string()
        };

        Ok(UserProfile {
            id: user_id(self.id)?,
            email,
            name,
            created_at: self.created_at.and_then(Timestamp::from_unix_millis),
        })
    }
}

fn user_id(raw: String) -> Result<UserId, WebhookError> {
    UserId::new(raw).map_err(|e| WebhookError::ParseError(e.to_string()))
}

fn parse_error(err: serde_json::Error) -> WebhookError {
    WebhookError::ParseError(err.to_string())
}
