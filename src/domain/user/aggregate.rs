//! User record synced from the identity provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{AuthenticatedUser, Timestamp, UserId, ValidationError};

/// Prefix the identity provider uses for token identifiers.
pub const TOKEN_IDENTIFIER_PREFIX: &str = "clerk_";

/// Name stored when neither the provider nor the token supplies one.
pub const DEFAULT_USER_NAME: &str = "User";

/// Default session lifetime when the provider omits an expiry.
pub const DEFAULT_SESSION_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Profile fields carried by `user.created` / `user.updated` events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub email: Option<String>,
    pub name: String,
    pub created_at: Option<Timestamp>,
}

/// A user of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: Option<String>,
    name: String,
    role: UserRole,
    deleted: bool,
    created_at: Timestamp,
    last_active_at: Option<Timestamp>,
    session_expires_at: Option<Timestamp>,
}

impl User {
    /// Creates a user from a validated token on first sight.
    pub fn from_identity(identity: &AuthenticatedUser) -> Self {
        Self {
            id: identity.id.clone(),
            email: identity.email.clone(),
            name: identity.fallback_name(),
            role: UserRole::User,
            deleted: false,
            created_at: Timestamp::now(),
            last_active_at: None,
            session_expires_at: None,
        }
    }

    /// Creates a user from a webhook profile.
    pub fn from_profile(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            role: UserRole::User,
            deleted: false,
            created_at: profile.created_at.unwrap_or_else(Timestamp::now),
            last_active_at: None,
            session_expires_at: None,
        }
    }

    /// Reconstitute a user from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        email: Option<String>,
        name: String,
        role: UserRole,
        deleted: bool,
        created_at: Timestamp,
        last_active_at: Option<Timestamp>,
        session_expires_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            role,
            deleted,
            created_at,
            last_active_at,
            session_expires_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Identifier the provider puts in issued tokens.
    pub fn token_identifier(&self) -> String {
        format!("{}{}", TOKEN_IDENTIFIER_PREFIX, self.id)
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn last_active_at(&self) -> Option<&Timestamp> {
        self.last_active_at.as_ref()
    }

    pub fn session_expires_at(&self) -> Option<&Timestamp> {
        self.session_expires_at.as_ref()
    }

    /// Applies a `user.updated` profile. Role, creation time and session data are kept.
    pub fn apply_profile(&mut self, profile: UserProfile) {
        self.email = profile.email;
        self.name = profile.name;
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin && !self.deleted
    }

    /// Soft delete. The record is kept so submissions still resolve.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    pub fn record_session(&mut self, last_active_at: Timestamp, expires_at: Timestamp) {
        self.last_active_at = Some(last_active_at);
        self.session_expires_at = Some(expires_at);
    }
}
