//! HandleIdentityWebhookHandler - Applies signed identity lifecycle events.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::user::{IdentityEvent, User, WebhookError, WebhookHeaders, WebhookVerifier};
use crate::ports::UserRepository;

/// A raw webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleIdentityWebhookCommand {
    pub headers: WebhookHeaders,
    pub payload: Vec<u8>,
}

/// What a verified delivery changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookOutcome {
    pub event: String,
    /// False when the event was acknowledged without touching a record.
    pub synced: bool,
}

pub struct HandleIdentityWebhookHandler {
    verifier: WebhookVerifier,
    users: Arc<dyn UserRepository>,
}

impl HandleIdentityWebhookHandler {
    pub fn new(verifier: WebhookVerifier, users: Arc<dyn UserRepository>) -> Self {
        Self { verifier, users }
    }

    /// Verifies the delivery, then applies its effect.
    ///
    /// # Errors
    ///
    /// - signature, timestamp and parse failures from the verifier
    /// - `Database` if the user store fails; the provider should redeliver
    pub async fn handle(
        &self,
        cmd: HandleIdentityWebhookCommand,
    ) -> Result<WebhookOutcome, WebhookError> {
        let event = self.verifier.verify_and_parse(&cmd.headers, &cmd.payload)?;
        let kind = event.kind().to_string();

        let synced = match event {
            IdentityEvent::UserUpserted(profile) => {
                let user = match self.users.find_by_id(&profile.id).await? {
                    Some(mut existing) => {
                        existing.apply_profile(profile);
                        existing
                    }
                    None => User::from_profile(profile),
                };
                self.users.upsert(&user).await?;
                info!(user_id = %user.id(), "User synced from identity provider");
                true
            }
            IdentityEvent::UserDeleted { id } => match self.users.find_by_id(&id).await? {
                Some(mut user) => {
                    user.mark_deleted();
                    self.users.upsert(&user).await?;
                    info!(user_id = %id, "User marked as deleted");
                    true
                }
                None => {
                    warn!(user_id = %id, "Delete event for unknown user");
                    false
                }
            },
            IdentityEvent::SessionCreated {
                user_id,
                last_active_at,
                expires_at,
            } => match self.users.find_by_id(&user_id).await? {
                Some(mut user) => {
                    user.record_session(last_active_at, expires_at);
                    self.users.upsert(&user).await?;
                    info!(user_id = %user_id, "Session synced");
                    true
                }
                None => {
                    warn!(user_id = %user_id, "Session event for unknown user");
                    false
                }
            },
            IdentityEvent::Unhandled(ref event_type) => {
                info!(event_type = %event_type, "Unhandled webhook event type");
                false
            }
        };

        Ok(WebhookOutcome { event: kind, synced })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::foundation::{Timestamp, UserId};

    // base64("formcraft-test-signing-key")
    const SECRET: &str = "whsec_Zm9ybWNyYWZ0LXRlc3Qtc2lnbmluZy1rZXk=";

    fn handler(users: Arc<InMemoryUserRepository>) -> HandleIdentityWebhookHandler {
        HandleIdentityWebhookHandler::new(WebhookVerifier::new(SECRET).unwrap(), users)
    }

    fn delivery(body: &str) -> HandleIdentityWebhookCommand {
        let now = Timestamp::now().as_datetime().timestamp();
        let signature = WebhookVerifier::new(SECRET)
            .unwrap()
            .sign("msg_1", now, body.as_bytes())
            .unwrap();
        HandleIdentityWebhookCommand {
            headers: WebhookHeaders {
                id: "msg_1".to_string(),
                timestamp: now.to_string(),
                signature,
            },
            payload: body.as_bytes().to_vec(),
        }
    }

    const CREATED: &str = r#"{"type":"user.created","data":{"id":"user_1","email_addresses":[{"email_address":"ada@example.com"}],"first_name":"Ada","last_name":"Lovelace","created_at":1700000000000}}"#;

    fn user_1() -> UserId {
        UserId::new("user_1").unwrap()
    }

    #[tokio::test]
    async fn user_created_inserts_record() {
        let users = Arc::new(InMemoryUserRepository::new());

        let outcome = handler(users.clone()).handle(delivery(CREATED)).await.unwrap();

        assert!(outcome.synced);
        let user = users.find_by_id(&user_1()).await.unwrap().unwrap();
        assert_eq!(user.name(), "Ada Lovelace");
        assert_eq!(user.email(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn user_updated_keeps_creation_time() {
        let users = Arc::new(InMemoryUserRepository::new());
        let handler = handler(users.clone());
        handler.handle(delivery(CREATED)).await.unwrap();
        let created_at = *users.find_by_id(&user_1()).await.unwrap().unwrap().created_at();

        let updated = r#"{"type":"user.updated","data":{"id":"user_1","email_addresses":[],"first_name":"Augusta","last_name":null}}"#;
        handler.handle(delivery(updated)).await.unwrap();

        let user = users.find_by_id(&user_1()).await.unwrap().unwrap();
        assert_eq!(user.name(), "Augusta");
        assert_eq!(*user.created_at(), created_at);
    }

    #[tokio::test]
    async fn user_deleted_soft_deletes() {
        let users = Arc::new(InMemoryUserRepository::new());
        let handler = handler(users.clone());
        handler.handle(delivery(CREATED)).await.unwrap();

        let outcome = handler
            .handle(delivery(r#"{"type":"user.deleted","data":{"id":"user_1"}}"#))
            .await
            .unwrap();

        assert!(outcome.synced);
        assert!(users.find_by_id(&user_1()).await.unwrap().unwrap().is_deleted());
    }

    #[tokio::test]
    async fn session_for_unknown_user_is_not_synced() {
        let users = Arc::new(InMemoryUserRepository::new());

        let outcome = handler(users)
            .handle(delivery(
                r#"{"type":"session.created","data":{"id":"sess_1","user_id":"user_ghost"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(outcome.event, "session.created");
        assert!(!outcome.synced);
    }

    #[tokio::test]
    async fn session_records_expiry() {
        let users = Arc::new(InMemoryUserRepository::new());
        let handler = handler(users.clone());
        handler.handle(delivery(CREATED)).await.unwrap();

        handler
            .handle(delivery(
                r#"{"type":"session.created","data":{"id":"sess_1","user_id":"user_1","last_active_at":1700000000000,"expire_at":1700600000000}}"#,
            ))
            .await
            .unwrap();

        let user = users.find_by_id(&user_1()).await.unwrap().unwrap();
        assert_eq!(
            user.session_expires_at().map(Timestamp::as_unix_millis),
            Some(1_700_600_000_000)
        );
    }

    #[tokio::test]
    async fn unknown_event_is_acknowledged() {
        let outcome = handler(Arc::new(InMemoryUserRepository::new()))
            .handle(delivery(r#"{"type":"organization.created","data":{}}"#))
            .await
            .unwrap();

        assert_eq!(outcome.event, "organization.created");
        assert!(!outcome.synced);
    }

    #[tokio::test]
    async fn bad_signature_changes_nothing() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mut cmd = delivery(CREATED);
        cmd.headers.signature = "v1,AAAA".to_string();

        let result = handler(users.clone()).handle(cmd).await;

        assert_eq!(result.unwrap_err(), WebhookError::InvalidSignature);
        assert!(users.find_by_id(&user_1()).await.unwrap().is_none());
    }
}
