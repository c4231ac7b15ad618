//! Auth service
//!
//! Sign-in against the configured admin account and cookie sessions.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::entities::{CurrentUser, Session, UserId};
use crate::domain::ports::SessionRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// How long a session stays valid after sign-in
pub const SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

pub struct AuthService {
    sessions: Arc<dyn SessionRepository>,
    admin: CurrentUser,
    /// HMAC of the admin password under the session secret
    password_mac: Vec<u8>,
    secret: String,
}

impl AuthService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        admin_username: &str,
        admin_password: &str,
        secret: &str,
    ) -> Result<Self, AppError> {
        let password_mac = password_mac(secret, admin_password)?;
        Ok(Self {
            sessions,
            admin: CurrentUser {
                id: UserId::new(),
                username: admin_username.to_string(),
            },
            password_mac,
            secret: secret.to_string(),
        })
    }

    /// The configured admin user
    pub fn admin(&self) -> &CurrentUser {
        &self.admin
    }

    /// Check credentials and open a session
    ///
    /// Returns the raw session token (only shown once, goes in the cookie),
    /// or `None` if the credentials are wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<String>, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AppError::Internal(format!("Invalid session secret: {}", e)))?;
        mac.update(password.as_bytes());
        let password_ok = mac.verify_slice(&self.password_mac).is_ok();

        if username != self.admin.username || !password_ok {
            tracing::warn!(username = %username, "Failed sign-in");
            return Ok(None);
        }

        let pruned = self
            .sessions
            .delete_created_before(session_cutoff(Utc::now()))
            .await?;
        if pruned > 0 {
            tracing::debug!(pruned, "Pruned expired sessions");
        }

        let token = generate_session_token();
        self.sessions
            .create(Session {
                token_hash: hash_session_token(&token),
                user: self.admin.clone(),
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(username = %username, "Signed in");
        Ok(Some(token))
    }

    /// Resolve a session token to its user
    ///
    /// A session older than `SESSION_TTL` is removed and treated as unknown.
    pub async fn authenticate(&self, token: &str) -> Result<Option<CurrentUser>, AppError> {
        let hash = hash_session_token(token);
        let Some(session) = self.sessions.find_by_token_hash(&hash).await? else {
            return Ok(None);
        };

        if session.created_at <= session_cutoff(Utc::now()) {
            tracing::debug!(username = %session.user.username, "Session expired");
            self.sessions.delete(&hash).await?;
            return Ok(None);
        }
        Ok(Some(session.user))
    }

    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.sessions.delete(&hash_session_token(token)).await?;
        Ok(())
    }
}

/// Sessions created at or before this instant have expired
fn session_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - chrono::Duration::seconds(SESSION_TTL.as_secs() as i64)
}

fn password_mac(secret: &str, password: &str) -> Result<Vec<u8>, AppError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::Internal(format!("Invalid session secret: {}", e)))?;
    mac.update(password.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Generate a random session token
fn generate_session_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    hex::encode(bytes)
}

/// Hash a session token for storage
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySessionRepository;

    fn service_with(sessions: Arc<InMemorySessionRepository>) -> AuthService {
        AuthService::new(sessions, "admin", "hunter2", "test-secret").unwrap()
    }

    fn service() -> AuthService {
        service_with(Arc::new(InMemorySessionRepository::new()))
    }

    fn session_aged(service: &AuthService, token: &str, age: chrono::Duration) -> Session {
        Session {
            token_hash: hash_session_token(token),
            user: service.admin().clone(),
            created_at: Utc::now() - age,
        }
    }

    #[tokio::test]
    async fn login_then_authenticate() {
        let service = service();

        let token = service.login("admin", "hunter2").await.unwrap().unwrap();
        let user = service.authenticate(&token).await.unwrap();

        assert_eq!(token.len(), 64);
        assert_eq!(user.as_ref(), Some(service.admin()));
    }

    #[tokio::test]
    async fn wrong_password_or_username_is_rejected() {
        let service = service();

        assert!(service.login("admin", "hunter3").await.unwrap().is_none());
        assert!(service.login("root", "hunter2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_token_is_anonymous() {
        let service = service();
        assert!(service.authenticate("deadbeef").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_ends_session() {
        let service = service();
        let token = service.login("admin", "hunter2").await.unwrap().unwrap();

        service.logout(&token).await.unwrap();

        assert!(service.authenticate(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn tokens_are_unique() {
        let service = service();
        let a = service.login("admin", "hunter2").await.unwrap().unwrap();
        let b = service.login("admin", "hunter2").await.unwrap().unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn session_past_ttl_is_rejected_and_removed() {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let service = service_with(sessions.clone());
        let stale = session_aged(&service, "stale", chrono::Duration::hours(13));
        sessions.create(stale).await.unwrap();

        assert!(service.authenticate("stale").await.unwrap().is_none());
        assert!(sessions
            .find_by_token_hash(&hash_session_token("stale"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn session_within_ttl_is_accepted() {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let service = service_with(sessions.clone());
        let fresh = session_aged(&service, "fresh", chrono::Duration::hours(11));
        sessions.create(fresh).await.unwrap();

        assert_eq!(
            service.authenticate("fresh").await.unwrap().as_ref(),
            Some(service.admin())
        );
    }

    #[tokio::test]
    async fn login_prunes_expired_sessions() {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let service = service_with(sessions.clone());
        let stale = session_aged(&service, "stale", chrono::Duration::days(2));
        sessions.create(stale).await.unwrap();

        service.login("admin", "hunter2").await.unwrap().unwrap();

        assert!(sessions
            .find_by_token_hash(&hash_session_token("stale"))
            .await
            .unwrap()
            .is_none());
    }

    #[test]
    fn token_hash_is_stable_hex() {
        assert_eq!(hash_session_token("abc"), hash_session_token("abc"));
        assert_eq!(hash_session_token("abc").len(), 64);
    }
}
