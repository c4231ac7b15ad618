//! In-memory session repository

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::Session;
use crate::domain::ports::SessionRepository;
use crate::error::DomainError;

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> DomainError {
    DomainError::Internal("session store lock poisoned".to_string())
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        sessions.insert(session.token_hash.clone(), session);
        Ok(())
    }

    async fn find_by_token_hash(&self, hash: &str) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        Ok(sessions.get(hash).cloned())
    }

    async fn delete(&self, hash: &str) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        sessions.remove(hash);
        Ok(())
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        let before = sessions.len();
        sessions.retain(|_, session| session.created_at > cutoff);
        Ok(before - sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::test_utils::test_user;

    #[tokio::test]
    async fn create_find_delete() {
        let repo = InMemorySessionRepository::new();
        let session = Session {
            token_hash: "hash".into(),
            user: test_user(),
            created_at: Utc::now(),
        };

        repo.create(session).await.unwrap();
        assert!(repo.find_by_token_hash("hash").await.unwrap().is_some());

        repo.delete("hash").await.unwrap();
        assert!(repo.find_by_token_hash("hash").await.unwrap().is_none());

        // Deleting twice is fine
        repo.delete("hash").await.unwrap();
    }

    #[tokio::test]
    async fn delete_created_before_keeps_newer_sessions() {
        let repo = InMemorySessionRepository::new();
        let now = Utc::now();
        for (hash, age) in [("old", 10), ("older", 20), ("new", 1)] {
            repo.create(Session {
                token_hash: hash.into(),
                user: test_user(),
                created_at: now - Duration::hours(age),
            })
            .await
            .unwrap();
        }

        let removed = repo
            .delete_created_before(now - Duration::hours(5))
            .await
            .unwrap();

        assert_eq!(removed, 2);
        assert!(repo.find_by_token_hash("new").await.unwrap().is_some());
        assert!(repo.find_by_token_hash("old").await.unwrap().is_none());
    }
}
