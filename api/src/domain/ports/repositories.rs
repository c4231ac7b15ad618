//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (in-memory for now).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{NotificationPreferences, Session, UserId, UserProfile};
use crate::error::DomainError;

/// Repository for user profiles
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find the profile for a user
    async fn find_by_user(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Insert or replace a profile
    async fn save(&self, profile: &UserProfile) -> Result<(), DomainError>;

    /// Update only the notification preferences
    async fn update_notifications(
        &self,
        id: &UserId,
        notifications: NotificationPreferences,
    ) -> Result<(), DomainError>;
}

/// Repository for sign-in sessions, keyed by token hash
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: Session) -> Result<(), DomainError>;

    async fn find_by_token_hash(&self, hash: &str) -> Result<Option<Session>, DomainError>;

    /// Remove a session; removing an unknown session is not an error
    async fn delete(&self, hash: &str) -> Result<(), DomainError>;

    /// Remove every session created at or before `cutoff`, returning how many went
    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;
}
