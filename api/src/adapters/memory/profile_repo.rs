//! In-memory profile repository

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::entities::{NotificationPreferences, UserId, UserProfile};
use crate::domain::ports::ProfileRepository;
use crate::error::DomainError;

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<UserId, UserProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a profile
    pub fn with_profile(self, profile: UserProfile) -> Self {
        if let Ok(mut profiles) = self.profiles.write() {
            profiles.insert(profile.id, profile);
        }
        self
    }
}

fn poisoned<T>(_: T) -> DomainError {
    DomainError::Internal("profile store lock poisoned".to_string())
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        Ok(profiles.get(id).cloned())
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn update_notifications(
        &self,
        id: &UserId,
        notifications: NotificationPreferences,
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        let profile = profiles
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Profile for user {}", id)))?;
        profile.notifications = notifications;
        Ok(())
    }
}
