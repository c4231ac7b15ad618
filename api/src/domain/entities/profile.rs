//! User profile entity
//!
//! The profile shown on the dashboard. Seeded with a mocked record and
//! edited through the profile forms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub address: Address,
    pub membership: Membership,
    pub notifications: NotificationPreferences,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Initials for the avatar fallback
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub plan: MembershipPlan,
    pub member_since: NaiveDate,
    pub movies_watched: u32,
    pub reviews_written: u32,
    pub watchlist_count: u32,
}

/// Membership plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipPlan {
    Free,
    Standard,
    Premium,
}

impl std::fmt::Display for MembershipPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipPlan::Free => write!(f, "Free"),
            MembershipPlan::Standard => write!(f, "Standard"),
            MembershipPlan::Premium => write!(f, "Premium"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email: bool,
    pub push: bool,
    pub sms: bool,
    pub newsletter: bool,
}
