//! Profile service
//!
//! Reads and edits the signed-in user's profile. Users without a stored
//! profile get the mocked record, which is saved on first read.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    Address, CurrentUser, Membership, MembershipPlan, NotificationPreferences, UserProfile,
};
use crate::domain::ports::ProfileRepository;
use crate::error::{AppError, DomainError};

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());
static PHONE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-() ]{7,20}$").ok());

/// A pattern that failed to build matches nothing
fn matches(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(value))
}

const NAME_MAX: usize = 50;
const BIO_MAX: usize = 280;
const POSTAL_CODE_MAX: usize = 12;

/// Submitted identity + address form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

/// Field name to the message shown next to it
pub type FieldErrors = BTreeMap<&'static str, String>;

impl ProfileForm {
    /// Prefill from the stored profile
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone().unwrap_or_default(),
            bio: profile.bio.clone(),
            street: profile.address.street.clone(),
            city: profile.address.city.clone(),
            state: profile.address.state.clone(),
            postal_code: profile.address.postal_code.clone(),
            country: profile.address.country.clone(),
        }
    }

    /// Field-level validation; empty when the form is valid
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        for (field, label, value) in [
            ("first_name", "First name", &self.first_name),
            ("last_name", "Last name", &self.last_name),
        ] {
            let value = value.trim();
            if value.is_empty() {
                errors.insert(field, format!("{} is required", label));
            } else if value.chars().count() > NAME_MAX {
                errors.insert(
                    field,
                    format!("{} must be at most {} characters", label, NAME_MAX),
                );
            }
        }

        if !matches(&EMAIL_RE, self.email.trim()) {
            errors.insert("email", "Enter a valid email address".to_string());
        }

        let phone = self.phone.trim();
        if !phone.is_empty() && !matches(&PHONE_RE, phone) {
            errors.insert(
                "phone",
                "Phone may contain digits, spaces and + - ( ), 7 to 20 characters".to_string(),
            );
        }

        if self.bio.chars().count() > BIO_MAX {
            errors.insert("bio", format!("Bio must be at most {} characters", BIO_MAX));
        }

        if self.postal_code.trim().chars().count() > POSTAL_CODE_MAX {
            errors.insert(
                "postal_code",
                format!("Postal code must be at most {} characters", POSTAL_CODE_MAX),
            );
        }

        errors
    }
}

/// Submitted notification checkboxes; unchecked boxes are absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationsForm {
    pub email: Option<String>,
    pub push: Option<String>,
    pub sms: Option<String>,
    pub newsletter: Option<String>,
}

impl From<NotificationsForm> for NotificationPreferences {
    fn from(form: NotificationsForm) -> Self {
        Self {
            email: form.email.is_some(),
            push: form.push.is_some(),
            sms: form.sms.is_some(),
            newsletter: form.newsletter.is_some(),
        }
    }
}

/// The mocked profile record for a user
pub fn mock_profile(user: &CurrentUser) -> UserProfile {
    UserProfile {
        id: user.id,
        username: user.username.clone(),
        first_name: "Jordan".to_string(),
        last_name: "Rivera".to_string(),
        email: format!("{}@cinedash.local", user.username),
        phone: Some("+1 (555) 010-2024".to_string()),
        bio: "Film buff and weekend critic. Mostly sci-fi and seventies thrillers.".to_string(),
        avatar_url: None,
        address: Address {
            street: "221 Sunset Blvd".to_string(),
            city: "Los Angeles".to_string(),
            state: "CA".to_string(),
            postal_code: "90028".to_string(),
            country: "United States".to_string(),
        },
        membership: Membership {
            plan: MembershipPlan::Premium,
            member_since: NaiveDate::from_ymd_opt(2021, 3, 14).unwrap_or(NaiveDate::MIN),
            movies_watched: 342,
            reviews_written: 57,
            watchlist_count: 24,
        },
        notifications: NotificationPreferences {
            email: true,
            push: true,
            sms: false,
            newsletter: true,
        },
    }
}

pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Get the user's profile, seeding the mock on first access
    pub async fn get(&self, user: &CurrentUser) -> Result<UserProfile, AppError> {
        if let Some(profile) = self.profiles.find_by_user(&user.id).await? {
            return Ok(profile);
        }

        let profile = mock_profile(user);
        self.profiles.save(&profile).await?;
        tracing::debug!(user = %user.username, "Seeded mock profile");
        Ok(profile)
    }

    /// Apply a submitted profile form
    ///
    /// Callers render `form.validate()` errors themselves; an invalid form
    /// reaching this method is rejected as a validation error.
    pub async fn update(
        &self,
        user: &CurrentUser,
        form: &ProfileForm,
    ) -> Result<UserProfile, AppError> {
        let errors = form.validate();
        if !errors.is_empty() {
            let fields: Vec<&str> = errors.keys().copied().collect();
            return Err(DomainError::Validation(format!(
                "invalid fields: {}",
                fields.join(", ")
            ))
            .into());
        }

        let mut profile = self.get(user).await?;
        let optional = |v: &str| Some(v.trim().to_string()).filter(|v| !v.is_empty());

        profile.first_name = form.first_name.trim().to_string();
        profile.last_name = form.last_name.trim().to_string();
        profile.email = form.email.trim().to_string();
        profile.phone = optional(&form.phone);
        profile.bio = form.bio.trim().to_string();
        profile.address = Address {
            street: form.street.trim().to_string(),
            city: form.city.trim().to_string(),
            state: form.state.trim().to_string(),
            postal_code: form.postal_code.trim().to_string(),
            country: form.country.trim().to_string(),
        };

        self.profiles.save(&profile).await?;
        tracing::info!(user = %user.username, "Profile updated");
        Ok(profile)
    }

    pub async fn update_notifications(
        &self,
        user: &CurrentUser,
        notifications: NotificationPreferences,
    ) -> Result<UserProfile, AppError> {
        // Make sure a profile exists before updating part of it
        self.get(user).await?;
        self.profiles
            .update_notifications(&user.id, notifications)
            .await?;
        self.get(user).await
    }
}
