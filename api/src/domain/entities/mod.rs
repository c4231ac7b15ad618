//! Domain entities
//!
//! Movie DTOs mirror the TMDB API shapes; the profile record is
//! owned by this application.

pub mod movie;
pub mod pagination;
pub mod profile;
pub mod user;

pub use movie::{CastMember, Genre, MovieCredits, MovieDetails, MovieSummary, TmdbPage};
pub use pagination::Paginated;
pub use profile::{Address, Membership, MembershipPlan, NotificationPreferences, UserProfile};
pub use user::{CurrentUser, Session, UserId};
