//! In-memory adapters
//!
//! Process-local stores for profiles and sessions. State is lost on restart.

pub mod profile_repo;
pub mod session_repo;

pub use profile_repo::InMemoryProfileRepository;
pub use session_repo::InMemorySessionRepository;
