//! Authentication
//!
//! Cookie sessions for the dashboard.

pub mod session;

pub use session::{
    clear_session_cookie, require_session, session_cookie, session_token, SESSION_COOKIE,
};
