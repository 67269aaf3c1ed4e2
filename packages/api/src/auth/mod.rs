//! Shared-secret admin authentication.
//!
//! There are no users and no session store: logging in with the configured
//! password hands out a cookie holding the configured token, and every admin
//! request compares that cookie with the token.

mod gate;
mod password;

pub use gate::{is_authenticated, removal_cookie, session_cookie, Admin};
pub use password::{hash_password, verify_admin_password, verify_password};
