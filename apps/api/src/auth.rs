use ombaro_core::UserIdentity;
use ombaro_domain::UserProfile;

mod login;
mod session;

pub use login::login_handler;
pub(crate) use session::active_session_profile;
pub use session::{current_user_handler, logout_handler};

pub const SESSION_USER_KEY: &str = "user_identity";
/// Absolute session creation timestamp.
pub const SESSION_CREATED_AT_KEY: &str = "session_created_at";
/// Sessions end this long after sign-in regardless of activity.
pub const SESSION_ABSOLUTE_TIMEOUT_SECONDS: i64 = 12 * 60 * 60;

/// Session identity derived from a stored profile.
pub(crate) fn identity_for(profile: &UserProfile) -> UserIdentity {
    UserIdentity::new(
        profile.id.to_string(),
        profile.name.as_str(),
        profile.email.as_ref().map(|email| email.as_str().to_owned()),
        profile.role.as_str(),
    )
}

#[cfg(test)]
mod tests;
