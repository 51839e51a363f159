use tracing::info;

use crate::error::AuthError;
use crate::protocol::UserProfile;

// ── Mock authentication ─────────────────────────────────────────────
//
// There is no account store. Any non-empty email/password pair is
// accepted; the only rejection is missing credentials. The profile's
// display name falls back to the local part of the email.

pub fn login(email: &str, password: &str) -> Result<UserProfile, AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    let profile = UserProfile {
        name: display_name(email, None),
        email: email.to_string(),
    };
    info!("User logged in: {}", profile.email);
    Ok(profile)
}

pub fn register(email: &str, password: &str, name: Option<&str>) -> Result<UserProfile, AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    let profile = UserProfile {
        name: display_name(email, name),
        email: email.to_string(),
    };
    info!("User registered: {}", profile.email);
    Ok(profile)
}

fn display_name(email: &str, name: Option<&str>) -> String {
    match name {
        Some(n) if !n.trim().is_empty() => n.to_string(),
        _ => email.split('@').next().unwrap_or(email).to_string(),
    }
}

// ── Tests ───────────────────────────────────────────────────────────
