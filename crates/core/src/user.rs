//! Registration rules and login lockout policy.

use crate::error::CoreError;

/// Minimum password length enforced at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Consecutive failed logins before the account is locked.
pub const MAX_FAILED_LOGINS: i32 = 5;

/// How long a lockout lasts.
pub const LOCKOUT_MINUTES: i64 = 3;

/// Usernames are 3 to 32 ASCII letters, digits, `_` or `-`.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits, '_' and '-'".into(),
        ));
    }
    Ok(())
}

/// Minimal shape check: something on both sides of a single `@`.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid || email.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Canonical stored form of an email: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Human-friendly remaining lockout time, e.g. `"2 minutes"`.
pub fn format_remaining(secs: i64) -> String {
    match secs {
        s if s <= 1 => "1 second".to_string(),
        s if s < 60 => format!("{s} seconds"),
        s if s < 120 => "1 minute".to_string(),
        s => format!("{} minutes", s / 60),
    }
}

/// The error returned while an account is locked.
pub fn lockout_error(remaining_secs: i64) -> CoreError {
    CoreError::LockedOut {
        message: format!(
            "Too many failed log in attempts. You have {} remaining.",
            format_remaining(remaining_secs)
        ),
        retry_after_secs: remaining_secs.max(1),
    }
}
