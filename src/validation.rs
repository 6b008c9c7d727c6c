//! Input validation for user payloads.
//!
//! Every rule reports the same [`AppError::Validation`]: the client only
//! ever learns that the data was rejected, not which rule failed.

use crate::error::{AppError, AppResult};

/// Smallest accepted age.
pub const MIN_USER_AGE: i32 = 1;

/// Validate a user name.
///
/// Rules:
/// - Must be present
/// - Must contain at least one non-whitespace character
pub fn validate_user_name(name: Option<&str>) -> AppResult<()> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ => Err(AppError::Validation),
    }
}

/// Validate a user age. Must be strictly positive.
pub fn validate_user_age(age: i32) -> AppResult<()> {
    if age < MIN_USER_AGE {
        return Err(AppError::Validation);
    }
    Ok(())
}
