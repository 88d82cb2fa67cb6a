//! Form checks run before the account registry is touched

use crate::error::{AppError, AppResult};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validates a signup form
pub fn validate_signup(username: &str, password: &str, confirm_password: &str) -> AppResult<()> {
    if username.is_empty() || password.is_empty() || confirm_password.is_empty() {
        return Err(AppError::InvalidInput(
            "Please fill in all fields.".to_string(),
        ));
    }
    if password != confirm_password {
        return Err(AppError::InvalidInput("Passwords do not match.".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {} characters long.",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Validates a login form
pub fn validate_login(username: &str, password: &str) -> AppResult<()> {
    if username.is_empty() || password.is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter both username and password.".to_string(),
        ));
    }
    Ok(())
}
