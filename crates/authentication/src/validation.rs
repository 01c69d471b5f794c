use app_error::{AppError, AppResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Email validation regex
    // This pattern checks for a valid address with a proper domain
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9_+]([A-Za-z0-9_+.\-]*[A-Za-z0-9_+])?@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$"
    ).unwrap();

    // Usernames are strictly alphanumeric
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9]+$").unwrap();
}

/// The accepted password special characters
const SPECIAL_CHARACTERS: &str = "!@#~$%^&*()+|_";

/// Sanitizes a string input by trimming whitespace
pub fn sanitize_string(input: &str) -> String {
    input.trim().to_string()
}

/// Validates a username: at least 6 characters, alphanumeric only
pub fn validate_username(username: &str) -> AppResult<()> {
    if username.len() < 6 {
        return Err(AppError::ValidationError(
            "Username must be at least 6 characters long".to_string(),
        ));
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(AppError::ValidationError(
            "Username must contain only alphanumeric characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates an email address
pub fn validate_email(email: &str) -> AppResult<()> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(AppError::ValidationError(
            "Invalid email format".to_string(),
        ));
    }

    Ok(())
}

/// Validates password strength.
///
/// Rules are evaluated in a fixed order and the first unmet rule wins:
/// length, uppercase, lowercase, digit, special character.
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < 8 {
        return Err(AppError::ValidationError(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AppError::ValidationError(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(AppError::ValidationError(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::ValidationError(
            "Password must contain at least one number".to_string(),
        ));
    }

    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err(AppError::ValidationError(format!(
            "Password must contain at least one special character ({})",
            SPECIAL_CHARACTERS
        )));
    }

    Ok(())
}
