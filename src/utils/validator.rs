use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::messages::Messages;

/// Minimum password length accepted by the reset and registration forms.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate a request struct using the validator crate
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request.validate().map_err(|e| {
        let mut errors: Vec<String> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| {
                    format!(
                        "{}: {}",
                        field,
                        err.message.clone().unwrap_or_else(|| "Invalid value".into())
                    )
                })
            })
            .collect();
        errors.sort();

        AppError::ValidationError(errors.join(", "))
    })
}

/// Client-side gate for a new password and its confirmation.
///
/// Checks, in order: the two values match, then the minimum length.
pub fn validate_new_password(password: &str, confirm: &str, messages: &Messages) -> AppResult<()> {
    if password != confirm {
        return Err(AppError::ValidationError(
            messages.passwords_do_not_match().to_string(),
        ));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::ValidationError(
            messages.password_too_short().to_string(),
        ));
    }

    Ok(())
}

/// Email check used by the forms. Same rule as `#[validate(email)]` on the
/// request structs.
pub fn is_valid_email(email: &str) -> bool {
    validator::validate_email(email.trim())
}
