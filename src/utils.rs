//! Requester-field validation helpers.

use crate::error::{DocgateError, Result};

/// Validate a requester email address.
///
/// Deliberately shallow: one `@`, a non-empty local part, and a domain
/// with at least one dot. Deliverability is proven by the accept email
/// itself, not here.
///
/// # Errors
///
/// Returns [`DocgateError::Validation`] for anything that cannot be an
/// address.
///
/// # Examples
///
/// ```
/// use docgate::utils::validate_email;
///
/// assert!(validate_email("a@example.com").is_ok());
/// assert!(validate_email("nope").is_err());
/// assert!(validate_email("@example.com").is_err());
/// assert!(validate_email("a@nodot").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<()> {
    let invalid = || DocgateError::Validation {
        reason: "\"email\" is invalid".to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(invalid());
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(())
}

/// Validate a requester name.
///
/// # Errors
///
/// Returns [`DocgateError::Validation`] unless the trimmed name is longer
/// than one character.
///
/// # Examples
///
/// ```
/// use docgate::utils::validate_requester_name;
///
/// assert!(validate_requester_name("Alice").is_ok());
/// assert!(validate_requester_name("A").is_err());
/// assert!(validate_requester_name("  ").is_err());
/// ```
pub fn validate_requester_name(name: &str) -> Result<()> {
    if name.trim().chars().count() <= 1 {
        return Err(DocgateError::Validation {
            reason: "\"name\" is required and must be of a length greater than 1".to_string(),
        });
    }
    Ok(())
}
