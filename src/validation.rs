//! Client-side input validation for credentials and task titles.
//!
//! These checks run before any gateway call. A failure is reported as a
//! [`ValidationError`] and never reaches the store or the credential
//! provider.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::error::ValidationError;

/// Minimum number of characters in a sign-up password.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Address pattern: `local@domain` followed by one or more dot-separated labels.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// Why an email address was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailIssue {
    /// Empty or whitespace only.
    #[error("email must not be empty")]
    Blank,

    /// Does not look like an address.
    #[error("enter a valid email address")]
    Malformed,
}

/// The password strength rule that failed.
///
/// Rules are checked in declaration order and the first failure wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordRule {
    /// Fewer than [`MIN_PASSWORD_LEN`] characters.
    #[error("password must be at least 8 characters")]
    TooShort,

    /// No ASCII decimal digit.
    #[error("password must contain at least one number")]
    MissingDigit,

    /// No upper-case letter.
    #[error("password must contain an upper-case letter")]
    MissingUppercase,

    /// No lower-case letter.
    #[error("password must contain a lower-case letter")]
    MissingLowercase,

    /// No character that is neither a letter nor a digit.
    #[error("password must contain a special character")]
    MissingSymbol,
}

/// Checks that `email` is non-blank and shaped like an address.
///
/// Surrounding whitespace is ignored; embedded whitespace is rejected.
///
/// # Examples
///
/// ```
/// use todolist::validation::{validate_email, EmailIssue};
/// use todolist::ValidationError;
///
/// assert!(validate_email("a@b.com").is_ok());
/// assert_eq!(
///     validate_email(""),
///     Err(ValidationError::InvalidEmail(EmailIssue::Blank))
/// );
/// assert_eq!(
///     validate_email("not-an-email"),
///     Err(ValidationError::InvalidEmail(EmailIssue::Malformed))
/// );
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(EmailIssue::Blank));
    }
    if !email_regex().is_match(email) {
        return Err(ValidationError::InvalidEmail(EmailIssue::Malformed));
    }
    Ok(())
}

/// Checks sign-up password strength.
///
/// Rules short-circuit in a fixed order: length, digit, upper-case,
/// lower-case, symbol. Sign-in does not re-check these rules.
///
/// # Examples
///
/// ```
/// use todolist::validation::{validate_password, PasswordRule};
/// use todolist::ValidationError;
///
/// assert!(validate_password("short1A!").is_ok());
/// assert_eq!(
///     validate_password("Ab1!"),
///     Err(ValidationError::WeakPassword(PasswordRule::TooShort))
/// );
/// ```
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let rule = if password.chars().count() < MIN_PASSWORD_LEN {
        Some(PasswordRule::TooShort)
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some(PasswordRule::MissingDigit)
    } else if !password.chars().any(char::is_uppercase) {
        Some(PasswordRule::MissingUppercase)
    } else if !password.chars().any(char::is_lowercase) {
        Some(PasswordRule::MissingLowercase)
    } else if password.chars().all(|c| c.is_alphabetic() || c.is_ascii_digit()) {
        Some(PasswordRule::MissingSymbol)
    } else {
        None
    };
    rule.map_or(Ok(()), |r| Err(ValidationError::WeakPassword(r)))
}

/// Returns the trimmed title, or [`ValidationError::EmptyTitle`] if nothing is left.
///
/// # Examples
///
/// ```
/// use todolist::validation::validate_title;
///
/// assert_eq!(validate_title("  Groceries ").unwrap(), "Groceries");
/// assert!(validate_title(" \t ").is_err());
/// ```
pub fn validate_title(title: &str) -> Result<&str, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed)
}
