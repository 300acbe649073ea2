//! Integration tests for the public validation rules.

use rstest::rstest;
use todolist::validation::{
    validate_email, validate_password, validate_title, EmailIssue, PasswordRule,
};
use todolist::ValidationError;

#[rstest]
#[case::empty("")]
#[case::spaces("   ")]
fn test_blank_email_rejected(#[case] email: &str) {
    assert_eq!(
        validate_email(email),
        Err(ValidationError::InvalidEmail(EmailIssue::Blank))
    );
}

#[rstest]
#[case::no_at("not-an-email")]
#[case::no_tld("user@localhost")]
#[case::inner_space("us er@example.com")]
#[case::double_at("a@@b.com")]
fn test_malformed_email_rejected(#[case] email: &str) {
    assert_eq!(
        validate_email(email),
        Err(ValidationError::InvalidEmail(EmailIssue::Malformed))
    );
}

#[rstest]
#[case::minimal("a@b.com")]
#[case::plus_tag("first.last+tag@sub.example.org")]
#[case::padded("  a@b.com  ")]
fn test_valid_email_accepted(#[case] email: &str) {
    assert_eq!(validate_email(email), Ok(()));
}

#[rstest]
#[case::too_short("Ab1!", PasswordRule::TooShort)]
#[case::no_upper("alllowercase1!", PasswordRule::MissingUppercase)]
#[case::no_symbol("NoSymbolsHere1", PasswordRule::MissingSymbol)]
#[case::no_digit("NoDigitsHere!", PasswordRule::MissingDigit)]
#[case::fraction_is_not_digit("Abcdefg½!", PasswordRule::MissingDigit)]
#[case::no_lower("ALLUPPER1!", PasswordRule::MissingLowercase)]
fn test_weak_password_reports_first_failing_rule(
    #[case] password: &str,
    #[case] rule: PasswordRule,
) {
    assert_eq!(
        validate_password(password),
        Err(ValidationError::WeakPassword(rule))
    );
}

#[rstest]
#[case("short1A!")]
#[case("Passw0rd!")]
fn test_strong_password_accepted(#[case] password: &str) {
    assert_eq!(validate_password(password), Ok(()));
}

#[rstest]
fn test_title_is_trimmed() {
    assert_eq!(validate_title("  Buy milk \n"), Ok("Buy milk"));
    assert_eq!(validate_title(" \t "), Err(ValidationError::EmptyTitle));
}
