pub mod health;
pub use self::health::health;

pub mod register;
pub use self::register::register;

pub mod login;
pub use self::login::login;

// common functions for the handlers
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use utoipa::ToSchema;

pub const EMAIL_MAX_LENGTH: usize = 254;
pub const PASSWORD_MAX_LENGTH: usize = 128;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";
pub const MSG_NULL_CHARACTERS: &str = "Null characters are not allowed.";
pub const MSG_DUPLICATE_EMAIL: &str = "user with this email already exists.";
pub const MSG_INVALID_PAYLOAD: &str = "Invalid payload.";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";

pub fn valid_email(email: &str) -> bool {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

fn max_length_message(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

/// Errors keyed by field name, serialized as `{"errors": {field: [messages]}}`.
#[derive(ToSchema, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Reject absent and empty values; anything else goes on to the content rules.
fn check_present<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    let Some(value) = value else {
        errors.add(field, MSG_REQUIRED);
        return None;
    };

    if value.is_empty() {
        errors.add(field, MSG_BLANK);
        return None;
    }

    Some(value)
}

/// Length and NUL rules; every failing rule is recorded.
fn check_content(errors: &mut ValidationErrors, field: &str, value: &str, max_length: usize) -> bool {
    let mut valid = true;

    if value.chars().count() > max_length {
        errors.add(field, &max_length_message(max_length));
        valid = false;
    }

    if has_null_characters(value) {
        errors.add(field, MSG_NULL_CHARACTERS);
        valid = false;
    }

    valid
}

/// Postgres text columns cannot hold 0x00.
#[must_use]
pub fn has_null_characters(value: &str) -> bool {
    value.contains('\0')
}

/// Validate the email field: presence, length, NUL characters and format.
pub fn check_email<'a>(errors: &mut ValidationErrors, email: Option<&'a str>) -> Option<&'a str> {
    let email = check_present(errors, "email", email)?;
    let mut valid = check_content(errors, "email", email, EMAIL_MAX_LENGTH);

    if !valid_email(email) {
        errors.add("email", MSG_INVALID_EMAIL);
        valid = false;
    }

    valid.then_some(email)
}

/// Validate the password field: presence, length and NUL characters only.
pub fn check_password<'a>(
    errors: &mut ValidationErrors,
    password: Option<&'a str>,
) -> Option<&'a str> {
    let password = check_present(errors, "password", password)?;
    check_content(errors, "password", password, PASSWORD_MAX_LENGTH).then_some(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@b.com"));
        assert!(valid_email("first.last+tag@example.co.uk"));
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("a b@c.com"));
        assert!(!valid_email("@b.com"));
    }

    #[test]
    fn check_email_reports_missing_and_blank() {
        let mut errors = ValidationErrors::new();
        assert_eq!(check_email(&mut errors, None), None);
        assert_eq!(errors.field("email"), Some(&[MSG_REQUIRED.to_string()][..]));

        let mut errors = ValidationErrors::new();
        assert_eq!(check_email(&mut errors, Some("")), None);
        assert_eq!(errors.field("email"), Some(&[MSG_BLANK.to_string()][..]));
    }

    #[test]
    fn check_email_enforces_max_length() {
        let local = "a".repeat(EMAIL_MAX_LENGTH);
        let email = format!("{local}@b.com");
        let mut errors = ValidationErrors::new();
        assert_eq!(check_email(&mut errors, Some(&email)), None);
        assert_eq!(
            errors.field("email"),
            Some(&["Ensure this field has no more than 254 characters.".to_string()][..])
        );
    }

    #[test]
    fn check_email_reports_length_and_format_together() {
        let email = "x".repeat(300);
        let mut errors = ValidationErrors::new();
        assert_eq!(check_email(&mut errors, Some(&email)), None);
        assert_eq!(
            errors.field("email"),
            Some(
                &[
                    "Ensure this field has no more than 254 characters.".to_string(),
                    MSG_INVALID_EMAIL.to_string(),
                ][..]
            )
        );
    }

    #[test]
    fn null_characters_are_rejected() {
        let mut errors = ValidationErrors::new();
        assert_eq!(check_email(&mut errors, Some("a\0@b.com")), None);
        assert_eq!(check_password(&mut errors, Some("a\0b")), None);
        assert_eq!(
            errors.field("email"),
            Some(&[MSG_NULL_CHARACTERS.to_string()][..])
        );
        assert_eq!(
            errors.field("password"),
            Some(&[MSG_NULL_CHARACTERS.to_string()][..])
        );
        assert!(has_null_characters("\0"));
        assert!(!has_null_characters("plain"));
    }

    #[test]
    fn check_password_accepts_anything_non_blank() {
        let mut errors = ValidationErrors::new();
        assert_eq!(check_password(&mut errors, Some("x")), Some("x"));
        assert_eq!(check_password(&mut errors, Some(" ")), Some(" "));
        assert!(errors.is_empty());

        let long = "p".repeat(PASSWORD_MAX_LENGTH + 1);
        assert_eq!(check_password(&mut errors, Some(&long)), None);
        assert!(errors.field("password").is_some());
    }

    #[test]
    fn validation_errors_serialize_under_errors_key() -> Result<(), serde_json::Error> {
        let errors = ValidationErrors::single("email", MSG_DUPLICATE_EMAIL);
        let json = serde_json::to_value(&errors)?;
        assert_eq!(
            json,
            serde_json::json!({ "errors": { "email": [MSG_DUPLICATE_EMAIL] } })
        );
        Ok(())
    }
}
