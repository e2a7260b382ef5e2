//! Contact-form submissions.
//!
//! The site accepts `{ name, email, message }` (plus an optional subject) and
//! forwards it to the office inbox. Only validation and the notification text
//! live here; delivery is the caller's business.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::error::ErrorCode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),
}

impl ContactError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        ErrorCode::InvalidContact
    }
}

impl ContactSubmission {
    /// Trim every field and check the required ones.
    ///
    /// # Errors
    ///
    /// [`ContactError::MissingFields`] lists every blank required field;
    /// [`ContactError::InvalidEmail`] is returned only when all are present.
    pub fn validate(self) -> Result<Self, ContactError> {
        let submission = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self
                .subject
                .map(|subject| subject.trim().to_string())
                .filter(|subject| !subject.is_empty()),
            message: self.message.trim().to_string(),
        };

        let missing: Vec<&'static str> = [
            ("name", &submission.name),
            ("email", &submission.email),
            ("message", &submission.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(ContactError::MissingFields(missing));
        }

        if !is_valid_email(&submission.email) {
            return Err(ContactError::InvalidEmail(submission.email));
        }

        Ok(submission)
    }

    #[must_use]
    pub fn notification_subject(&self) -> String {
        format!("New Contact Form Submission from {}", self.name)
    }

    /// Plain-text body of the inbox notification.
    #[must_use]
    pub fn notification_body(&self) -> String {
        let mut body = String::new();
        let _ = writeln!(body, "Name: {}", self.name);
        let _ = writeln!(body, "Email: {}", self.email);
        if let Some(subject) = &self.subject {
            let _ = writeln!(body, "Subject: {subject}");
        }
        let _ = writeln!(body);
        let _ = writeln!(body, "{}", self.message);
        body
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, a non-empty local
/// part, and a domain with a `.` that has characters on both sides.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            subject: None,
            message: message.to_string(),
        }
    }

    #[test]
    fn email_shape_rules() {
        assert!(is_valid_email("victor@raphaelcapital.co.uk"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("a@b..c"));

        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("@domain.com"));
        assert!(!is_valid_email("a@@domain.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a@domain"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@domain."));
        assert!(!is_valid_email("a b@domain.com"));
    }

    #[test]
    fn validate_trims_and_accepts() {
        let valid = ContactSubmission {
            name: "  Jane Doe ".to_string(),
            email: " jane@example.com ".to_string(),
            subject: Some("   ".to_string()),
            message: "\nInterested in Leeds.\n".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(valid.name, "Jane Doe");
        assert_eq!(valid.email, "jane@example.com");
        assert!(valid.subject.is_none());
        assert_eq!(valid.message, "Interested in Leeds.");
    }

    #[test]
    fn validate_lists_every_missing_field() {
        let err = submission(" ", "", "hello").validate().unwrap_err();
        assert_eq!(err, ContactError::MissingFields(vec!["name", "email"]));
        assert_eq!(err.to_string(), "missing required fields: name, email");
        assert_eq!(err.error_code(), ErrorCode::InvalidContact);
    }

    #[test]
    fn validate_rejects_bad_email_after_presence_check() {
        let err = submission("Jane", "jane-at-example", "hello").validate().unwrap_err();
        assert_eq!(err, ContactError::InvalidEmail("jane-at-example".to_string()));
    }

    #[test]
    fn notification_includes_subject_when_present() {
        let mut valid = submission("Jane", "jane@example.com", "Hello there").validate().unwrap();
        assert_eq!(
            valid.notification_subject(),
            "New Contact Form Submission from Jane"
        );
        assert!(!valid.notification_body().contains("Subject:"));

        valid.subject = Some("Mandates".to_string());
        let body = valid.notification_body();
        assert!(body.starts_with("Name: Jane\nEmail: jane@example.com\nSubject: Mandates\n"));
        assert!(body.ends_with("\nHello there\n"));
    }
}
