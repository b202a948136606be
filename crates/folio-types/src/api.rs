use serde::{Deserialize, Serialize};

use crate::models::{ContactMessage, ValidationError, is_valid_email};

// -- Endpoint responses --

/// Body returned when the row was stored.
pub const SEND_SUCCESS_TEXT: &str = "Message Sent Successfully 😊";

/// Prefix of the body returned when the insert was rejected by the store.
pub const INSERT_FAILURE_PREFIX: &str = "Error: ";

/// Prefix of the body returned when the store could not be reached.
pub const CONNECTION_FAILURE_PREFIX: &str = "Connection Failed: ";

// -- Contact form --

/// Raw contact form fields exactly as submitted.
///
/// This is also the endpoint's form payload. Absent fields decode as empty
/// strings because the endpoint stores whatever it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Client-side checks run before anything leaves the page.
    ///
    /// Emptiness is checked before the email shape, so a form with an empty
    /// field always reports `MissingField`.
    pub fn validate(&self) -> Result<ContactMessage, ValidationError> {
        if [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(ValidationError::MissingField);
        }

        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(ContactMessage {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl From<ContactMessage> for ContactForm {
    fn from(msg: ContactMessage) -> Self {
        Self {
            name: msg.name,
            email: msg.email,
            subject: msg.subject,
            message: msg.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> ContactForm {
        ContactForm::new("Alice", "alice@example.com", "Hi", "Hello")
    }

    #[test]
    fn valid_form_produces_message() {
        let msg = alice().validate().unwrap();
        assert_eq!(msg.name, "Alice");
        assert_eq!(msg.email, "alice@example.com");
        assert_eq!(msg.subject, "Hi");
        assert_eq!(msg.message, "Hello");
    }

    #[test]
    fn any_empty_field_is_missing() {
        let blanks: [fn(&mut ContactForm); 4] = [
            |f| f.name.clear(),
            |f| f.email.clear(),
            |f| f.subject.clear(),
            |f| f.message.clear(),
        ];
        for blank in blanks {
            let mut form = alice();
            blank(&mut form);
            assert_eq!(form.validate(), Err(ValidationError::MissingField));
        }
    }

    #[test]
    fn missing_wins_over_bad_email() {
        let form = ContactForm::new("", "not-an-email", "Hi", "Hello");
        assert_eq!(form.validate(), Err(ValidationError::MissingField));
    }

    #[test]
    fn bad_email_rejected() {
        let form = ContactForm::new("Alice", "not-an-email", "Hi", "Hello");
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn whitespace_only_fields_pass() {
        // Only emptiness is checked, not blankness.
        let form = ContactForm::new(" ", "a@b.c", " ", " ");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn clear_resets_every_field() {
        let mut form = alice();
        form.clear();
        assert_eq!(form, ContactForm::default());
    }
}
