//! EmailAddress value object.

use super::errors::ValidationError;
use std::fmt;

/// A type-safe wrapper for email addresses.
///
/// This ensures that email addresses are validated at construction time.
/// The validation is syntactic only: one '@', a non-empty local part without
/// whitespace, and a dotted domain whose labels are non-empty.
///
/// # Example
///
/// ```
/// use contact_app::domain::EmailAddress;
///
/// let email = EmailAddress::new("hyewon@gmail.com").unwrap();
/// assert_eq!(email.domain(), "gmail.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the email format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();

        if !Self::is_valid(&email) {
            return Err(ValidationError::InvalidEmail(email));
        }

        Ok(Self(email))
    }

    fn is_valid(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > 64 || domain.contains('@') {
            return false;
        }

        if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
            return false;
        }

        if !domain.contains('.') {
            return false;
        }

        // Labels are alphanumeric with inner hyphens; the TLD needs two letters.
        let labels: Vec<&str> = domain.split('.').collect();
        let labels_ok = labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        });
        let tld_ok = labels
            .last()
            .map(|tld| tld.chars().count() >= 2 && !tld.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false);

        labels_ok && tld_ok
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get the domain part (after '@').
    pub fn domain(&self) -> &str {
        self.0
            .split_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or_default()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
