//! Validation rules for contact form submissions.
//!
//! Rules run against the raw form values and collect every failure, so the
//! re-rendered form can show all of them at once. The name rule needs the
//! store to check for duplicates; a store failure during that lookup aborts
//! validation with `SubmitError::Store`.

use crate::domain::{EmailAddress, MobileLocale, PhoneNumber};
use crate::error::{SubmitError, SubmitResult};
use crate::models::ContactFields;
use crate::repositories::ContactRepository;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

pub const NAME_REQUIRED: &str = "Name is required!";
pub const PHONE_INVALID: &str = "Phone Number is not valid!";
pub const EMAIL_INVALID: &str = "Email is not valid!";
pub const ID_MISSING: &str = "Contact id is missing!";

/// Message shown when `name` already belongs to another contact.
pub fn duplicate_name_message(name: &str) -> String {
    format!(
        "The contact's name of {} is being used, please use other name!",
        name
    )
}

/// A single failed rule, tied to the form field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form field name, e.g. `phonenum`
    pub field: &'static str,
    /// Human-readable message
    pub message: String,
    /// The submitted value that failed
    pub value: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            value: value.into(),
        }
    }
}

/// Every rule failure from one submission, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Whether any failure concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

/// How the name-uniqueness rule treats an existing contact with the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCheck<'a> {
    /// Adding: any existing contact with this name is a conflict.
    New,
    /// Editing: the contact's own pre-edit name is not a conflict.
    Existing { old_name: &'a str },
}

/// Applies the contact rules to submitted form values.
#[derive(Clone)]
pub struct ContactValidator {
    repository: Arc<dyn ContactRepository>,
    locale: MobileLocale,
}

impl ContactValidator {
    pub fn new(repository: Arc<dyn ContactRepository>, locale: MobileLocale) -> Self {
        Self { repository, locale }
    }

    /// Run every rule and return the fields to write, or all failures.
    pub async fn validate(
        &self,
        name: &str,
        phonenum: &str,
        email: &str,
        check: NameCheck<'_>,
    ) -> SubmitResult<ContactFields> {
        let mut errors = ValidationErrors::new();

        self.check_name(name, check, &mut errors).await?;
        self.check_phone(phonenum, &mut errors);
        Self::check_email(email, &mut errors);

        if !errors.is_empty() {
            return Err(SubmitError::Rejected(errors));
        }

        Ok(ContactFields::new(name, phonenum, Some(email.to_string())))
    }

    async fn check_name(
        &self,
        name: &str,
        check: NameCheck<'_>,
        errors: &mut ValidationErrors,
    ) -> SubmitResult<()> {
        if name.trim().is_empty() {
            errors.push(FieldError::new("name", NAME_REQUIRED, name));
            return Ok(());
        }

        let duplicate = self.repository.find_by_name(name).await?;
        let conflict = match check {
            NameCheck::New => duplicate.is_some(),
            NameCheck::Existing { old_name } => duplicate.is_some() && name != old_name,
        };

        if conflict {
            errors.push(FieldError::new("name", duplicate_name_message(name), name));
        }
        Ok(())
    }

    fn check_phone(&self, phonenum: &str, errors: &mut ValidationErrors) {
        if PhoneNumber::mobile(phonenum, self.locale).is_err() {
            errors.push(FieldError::new("phonenum", PHONE_INVALID, phonenum));
        }
    }

    fn check_email(email: &str, errors: &mut ValidationErrors) {
        if email.trim().is_empty() {
            return;
        }
        if EmailAddress::new(email).is_err() {
            errors.push(FieldError::new("email", EMAIL_INVALID, email));
        }
    }
}
