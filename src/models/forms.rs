//! Typed request payloads for the contact forms.
//!
//! Every field defaults to an empty string so a missing field reaches the
//! validation rules (and gets a proper message) instead of failing extraction.

use serde::Deserialize;

/// Body of `POST /contact`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AddContactForm {
    pub name: String,
    pub phonenum: String,
    pub email: String,
}

/// Body of `PUT /contact`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EditContactForm {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "oldName")]
    pub old_name: String,
    pub name: String,
    pub phonenum: String,
    pub email: String,
}

/// Body of `DELETE /contact`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeleteContactForm {
    pub name: String,
}
