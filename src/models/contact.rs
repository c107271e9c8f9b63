//! Contact model representing one stored record.

use crate::domain::ContactId;
use serde::Serialize;

/// A contact as held by the store.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Contact {
    /// Identifier assigned by the store on insert
    pub id: ContactId,

    /// Display name, unique across contacts
    pub name: String,

    /// Mobile phone number as entered
    #[serde(rename = "phonenum")]
    pub phone_number: String,

    /// Optional email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The writable fields of a contact.
///
/// Inserts and updates both carry the full set; the store replaces all three
/// on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
}

impl ContactFields {
    /// Build a field set, treating a blank email as absent.
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
            email: email.filter(|e| !e.trim().is_empty()),
        }
    }
}

impl Contact {
    /// Assemble a stored contact from its id and fields.
    pub fn from_fields(id: ContactId, fields: ContactFields) -> Self {
        Self {
            id,
            name: fields.name,
            phone_number: fields.phone_number,
            email: fields.email,
        }
    }

    /// The contact's current fields, detached from its id.
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_email_is_absent() {
        let fields = ContactFields::new("Hyewon", "081234567999", Some("  ".to_string()));
        assert_eq!(fields.email, None);

        let fields = ContactFields::new("Hyewon", "081234567999", Some("h@gmail.com".to_string()));
        assert_eq!(fields.email.as_deref(), Some("h@gmail.com"));
    }

    #[test]
    fn test_from_fields_round_trip() {
        let id = ContactId::new("abc").unwrap();
        let fields = ContactFields::new("Hyewon", "081234567999", None);
        let contact = Contact::from_fields(id.clone(), fields.clone());

        assert_eq!(contact.id, id);
        assert_eq!(contact.fields(), fields);
    }

    #[test]
    fn test_contact_serializes_form_names() {
        let contact = Contact::from_fields(
            ContactId::new("abc").unwrap(),
            ContactFields::new("Hyewon", "081234567999", None),
        );
        let json = serde_json::to_value(&contact).unwrap();

        assert_eq!(json["id"], "abc");
        assert_eq!(json["phonenum"], "081234567999");
        assert!(json.get("email").is_none());
    }
}
