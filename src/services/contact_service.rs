//! Contact service layer.
//!
//! Business logic behind the contact pages: validate a submission, then
//! write it. Store-level name conflicts (two submissions racing past the
//! duplicate check) come back as the same validation error the check gives.

use crate::domain::{ContactId, MobileLocale};
use crate::error::{StoreError, StoreResult, SubmitError, SubmitResult};
use crate::models::{AddContactForm, Contact, EditContactForm};
use crate::repositories::ContactRepository;
use crate::validation::{
    duplicate_name_message, ContactValidator, FieldError, NameCheck, ValidationErrors, ID_MISSING,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// All contacts for the list page.
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>>;

    /// Look up one contact by its exact name.
    async fn find_contact(&self, name: &str) -> StoreResult<Option<Contact>>;

    /// Validate and store a new contact.
    async fn add_contact(&self, form: &AddContactForm) -> SubmitResult<Contact>;

    /// Validate and apply an edit, addressed by the form's hidden id.
    async fn edit_contact(&self, form: &EditContactForm) -> SubmitResult<ContactId>;

    /// Delete the contact with this name; deleting nothing is not an error.
    async fn delete_contact(&self, name: &str) -> StoreResult<()>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
    validator: ContactValidator,
}

impl ContactServiceImpl {
    /// Create a new contact service over `repository`, checking phone numbers
    /// against `locale`.
    pub fn new(repository: Arc<dyn ContactRepository>, locale: MobileLocale) -> Self {
        let validator = ContactValidator::new(repository.clone(), locale);
        Self {
            repository,
            validator,
        }
    }

    /// Turn a unique-index conflict into the duplicate-name form error.
    fn conflict_as_rejection(err: StoreError) -> SubmitError {
        match err {
            StoreError::DuplicateName(name) => {
                let mut errors = ValidationErrors::new();
                let message = duplicate_name_message(&name);
                errors.push(FieldError::new("name", message, name));
                SubmitError::Rejected(errors)
            }
            other => SubmitError::Store(other),
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        self.repository.list_all().await
    }

    async fn find_contact(&self, name: &str) -> StoreResult<Option<Contact>> {
        let contact = self.repository.find_by_name(name).await?;
        if contact.is_none() {
            debug!("No contact named {}", name);
        }
        Ok(contact)
    }

    async fn add_contact(&self, form: &AddContactForm) -> SubmitResult<Contact> {
        let fields = self
            .validator
            .validate(&form.name, &form.phonenum, &form.email, NameCheck::New)
            .await?;

        let contact = self
            .repository
            .insert(&fields)
            .await
            .map_err(Self::conflict_as_rejection)?;

        info!("Contact added: id={} name={}", contact.id, contact.name);
        Ok(contact)
    }

    async fn edit_contact(&self, form: &EditContactForm) -> SubmitResult<ContactId> {
        let id = ContactId::new(form.id.as_str());
        let validated = self
            .validator
            .validate(
                &form.name,
                &form.phonenum,
                &form.email,
                NameCheck::Existing {
                    old_name: &form.old_name,
                },
            )
            .await;

        let (id, fields) = match (id, validated) {
            (Ok(id), Ok(fields)) => (id, fields),
            (id, validated) => {
                let mut errors = match validated {
                    Err(SubmitError::Rejected(errors)) => errors,
                    Err(store) => return Err(store),
                    Ok(_) => ValidationErrors::new(),
                };
                if id.is_err() {
                    errors.push(FieldError::new("_id", ID_MISSING, form.id.as_str()));
                }
                return Err(SubmitError::Rejected(errors));
            }
        };

        self.repository
            .update_by_id(&id, &fields)
            .await
            .map_err(Self::conflict_as_rejection)?;

        info!("Contact edited: id={} name={}", id, fields.name);
        Ok(id)
    }

    async fn delete_contact(&self, name: &str) -> StoreResult<()> {
        self.repository.delete_by_name(name).await?;
        info!("Contact deleted: name={}", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::SqliteContactRepository;
    use crate::validation::{NAME_REQUIRED, PHONE_INVALID};

    async fn service() -> (ContactServiceImpl, Arc<SqliteContactRepository>) {
        let repo = Arc::new(SqliteContactRepository::in_memory().await.unwrap());
        let service = ContactServiceImpl::new(repo.clone(), MobileLocale::IdId);
        (service, repo)
    }

    fn add_form(name: &str, phonenum: &str, email: &str) -> AddContactForm {
        AddContactForm {
            name: name.to_string(),
            phonenum: phonenum.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_then_find() {
        let (service, _) = service().await;
        let added = service
            .add_contact(&add_form("Hyewon", "081234567890", "a@b.com"))
            .await
            .unwrap();

        let found = service.find_contact("Hyewon").await.unwrap().unwrap();
        assert_eq!(found, added);
    }

    #[tokio::test]
    async fn test_rejected_add_writes_nothing() {
        let (service, repo) = service().await;
        let result = service.add_contact(&add_form("Hyewon", "123", "")).await;

        match result {
            Err(SubmitError::Rejected(errors)) => assert_eq!(errors.messages(), vec![PHONE_INVALID]),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_store_conflict_becomes_duplicate_error() {
        let err = ContactServiceImpl::conflict_as_rejection(StoreError::DuplicateName(
            "Hyewon".to_string(),
        ));
        match err {
            SubmitError::Rejected(errors) => {
                assert_eq!(errors.messages(), vec![duplicate_name_message("Hyewon").as_str()])
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_edit_without_id_is_rejected() {
        let (service, _) = service().await;
        let form = EditContactForm {
            id: String::new(),
            old_name: String::new(),
            name: String::new(),
            phonenum: "081234567890".to_string(),
            email: String::new(),
        };

        match service.edit_contact(&form).await {
            Err(SubmitError::Rejected(errors)) => {
                assert_eq!(errors.messages(), vec![NAME_REQUIRED, ID_MISSING]);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_edit_keeps_id() {
        let (service, _) = service().await;
        let added = service
            .add_contact(&add_form("Hyewon", "081234567890", ""))
            .await
            .unwrap();

        let form = EditContactForm {
            id: added.id.to_string(),
            old_name: "Hyewon".to_string(),
            name: "Hyewon Kang".to_string(),
            phonenum: "085712345678".to_string(),
            email: "hyewon@gmail.com".to_string(),
        };
        let id = service.edit_contact(&form).await.unwrap();
        assert_eq!(id, added.id);

        let edited = service.find_contact("Hyewon Kang").await.unwrap().unwrap();
        assert_eq!(edited.id, added.id);
        assert_eq!(edited.phone_number, "085712345678");
        assert_eq!(edited.email.as_deref(), Some("hyewon@gmail.com"));
        assert!(service.find_contact("Hyewon").await.unwrap().is_none());
    }
}
