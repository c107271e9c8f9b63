use async_trait::async_trait;
use contact_app::domain::ContactId;
use contact_app::error::{StoreError, StoreResult};
use contact_app::models::{Contact, ContactFields};
use contact_app::repositories::{ensure_required, ContactRepository};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of ContactRepository that keeps
/// insertion order, enforces unique names like the real store, tracks method
/// calls for verification, and can be switched into a failing state.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    unavailable: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            unavailable: Arc::new(Mutex::new(false)),
        }
    }

    /// Seed a contact directly, bypassing validation.
    pub fn add_contact(&self, name: &str, phone_number: &str, email: Option<&str>) -> Contact {
        let contact = Contact::from_fields(
            ContactId::generate(),
            ContactFields::new(name, phone_number, email.map(str::to_string)),
        );
        self.contacts.lock().unwrap().push(contact.clone());
        contact
    }

    /// Snapshot of the stored contacts.
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    /// Make every subsequent call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if *self.unavailable.lock().unwrap() {
            return Err(StoreError::Unavailable(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn list_all(&self) -> StoreResult<Vec<Contact>> {
        self.track_call("list_all")?;
        Ok(self.contacts())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>> {
        self.track_call("find_by_name")?;

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().find(|c| c.name == name).cloned())
    }

    async fn insert(&self, fields: &ContactFields) -> StoreResult<Contact> {
        self.track_call("insert")?;
        ensure_required(fields)?;

        let mut contacts = self.contacts.lock().unwrap();
        if contacts.iter().any(|c| c.name == fields.name) {
            return Err(StoreError::DuplicateName(fields.name.clone()));
        }

        let contact = Contact::from_fields(ContactId::generate(), fields.clone());
        contacts.push(contact.clone());
        Ok(contact)
    }

    async fn update_by_id(&self, id: &ContactId, fields: &ContactFields) -> StoreResult<()> {
        self.track_call("update_by_id")?;
        ensure_required(fields)?;

        let mut contacts = self.contacts.lock().unwrap();
        if contacts
            .iter()
            .any(|c| c.name == fields.name && &c.id != id)
        {
            return Err(StoreError::DuplicateName(fields.name.clone()));
        }

        if let Some(contact) = contacts.iter_mut().find(|c| &c.id == id) {
            *contact = Contact::from_fields(id.clone(), fields.clone());
        }
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> StoreResult<()> {
        self.track_call("delete_by_name")?;

        let mut contacts = self.contacts.lock().unwrap();
        if let Some(pos) = contacts.iter().position(|c| c.name == name) {
            contacts.remove(pos);
        }
        Ok(())
    }
}
