use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::{Contact, ContactFields};
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// Provides abstraction over contact storage so handlers and services can run
/// against SQLite in production and an in-memory double in tests.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Every stored contact, in insertion order.
    async fn list_all(&self) -> StoreResult<Vec<Contact>>;

    /// Exact-match lookup by name. `None` is not an error.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>>;

    /// Store a new contact and return it with its assigned id.
    ///
    /// Fails with `StoreError::MissingField` when `name` or `phone_number`
    /// is empty, and `StoreError::DuplicateName` when the name is taken.
    async fn insert(&self, fields: &ContactFields) -> StoreResult<Contact>;

    /// Replace all fields of the contact with `id`. Unknown ids are a no-op.
    async fn update_by_id(&self, id: &ContactId, fields: &ContactFields) -> StoreResult<()>;

    /// Remove the contact called `name`, if any.
    async fn delete_by_name(&self, name: &str) -> StoreResult<()>;
}

/// Reject field sets that would break the stored-record invariants.
pub fn ensure_required(fields: &ContactFields) -> StoreResult<()> {
    if fields.name.is_empty() {
        return Err(StoreError::MissingField("name"));
    }
    if fields.phone_number.is_empty() {
        return Err(StoreError::MissingField("phonenum"));
    }
    Ok(())
}
