//! Data models for the contact application.
//!
//! The stored `Contact` record, the field set written to the store, and the
//! typed form payloads each route accepts.

pub mod contact;
pub mod forms;

pub use contact::{Contact, ContactFields};
pub use forms::{AddContactForm, DeleteContactForm, EditContactForm};
