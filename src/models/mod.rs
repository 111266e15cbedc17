//! Records exchanged over the API and kept in storage.

pub mod contact;
pub mod status;

pub use contact::{
    ContactMessage, ContactRequest, ContactResponse, ContactStatus, CONTACT_COLLECTION,
};
pub use status::{StatusCheck, StatusCheckCreate, MAX_STATUS_LIST, STATUS_COLLECTION};
