//! Typed client for the sipgate REST contacts API.

mod client;
mod error;
pub mod types;

pub use client::{SipgateClient, SipgateCredentials, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use error::SipgateError;
pub use types::{Address, Contact, ContactsPage, Email, Number, Scope, ScopeFilter};
