//! sipgate Team implementation of the bridge [`ContactAdapter`].
//!
//! [`ContactAdapter`]: sipbridge_core::ContactAdapter

mod adapter;
pub mod translate;

pub use adapter::{AdapterSettings, SipgateTeamAdapter};
