//! Bridge contract shared by the sipgate adapter and the bridge server.

mod adapter;
mod app_config;
mod config;
mod contact;
mod error;

pub use adapter::{ContactAdapter, ProviderConfig};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use contact::{Contact, ContactTemplate, ContactUpdate, PhoneNumber, PhoneNumberLabel};
pub use error::{ConfigError, ServiceError};
