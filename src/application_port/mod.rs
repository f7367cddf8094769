mod auth_service;
mod contacts_service;
mod credential_resolver;
mod directory_api;
mod identity_provider;

pub use auth_service::*;
pub use contacts_service::*;
pub use credential_resolver::*;
pub use directory_api::*;
pub use identity_provider::*;
