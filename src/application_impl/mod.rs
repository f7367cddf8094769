mod auth_service_impl;
mod contacts_service_impl;
mod credential_resolver_impl;
mod directory_api_fake;
mod identity_provider_fake;

pub use auth_service_impl::*;
pub use contacts_service_impl::*;
pub use credential_resolver_impl::*;
pub use directory_api_fake::*;
pub use identity_provider_fake::*;
