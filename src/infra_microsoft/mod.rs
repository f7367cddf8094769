mod directory_api_microsoft;
mod http;
mod identity_provider_microsoft;

pub use directory_api_microsoft::*;
pub use identity_provider_microsoft::*;
