mod contact;
mod credential;
mod profile;
mod session;

pub use contact::*;
pub use credential::*;
pub use profile::*;
pub use session::*;
