mod error;
mod handler;
mod router;
mod session_cookie;

pub use error::recover_error;
pub use router::routes;
pub use session_cookie::SESSION_COOKIE_NAME;
