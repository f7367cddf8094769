mod clock;
mod session_store;
mod temp_token_store;

pub use clock::*;
pub use session_store::*;
pub use temp_token_store::*;
