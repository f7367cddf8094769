mod session_store_memory;
mod temp_token_store_memory;

pub use session_store_memory::*;
pub use temp_token_store_memory::*;
