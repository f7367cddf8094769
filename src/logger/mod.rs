//! Logging bootstrap. The filter starts coarse and is reloaded from settings
//! once they are parsed.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
