//! Runtime configuration: a toml file picked by build profile, overridable
//! per key through `ROLODEX__`-prefixed environment variables.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
