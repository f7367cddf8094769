use super::Parser;

/// Command line arguments. The settings path defaults by build profile when
/// not given.
#[derive(Parser, Debug)]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,
}
