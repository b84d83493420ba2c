pub mod types;
pub mod validation;

pub use types::{Args, Config};

use clap::Parser;

/// Parses the command line and validates it.
///
/// # Errors
///
/// Will return `Err` with a readable message if any flag is out of range.
pub fn args_checks() -> Result<Config, String> {
    let args = Args::parse();
    args.validate()
}
