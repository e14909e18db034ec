//! # tabclean entry point
//!
//! ```text
//! main()
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Load config and initialize logging
//!   └─> Run the subcommand on a Tokio runtime
//! ```
//!
//! ```bash
//! tabclean serve --port 8080
//! tabclean clean data.csv --null-action drop --remove-duplicates --assign-pk
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::Parser as _;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();
    let config = cli::load_config(cli.config.as_ref())?;

    // Logging is best-effort; a read-only data dir must not block cleaning.
    if let Err(e) = tabclean::logging::init(config.log_dir.as_deref()) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    tokio::runtime::Runtime::new()?.block_on(cli::run_command(cli.command, config))?;
    Ok(())
}
