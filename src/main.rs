//! icosweep - Concurrent Icon Harvester
//!
//! Entry point for the icosweep CLI application.

use clap::error::ErrorKind;
use clap::Parser;
use icosweep::{cli::Cli, error::ExitCode};

fn main() {
    // Parse command-line arguments. Argument errors exit with code 1 (the
    // CLI contract), while --help/--version remain a successful exit.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
                _ => ExitCode::StartupError,
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    // Run the application logic
    match icosweep::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(ExitCode::StartupError.as_i32());
        }
    }
}
