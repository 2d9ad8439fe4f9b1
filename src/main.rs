//! `sceneschema` - Validate and inspect editable scene-item schemas

use clap::Parser;

use sceneschema::cli::args::Cli;
use sceneschema::cli::commands;
use sceneschema::error::ExitCode;
use sceneschema::observability::{LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(LogFormat::Human, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
