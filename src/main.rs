use clap::Parser;
use phasecopy::cli::{Cli, run_cli};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_cli(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
