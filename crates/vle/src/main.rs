//! VLE CLI - PowerPC VLE disassembler and lifter

mod cli;
mod commands;
mod terminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Crates whose events the default filter admits.
const TARGETS: [&str; 3] = ["vle", "vle_isa", "vle_ir"];

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.silent {
        "error"
    } else {
        "info"
    };
    let filter = TARGETS
        .iter()
        .filter_map(|target| format!("{target}={level}").parse().ok())
        .fold(EnvFilter::from_default_env(), EnvFilter::add_directive);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(commands::run_command(&cli));
}
