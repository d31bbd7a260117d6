mod cli;
mod commands;
mod config;
mod error;
mod inventory;
mod output;
mod vcenter;

use clap::Parser;
use cli::{Cli, Mode};
use commands::{handle_host_command, handle_list_command, load_settings};
use output::print_error;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the inventory document
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_settings(cli)?;

    match cli.mode() {
        Mode::List => handle_list_command(&config, &cli.format),
        Mode::Host(host) => handle_host_command(&config, &host, &cli.format),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
