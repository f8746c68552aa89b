//! winstage - workstation staging tool
//!
//! Installs bundled fonts into the Windows font store and stages vendor driver
//! bundles as driver packages on a Configuration Manager site.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod drivers;
mod error;
mod event_log;
mod fonts;
mod hash;
mod platform;
mod progress;
mod ui;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Fonts(args) => commands::fonts::run(cli.config, args),
        Commands::DriverPackage(args) => commands::driver_package::run(cli.config, args),
        Commands::Models => commands::models::run(),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(1);
    }
}
