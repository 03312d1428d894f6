//! Plated CLI - Plate Composition Engine
//!
//! Command-line interface for composing and ordering plates.

use anyhow::Result;
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use plated::cli::commands::{self, ComposeOptions};
use plated::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Plated v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Plated v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Menu { menu, json, dishes } => {
            commands::show_menu(menu.as_deref(), json, dishes.as_deref())
        }
        Commands::Compose {
            menu,
            seed,
            dishes,
            dish,
            user,
            endpoint,
            timeout_ms,
            dry_run,
            script,
        } => commands::compose(ComposeOptions {
            menu,
            seed,
            dishes,
            dish,
            user,
            endpoint,
            timeout_ms,
            dry_run,
            script,
        }),
    }
}
