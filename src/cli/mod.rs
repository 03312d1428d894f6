//! CLI Module
//!
//! Command-line front end for composing plates from a terminal or a script.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Plated - compose a plate layer by layer and send it as an order
#[derive(Parser, Debug)]
#[command(name = "plated")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the menu catalog
    #[command(name = "menu")]
    Menu {
        /// Menu catalog JSON (built-in menu if omitted)
        #[arg(short, long)]
        menu: Option<PathBuf>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,

        /// Also list the restaurant dishes from this JSON file
        #[arg(short, long)]
        dishes: Option<PathBuf>,
    },

    /// Compose a plate interactively, or from a script of commands
    #[command(name = "compose")]
    Compose {
        /// Menu catalog JSON (built-in menu if omitted)
        #[arg(short, long)]
        menu: Option<PathBuf>,

        /// Seed dish JSON to start layer 1 with
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// Restaurant dish list JSON
        #[arg(short, long)]
        dishes: Option<PathBuf>,

        /// Start from this dish of the dish list (name or id)
        #[arg(long, requires = "dishes", conflicts_with = "seed")]
        dish: Option<String>,

        /// User id sent with the order (defaults to PLATED_USER_ID)
        #[arg(short, long)]
        user: Option<String>,

        /// Order endpoint URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Order submission timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Print orders instead of sending them
        #[arg(long)]
        dry_run: bool,

        /// Read commands from a file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
    },
}
