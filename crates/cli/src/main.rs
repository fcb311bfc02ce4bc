//! Shutter CLI - shutter command

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod util;

/// Shutter - point-in-time snapshots of your project
#[derive(Parser)]
#[command(name = "shutter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new snapshot
    Create {
        /// Snapshot message (a placeholder embedding the id is generated if omitted)
        message: Option<String>,
    },
    /// List all snapshots, newest first
    List,
    /// Compare two snapshots
    Compare {
        /// First snapshot ID
        id_a: String,
        /// Second snapshot ID
        id_b: String,
    },
    /// Restore the project to a snapshot (backs up the current state first)
    Restore {
        /// Snapshot ID
        id: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create { message } => cmd::create::run(message.as_deref()),
        Commands::List => cmd::list::run(),
        Commands::Compare { id_a, id_b } => cmd::compare::run(&id_a, &id_b),
        Commands::Restore { id } => cmd::restore::run(&id),
    }
}
