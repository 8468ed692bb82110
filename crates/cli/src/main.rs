//! Ansania CLI - Database migrations and checks.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! ansania-cli migrate
//!
//! # Check that the database is reachable
//! ansania-cli db ping
//! ```
//!
//! Both commands read `ADMIN_DATABASE_URL`, falling back to `DATABASE_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ansania-cli")]
#[command(author, version, about = "Ansania CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Database checks
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Connect, run a trivial query, and report the server version
    Ping,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Db { action } => match action {
            DbAction::Ping => commands::db::ping().await,
        },
    }
}
