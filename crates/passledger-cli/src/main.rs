//! Passledger CLI — Command-line interface for the passport registry.
//!
//! Subcommands: init, add-doc, vote, show, status.
//!
//! The CLI plays the wallet role: the account named by `--caller` is sent
//! to the node as the ambient caller identity, and `--preview` runs any
//! operation without committing.

mod commands;

use clap::{Parser, Subcommand};

/// Passledger — identity passport registry.
#[derive(Parser, Debug)]
#[command(name = "passledger", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a passport for the calling account.
    Init(commands::init::InitArgs),
    /// Attach a document fingerprint to a controlled passport.
    AddDoc(commands::add_doc::AddDocArgs),
    /// Cast a trust vote for a document in a passport.
    Vote(commands::vote::VoteArgs),
    /// Show a passport and its documents.
    Show(commands::show::ShowArgs),
    /// Query the status of a running node.
    Status(commands::status::StatusArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init(args) => commands::init::run(args).await,
        Commands::AddDoc(args) => commands::add_doc::run(args).await,
        Commands::Vote(args) => commands::vote::run(args).await,
        Commands::Show(args) => commands::show::run(args).await,
        Commands::Status(args) => commands::status::run(args).await,
    }
}
