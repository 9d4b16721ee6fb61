use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_core::LogLevel;
use tracing::debug;

mod commands;
mod fixture;
mod integration;

use commands::documents::{CanArgs, IndexArgs, ShowArgs};
use commands::membership::{DowngradeArgs, PayArgs};
use commands::{Outcome, Session};

/// Folio Command Line Interface
///
/// Answers authorization and listing questions about a wiki described by
/// a TOML fixture.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Fixture of users, documents and collaborator grants
    #[clap(long, global = true)]
    fixture: Option<PathBuf>,

    /// Runtime configuration file
    #[clap(long, global = true)]
    config: Option<String>,

    /// Log level, overriding the configuration
    #[clap(long, global = true)]
    log_level: Option<LogLevel>,

    /// Print results as JSON
    #[clap(long, global = true)]
    json: bool,

    /// Name of the user asking; anonymous when omitted
    #[clap(long = "as", global = true)]
    viewer: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a document by title
    Show(ShowArgs),

    /// List the public index, or the private one with --private
    Index(IndexArgs),

    /// Check whether the viewer may perform an action
    Can(CanArgs),

    /// Downgrade a user to standard, making their documents public
    Downgrade(DowngradeArgs),

    /// Deliver a payment-succeeded event for a user
    Pay(PayArgs),

    /// Show the premium upgrade offer for the viewer
    Offer,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    let config = integration::load_config(cli.config.as_deref(), cli.log_level)?;

    let fixture = cli
        .fixture
        .ok_or_else(|| anyhow::anyhow!("--fixture <PATH> is required"))?;
    let world = integration::initialize_world(config, &fixture)?;

    let viewer = cli
        .viewer
        .as_deref()
        .map(|name| world.user(name))
        .transpose()?;
    debug!(viewer = ?viewer.as_ref().map(|u| &u.name), "Running command");

    let session = Session {
        world: &world,
        viewer,
        json: cli.json,
    };

    match &cli.command {
        Commands::Show(args) => commands::documents::execute_show(&session, args),
        Commands::Index(args) => commands::documents::execute_index(&session, args),
        Commands::Can(args) => commands::documents::execute_can(&session, args),
        Commands::Downgrade(args) => commands::membership::execute_downgrade(&session, args),
        Commands::Pay(args) => commands::membership::execute_pay(&session, args),
        Commands::Offer => commands::membership::execute_offer(&session),
    }
}
