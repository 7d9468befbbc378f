use crate::commands::{run_completion, run_rank, CompletionArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use talent_discovery::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talent Discovery",
    about = "Serve or exercise the CV-first talent discovery core from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank a JSON file of profiles against a search query
    Rank(RankArgs),
    /// Report completion and discoverability for a JSON profile
    Completion(CompletionArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON array of profiles loaded into the in-memory directory at startup
    #[arg(long)]
    pub(crate) seed_profiles: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::Completion(args) => run_completion(args),
    }
}
