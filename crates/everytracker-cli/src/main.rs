use clap::{ArgAction, Parser, Subcommand};
use commands::{config, list, search, serve, sync};
use std::path::PathBuf;
use tracker_models::MediaKind;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "everytracker")]
#[command(about = "EveryTracker - Track your anime and manga, synced from AniList")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    #[command(long_about = "Serve the tracker HTTP API: list and upsert items, trigger syncs from a remote source, and search its catalog. Host and port default to the [server] config section; PORT overrides the port.")]
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Also write logs to a daily rotating file (defaults to the log directory)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        log_file: Option<Option<PathBuf>>,
    },
    /// Pull a user's list from a remote source into the local store
    #[command(long_about = "Fetch a user's complete anime or manga list from the remote source and upsert every entry into the local store. Existing records are updated in place, keyed by their remote media id.")]
    Sync {
        /// Media kind: anime or manga
        kind: MediaKind,

        /// Remote username (defaults to anilist.default_username)
        #[arg(long, short)]
        username: Option<String>,

        /// Remote source to sync from
        #[arg(long, default_value = "anilist")]
        source: String,
    },
    /// Search a remote catalog (nothing is stored)
    Search {
        /// Media kind: anime or manga
        kind: MediaKind,

        /// Search text
        query: String,

        /// Maximum number of results (defaults to anilist.search_limit)
        #[arg(long, short)]
        limit: Option<u32>,

        /// Remote source to search
        #[arg(long, default_value = "anilist")]
        source: String,
    },
    /// List tracked items of one kind
    List {
        /// Media kind: anime or manga
        kind: MediaKind,
    },
    /// View or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve { log_file: Some(path), .. } => Some(match path {
            Some(path) => path.clone(),
            None => tracker_config::PathManager::default().server_log_file(),
        }),
        _ => None,
    };
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Serve { host, port, .. } => serve::run_serve(host, port, &output).await,
        Commands::Sync { kind, username, source } => {
            sync::run_sync(kind, username, &source, &output).await
        }
        Commands::Search { kind, query, limit, source } => {
            search::run_search(kind, &query, limit, &source, &output).await
        }
        Commands::List { kind } => list::run_list(kind, &output),
        Commands::Config { cmd } => config::run_config(cmd, &output),
    }
}
