use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use hireboard::board_config::{Backend, BoardConfig};
use hireboard::store::OpeningDraft;

mod cmd;

#[derive(Parser)]
#[command(name = "hireboard")]
#[command(version, about = "Recruitment pipeline board and dashboard")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip confirmation prompts
    #[arg(long, global = true)]
    pub yes: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Store backend: sqlite or rest. Overrides hireboard.toml.
    #[arg(long, global = true)]
    pub backend: Option<Backend>,

    /// SQLite database path. Overrides hireboard.toml.
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the pipeline board or move a candidate between stages
    Board {
        #[command(subcommand)]
        command: Option<BoardCommands>,
    },
    /// List candidates
    Candidates {
        #[command(subcommand)]
        command: Option<CandidatesCommands>,
    },
    /// Show candidate and open-opening counts
    Metrics,
    /// List, create, update or delete job openings
    Openings {
        #[command(subcommand)]
        command: Option<OpeningsCommands>,
    },
    /// List upcoming interviews
    Interviews {
        /// Maximum number of interviews to show (defaults to hireboard.toml)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Import a JSON fixture into the SQLite store
    Seed {
        /// Path to the fixture file
        file: PathBuf,
    },
    /// Serve the JSON dashboard API
    Serve {
        /// Port to serve on (defaults to hireboard.toml)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable dev mode (CORS permissive, bind all interfaces)
        #[arg(long)]
        dev: bool,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum BoardCommands {
    /// Print every stage column with its cards
    Show,
    /// Drag a candidate onto the column at POSITION (1-6)
    Move { candidate: i64, position: usize },
}

#[derive(Subcommand, Clone)]
pub enum CandidatesCommands {
    /// List all candidates
    List,
}

#[derive(Subcommand, Clone)]
pub enum OpeningsCommands {
    /// List openings, newest first
    List,
    /// Create an opening
    Create(OpeningArgs),
    /// Replace an opening's fields
    Update {
        id: i64,
        #[command(flatten)]
        fields: OpeningArgs,
    },
    /// Delete an opening
    Delete { id: i64 },
}

#[derive(Args, Clone)]
pub struct OpeningArgs {
    /// Opening title
    pub title: String,

    #[arg(short, long, default_value = "")]
    pub description: String,

    #[arg(short, long, default_value = "")]
    pub requirements: String,

    /// Closing date (YYYY-MM-DD)
    #[arg(long)]
    pub closes_on: Option<NaiveDate>,

    #[arg(long, default_value = "1")]
    pub admin_id: i64,
}

impl From<OpeningArgs> for OpeningDraft {
    fn from(args: OpeningArgs) -> Self {
        OpeningDraft {
            title: args.title,
            description: args.description,
            requirements: args.requirements,
            closes_on: args.closes_on,
            admin_id: args.admin_id,
        }
    }
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default hireboard.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let config = BoardConfig::with_cli_args(
        project_dir,
        cli.verbose,
        cli.yes,
        cli.backend,
        cli.db_path.clone(),
    )?;
    let _log_guard = hireboard::logging::init_logging(
        config.verbose,
        config.log_dir().as_deref(),
        config.log_json(),
    )?;

    match cli.command {
        Commands::Board { command } => match command {
            None | Some(BoardCommands::Show) => cmd::cmd_board_show(&config).await?,
            Some(BoardCommands::Move {
                candidate,
                position,
            }) => cmd::cmd_board_move(&config, candidate, position).await?,
        },
        Commands::Candidates { command } => match command {
            None | Some(CandidatesCommands::List) => cmd::cmd_candidates_list(&config).await?,
        },
        Commands::Metrics => cmd::cmd_metrics(&config).await?,
        Commands::Openings { command } => cmd::cmd_openings(&config, command).await?,
        Commands::Interviews { limit } => cmd::cmd_interviews(&config, limit).await?,
        Commands::Seed { file } => cmd::cmd_seed(&config, &file)?,
        Commands::Serve { port, dev } => cmd::cmd_serve(&config, port, dev).await?,
        Commands::Config { command } => cmd::cmd_config(&config, command)?,
    }

    Ok(())
}
