//! tilestream CLI - Command-line interface
//!
//! Lists the supported map sources, prints tile URLs and downloads single
//! tiles using the tilestream library.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tilestream::logging::{default_log_dir, default_log_file, init_logging_with_filter};
use tilestream::provider::IgnLayer;

use commands::common::{Context, TileArgs};
use error::CliError;

#[derive(Parser)]
#[command(name = "tilestream")]
#[command(version, about = "Fetch raster map tiles from public web map services", long_about = None)]
struct Cli {
    /// Config file path (default: ~/.tilestream/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API key for sources that need one (overrides the config file)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// IGN layer: scan_express_standard, plan_ign, cartes_ign or satellite
    #[arg(long, global = true)]
    ign_layer: Option<IgnLayer>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported map sources
    Sources,

    /// Print the request URL for a tile without fetching it
    Url {
        #[command(flatten)]
        tile: TileArgs,
    },

    /// Download a single tile
    Fetch {
        #[command(flatten)]
        tile: TileArgs,

        /// Output file (default: {zoom}_{row}_{col}.{ext})
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Give up after this many seconds, retries included
        #[arg(long)]
        deadline: Option<u64>,
    },

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let filter = if cli.verbose { "debug" } else { "warn" };
    let _logging_guard = init_logging_with_filter(default_log_dir(), default_log_file(), filter)
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    // Init must work even when the existing config file is invalid
    let context = || Context::load(cli.config.clone(), cli.api_key.clone(), cli.ign_layer);

    match cli.command {
        Commands::Sources => commands::sources::run(&context()?),
        Commands::Url { tile } => commands::url::run(&context()?, &tile),
        Commands::Fetch {
            tile,
            output,
            deadline,
        } => commands::fetch::run(&context()?, &tile, output, deadline),
        Commands::Init { force } => commands::init::run(cli.config.clone(), force),
    }
}
