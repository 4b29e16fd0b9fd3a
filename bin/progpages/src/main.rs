//! progpages CLI
//!
//! Generates one page per program in a site's library data.
//!
//! This is the binary entry point. The command implementations are in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use progpages::cmd::list::OutputFormat;

/// Command-line interface for progpages.
#[derive(Parser)]
#[command(
    name = "progpages",
    version,
    about = "Generates one page per program in a site's library data"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "site.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// List the program pages the site would generate
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Validate configuration and library data
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    progpages::init_tracing(cli.verbose);

    match cli.command {
        Commands::List { format } => {
            progpages::cmd::list::run(&cli.config, format)?;
        }
        Commands::Check { strict } => {
            progpages::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
