use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use repo_privatizer::{Config, ExclusionList, GitHubClient, Privatizer};

#[derive(Parser)]
#[command(name = "repo-privatizer")]
#[command(about = "Set every public, non-fork repository of a GitHub account to private")]
#[command(version)]
struct Cli {
    /// GitHub account whose repositories are listed
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    username: String,

    /// Personal access token used for the update calls
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    token: String,

    /// Report what would change without updating anything
    #[arg(long)]
    dry_run: bool,

    /// Send the token on the listing call too (includes private repositories)
    #[arg(long)]
    auth_listing: bool,

    /// Exclusion file (defaults to ./exclude.txt)
    #[arg(short, long)]
    exclude: Option<PathBuf>,

    /// Configuration file path (defaults to XDG config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    init_logging(cli.verbose, &config.logging.level)?;
    info!("Starting repo-privatizer v{}", env!("CARGO_PKG_VERSION"));

    if cli.auth_listing {
        config.github.authenticate_listing = true;
    }
    let exclude_path = cli.exclude.unwrap_or_else(|| config.exclude_path());

    let exclusions = ExclusionList::load(&exclude_path)?;
    let client = GitHubClient::new(&config.github, &cli.token)?;
    let privatizer = Privatizer::new(client, exclusions, cli.dry_run);

    let mut stdout = std::io::stdout().lock();
    privatizer.run(&cli.username, &mut stdout).await?;

    Ok(())
}

/// Initialize logging on stderr; stdout carries the progress report
fn init_logging(verbose: bool, level: &str) -> Result<()> {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}
