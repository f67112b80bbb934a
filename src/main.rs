//! Command line front-end: load games one of three ways, then download them.

use clap::{Parser, Subcommand};
use color_eyre::Result;
use itchdl::{Endpoints, GameLookup, LibraryBuilder, Platform};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "itch-dl", version, about = "Download the games of an itch.io account")]
struct Cli {
    /// API key of the account.
    #[arg(long, env = "ITCH_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Number of games downloaded at once.
    #[arg(short, long, default_value_t = itchdl::library::DEFAULT_JOBS)]
    jobs: usize,

    /// Only fetch uploads built for this platform.
    #[arg(short, long)]
    platform: Option<Platform>,

    /// Directory the `<publisher>/<title>` tree is created in.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Per-request deadline, in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Base URL of the storefront API.
    #[arg(long, env = "ITCH_API_URL", hide = true)]
    api_url: Option<String>,

    /// Hide progress bars.
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Every game owned by the account.
    Owned,
    /// A single game.
    Game { publisher: String, title: String },
    /// Every game on a publisher's storefront page.
    Publisher { publisher: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = if cli.quiet {
        LibraryBuilder::hidden(cli.api_key)
    } else {
        LibraryBuilder::new(cli.api_key)
    }
    .directory(cli.output)
    .jobs(cli.jobs);
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(url) = cli.api_url {
        builder = builder.endpoints(Endpoints::new(url));
    }
    let mut library = builder.build()?;

    match cli.command {
        Command::Owned => {
            library.load_owned_games().await?;
        }
        Command::Game { publisher, title } => {
            if library.load_game(&publisher, &title).await? == GameLookup::NotOwned {
                println!("Cannot find {title} in owned keys, you may not own it.");
                return Ok(());
            }
        }
        Command::Publisher { publisher } => {
            library.load_games(&publisher).await?;
        }
    }

    library.download_library(cli.platform).await;
    Ok(())
}
