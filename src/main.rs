use clap::Parser;
use rebrew::{BrewRunner, Config, app, colors};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "rebrew")]
#[command(author, version, about = "Back up and restore installed Homebrew packages", long_about = None)]
struct Cli {
    /// Homebrew executable
    #[arg(long, env = "REBREW_BREW", default_value = "brew")]
    brew: String,

    /// Where to write the list of installed packages
    #[arg(long, env = "REBREW_MANIFEST", default_value = rebrew::manifest::DEFAULT_MANIFEST)]
    manifest: PathBuf,

    /// Where to generate the Brewfile
    #[arg(long, env = "REBREW_BREWFILE", default_value = rebrew::brewfile::DEFAULT_BREWFILE)]
    brewfile: PathBuf,

    /// Number of concurrent `brew info` queries
    #[arg(long, env = "REBREW_WORKERS", default_value_t = rebrew::describe::DEFAULT_WORKERS)]
    workers: NonZeroUsize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            brew: cli.brew,
            manifest: cli.manifest,
            brewfile: cli.brewfile,
            workers: cli.workers,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    colors::init_colors();

    let config = Config::from(cli);
    let runner = Arc::new(BrewRunner::new(config.brew.clone()));

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    app::run(&config, runner, &mut input, &mut output).await?;

    Ok(())
}
