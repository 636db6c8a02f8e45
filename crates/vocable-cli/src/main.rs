//! CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vocable_cli::{Cli, Commands, handlers, settings_from_env};

/// Install the log subscriber; `--verbose` overrides `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = settings_from_env()?;

    match cli.command {
        Commands::Estimate { text, rate } => {
            let text = handlers::read_text(&text)?;
            handlers::estimate::execute(&settings, &text, rate);
        }
        Commands::Export(args) => handlers::export::execute(&settings, args).await?,
        Commands::Config => handlers::config::execute(&settings)?,
    }

    Ok(())
}
